use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Handle of a scheduled timer, unique within one [`Timers`] instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Scheduling backend injected into timer-driven games.
///
/// Implementations never call back into the game directly: the host delivers fired ids through
/// [`TimerDriven::on_timer`](crate::TimerDriven::on_timer). Cancelling an unknown or already fired id is a no-op.
pub trait Timers {
    fn start_timeout(&mut self, delay_ms: u32) -> TimerId;
    fn start_interval(&mut self, period_ms: u32) -> TimerId;
    fn cancel(&mut self, id: TimerId);

    /// Milliseconds elapsed on this backend's clock, only ever compared with itself.
    fn now_ms(&self) -> u64;
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct PendingTimer {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u32>,
}

/// Virtual clock driven explicitly by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualTimers {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl ManualTimers {
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|timer| timer.id == id)
    }

    /// Fires the earliest timer due at or before `until_ms` and moves the clock to its deadline.
    ///
    /// Ties are broken by creation order. Intervals are re-armed before returning. When nothing is due the clock
    /// moves to `until_ms` and `None` is returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let next = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
            .map(|(index, _)| index);

        let Some(index) = next else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let timer = self.pending[index];
        self.now_ms = timer.due_ms;
        match timer.period_ms {
            Some(period_ms) => self.pending[index].due_ms += u64::from(period_ms.max(1)),
            None => {
                self.pending.swap_remove(index);
            }
        }
        log::trace!("timer {:?} fired at {}ms", timer.id, self.now_ms);
        Some(timer.id)
    }

    fn schedule(&mut self, delay_ms: u32, period_ms: Option<u32>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due_ms: self.now_ms + u64::from(delay_ms),
            period_ms,
        });
        id
    }
}

impl Timers for ManualTimers {
    fn start_timeout(&mut self, delay_ms: u32) -> TimerId {
        self.schedule(delay_ms, None)
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerId {
        let period_ms = period_ms.max(1);
        self.schedule(period_ms, Some(period_ms))
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|timer| timer.id != id);
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

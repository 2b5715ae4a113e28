use std::collections::BTreeMap;

use gloo::timers::callback::{Interval, Timeout};
use promoplay_core::{TimerId, Timers};
use web_time::Instant;
use yew::Callback;

/// Held only to keep the browser timer alive.
#[allow(dead_code)]
#[derive(Debug)]
enum Handle {
    Timeout(Timeout),
    Interval(Interval),
}

/// Browser-backed [`Timers`]: fired ids are posted to a component callback.
///
/// Every handle is owned here, so dropping the component's game cancels whatever is still scheduled.
#[derive(Debug)]
pub(crate) struct GlooTimers {
    origin: Instant,
    next_id: u64,
    on_fire: Callback<TimerId>,
    active: BTreeMap<TimerId, Handle>,
}

impl GlooTimers {
    pub(crate) fn new(on_fire: Callback<TimerId>) -> Self {
        Self {
            origin: Instant::now(),
            next_id: 0,
            on_fire,
            active: BTreeMap::new(),
        }
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Forgets a one-shot timer once its message has been received.
    pub(crate) fn acknowledge(&mut self, id: TimerId) {
        if matches!(self.active.get(&id), Some(Handle::Timeout(_))) {
            self.active.remove(&id);
        }
    }

    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Timers for GlooTimers {
    fn start_timeout(&mut self, delay_ms: u32) -> TimerId {
        let id = self.allocate();
        let on_fire = self.on_fire.clone();
        let handle = Timeout::new(delay_ms, move || on_fire.emit(id));
        self.active.insert(id, Handle::Timeout(handle));
        log::trace!("timeout {:?} in {} ms", id, delay_ms);
        id
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerId {
        let id = self.allocate();
        let on_fire = self.on_fire.clone();
        let handle = Interval::new(period_ms, move || on_fire.emit(id));
        self.active.insert(id, Handle::Interval(handle));
        log::trace!("interval {:?} every {} ms", id, period_ms);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        // dropping a gloo handle clears it
        if self.active.remove(&id).is_some() {
            log::trace!("cancelled {:?}", id);
        }
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn ids_are_unique_and_cancellation_forgets_them() {
        let mut timers = GlooTimers::new(Callback::noop());

        let first = timers.start_timeout(10_000);
        let second = timers.start_interval(10_000);
        assert_ne!(first, second);
        assert_eq!(timers.active_count(), 2);

        timers.acknowledge(second);
        assert_eq!(timers.active_count(), 2);
        timers.acknowledge(first);
        assert_eq!(timers.active_count(), 1);

        timers.cancel(second);
        timers.cancel(second);
        assert_eq!(timers.active_count(), 0);
    }

    #[wasm_bindgen_test]
    fn clock_is_monotonic() {
        let timers = GlooTimers::new(Callback::noop());

        let mut previous = timers.now_ms();
        for _ in 0..1_000 {
            let now = timers.now_ms();
            assert!(now >= previous);
            previous = now;
        }
    }
}

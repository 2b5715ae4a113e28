use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Share of a segment kept clear on each side so the pointer never rests on a border.
const SEGMENT_MARGIN: f64 = 0.1;

pub fn segment_width(segment_count: usize) -> f64 {
    360.0 / segment_count.max(1) as f64
}

/// Rotation at which the pointer rests inside `segment`.
///
/// `offset_draw` in `[0, 1)` picks where inside the segment the wheel stops.
pub fn stop_angle(segment: usize, segment_count: usize, full_rotations: u32, offset_draw: f64) -> f64 {
    let width = segment_width(segment_count);
    let margin = width * SEGMENT_MARGIN;
    let offset = margin + offset_draw.clamp(0.0, 1.0) * (width - 2.0 * margin);
    f64::from(full_rotations) * 360.0 + segment as f64 * width + offset
}

/// Segment under the pointer for a given wheel rotation.
pub fn segment_at_angle(angle: f64, segment_count: usize) -> usize {
    let segment_count = segment_count.max(1);
    let mut normalized = angle % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    ((normalized / segment_width(segment_count)) as usize).min(segment_count - 1)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub segment: usize,
    pub stop_angle: f64,
}

/// Weighted wheel: the segment is drawn up front, the spin animation only has to land on it.
#[derive(Debug)]
pub struct SpinWheel<T: Timers> {
    config: SpinWheelConfig,
    rng: SmallRng,
    timers: T,
    session: Session,
    spin: Option<Spin>,
    spin_timer: Option<TimerId>,
    started_ms: Option<u64>,
}

impl<T: Timers> SpinWheel<T> {
    pub fn new(config: SpinWheelConfig, seed: u64, timers: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_unchecked(config, seed, timers))
    }

    /// Builds the wheel without validating `config`.
    pub fn new_unchecked(config: SpinWheelConfig, seed: u64, timers: T) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            timers,
            session: Session::new(0),
            spin: None,
            spin_timer: None,
            started_ms: None,
        }
    }

    pub fn segments(&self) -> &RewardCatalog {
        &self.config.segments
    }

    pub fn spin_duration_ms(&self) -> u32 {
        self.config.spin_duration_ms
    }

    pub fn current_spin(&self) -> Option<Spin> {
        self.spin
    }

    pub fn is_spinning(&self) -> bool {
        self.spin_timer.is_some()
    }

    pub fn spin(&mut self) -> PlayOutcome {
        if !self.session.status().is_idle() {
            log::trace!("spin ignored, wheel is {:?}", self.session.status());
            return PlayOutcome::NoChange;
        }

        let segment_count = self.config.segments.len();
        let segment = select_position(&self.config.segments, self.rng.random());
        let stop_angle = stop_angle(
            segment,
            segment_count,
            self.config.full_rotations,
            self.rng.random(),
        );
        log::debug!("spinning to segment {} at {:.1} degrees", segment, stop_angle);

        self.session.select(&self.config.segments[segment]);
        self.session.activate();
        self.session.set_revealing();
        self.spin = Some(Spin {
            segment,
            stop_angle,
        });
        self.started_ms = Some(self.timers.now_ms());
        self.spin_timer = Some(self.timers.start_timeout(self.config.spin_duration_ms));
        PlayOutcome::Progressed
    }

    fn cancel_timers(&mut self) {
        if let Some(id) = self.spin_timer.take() {
            self.timers.cancel(id);
        }
    }
}

impl<T: Timers> RewardGame for SpinWheel<T> {
    fn session(&self) -> &Session {
        &self.session
    }

    /// Share of the spin animation played so far.
    fn progress(&self) -> f32 {
        match (self.session.status(), self.started_ms) {
            (SessionStatus::Won, _) => 1.0,
            (_, None) => 0.0,
            (_, Some(started_ms)) => {
                let elapsed = self.timers.now_ms().saturating_sub(started_ms);
                (elapsed as f32 / self.config.spin_duration_ms.max(1) as f32).min(1.0)
            }
        }
    }

    fn reset(&mut self) {
        self.cancel_timers();
        self.spin = None;
        self.started_ms = None;
        self.session = self.session.next();
        log::debug!("spin wheel reset to session {}", self.session.generation());
    }

    fn teardown(&mut self) {
        self.cancel_timers();
    }
}

impl<T: Timers> TimerDriven for SpinWheel<T> {
    type Timers = T;

    fn timers(&self) -> &T {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    fn on_timer(&mut self, id: TimerId) -> PlayOutcome {
        if self.spin_timer != Some(id) {
            return PlayOutcome::NoChange;
        }
        self.spin_timer = None;
        self.session.win()
    }
}

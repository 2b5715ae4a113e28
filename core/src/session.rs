use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Revealing,
    Won,
    Lost(LossReason),
}

impl SessionStatus {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_live(self) -> bool {
        matches!(self, Self::Active | Self::Revealing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost(_))
    }
}

/// State shared by every game for the lifetime of one play, from mount or reset until the next reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    status: SessionStatus,
    generation: u32,
    selected: Option<RewardOption>,
    gate: CompletionGate,
}

impl Session {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn selected(&self) -> Option<&RewardOption> {
        self.selected.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Fresh session following this one.
    pub fn next(&self) -> Self {
        Self::new(self.generation.wrapping_add(1))
    }

    pub(crate) fn select(&mut self, reward: &RewardOption) {
        if let Some(selected) = &self.selected {
            log::warn!(
                "session {} already selected {}, ignoring {}",
                self.generation,
                selected.code,
                reward.code
            );
            return;
        }
        log::trace!("session {} selected {}", self.generation, reward.code);
        self.selected = Some(reward.clone());
    }

    pub(crate) fn activate(&mut self) {
        if self.status.is_idle() {
            log::debug!("session {} started", self.generation);
            self.status = SessionStatus::Active;
        }
    }

    pub(crate) fn set_revealing(&mut self) {
        if self.status.is_live() {
            self.status = SessionStatus::Revealing;
        }
    }

    pub(crate) fn set_active(&mut self) {
        if self.status.is_live() {
            self.status = SessionStatus::Active;
        }
    }

    pub(crate) fn win(&mut self) -> PlayOutcome {
        if self.status.is_finished() {
            return PlayOutcome::NoChange;
        }
        let Some(reward) = &self.selected else {
            log::error!("session {} won without a selected reward", self.generation);
            return PlayOutcome::NoChange;
        };

        let outcome = self.gate.settle(reward);
        if outcome.is_won() {
            log::debug!("session {} won", self.generation);
            self.status = SessionStatus::Won;
        }
        outcome
    }

    pub(crate) fn lose(&mut self, reason: LossReason) -> PlayOutcome {
        if self.status.is_finished() {
            return PlayOutcome::NoChange;
        }
        log::debug!("session {} lost: {:?}", self.generation, reason);
        self.status = SessionStatus::Lost(reason);
        PlayOutcome::Lost(reason)
    }
}

/// Common surface of the reward mini-games as seen by a host page.
pub trait RewardGame {
    fn session(&self) -> &Session;

    /// Fraction of the reveal completed, in `0.0..=1.0`, never decreasing within a session.
    fn progress(&self) -> f32;

    /// Discards the current session and starts a fresh one.
    fn reset(&mut self);

    /// Cancels everything still scheduled, for when the game goes away.
    fn teardown(&mut self) {}

    fn status(&self) -> SessionStatus {
        self.session().status()
    }

    fn selected(&self) -> Option<&RewardOption> {
        self.session().selected()
    }

    fn generation(&self) -> u32 {
        self.session().generation()
    }
}

/// Games that schedule delays through an injected [`Timers`] backend.
pub trait TimerDriven: RewardGame {
    type Timers: Timers;

    fn timers(&self) -> &Self::Timers;

    fn timers_mut(&mut self) -> &mut Self::Timers;

    /// Delivers a fired timer. Ids that no longer belong to the current session are ignored.
    fn on_timer(&mut self, id: TimerId) -> PlayOutcome;
}

/// Advances a game on a [`ManualTimers`] clock by `elapsed_ms`, returning every outcome that changed something.
pub fn drive<G>(game: &mut G, elapsed_ms: u64) -> Vec<PlayOutcome>
where
    G: TimerDriven<Timers = ManualTimers> + ?Sized,
{
    let until_ms = game.timers().now_ms() + elapsed_ms;
    let mut outcomes = Vec::new();
    while let Some(id) = game.timers_mut().pop_due(until_ms) {
        let outcome = game.on_timer(id);
        if outcome.has_update() {
            outcomes.push(outcome);
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_requires_a_selection_and_happens_once() {
        let mut session = Session::new(0);
        assert_eq!(session.win(), PlayOutcome::NoChange);
        assert_eq!(session.status(), SessionStatus::Idle);

        let reward = RewardOption::new("SPIN10", 10, "10% off");
        session.select(&reward);
        session.activate();

        assert_eq!(session.win(), PlayOutcome::Won(reward));
        assert_eq!(session.win(), PlayOutcome::NoChange);
        assert_eq!(session.lose(LossReason::Expired), PlayOutcome::NoChange);
        assert_eq!(session.status(), SessionStatus::Won);
    }

    #[test]
    fn selection_is_set_only_once() {
        let mut session = Session::new(3);
        let first = RewardOption::new("A", 5, "a");
        let second = RewardOption::new("B", 10, "b");

        session.select(&first);
        session.select(&second);

        assert_eq!(session.selected(), Some(&first));
    }

    #[test]
    fn next_session_is_fresh() {
        let mut session = Session::new(7);
        session.select(&RewardOption::new("A", 5, "a"));
        session.activate();
        session.lose(LossReason::WrongPick);

        let next = session.next();

        assert_eq!(next.generation(), 8);
        assert_eq!(next.status(), SessionStatus::Idle);
        assert_eq!(next.selected(), None);
    }

    #[test]
    fn sessions_start_idle() {
        assert_eq!(SessionStatus::default(), SessionStatus::Idle);
        assert_eq!(Session::default().status(), SessionStatus::Idle);
    }
}

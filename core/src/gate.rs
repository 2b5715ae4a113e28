use serde::{Deserialize, Serialize};

use crate::*;

/// At-most-once latch in front of the win outcome of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionGate {
    settled: Option<RewardOption>,
}

impl CompletionGate {
    pub const fn new() -> Self {
        Self { settled: None }
    }

    pub const fn is_settled(&self) -> bool {
        self.settled.is_some()
    }

    pub fn reward(&self) -> Option<&RewardOption> {
        self.settled.as_ref()
    }

    /// Returns `Won` the first time it is called and `NoChange` on every call after that.
    pub fn settle(&mut self, reward: &RewardOption) -> PlayOutcome {
        if let Some(settled) = &self.settled {
            log::trace!("completion gate already settled with {}", settled.code);
            return PlayOutcome::NoChange;
        }

        log::debug!("reward settled: {}", reward.code);
        self.settled = Some(reward.clone());
        PlayOutcome::Won(reward.clone())
    }
}

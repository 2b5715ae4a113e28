#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use color_match::*;
pub use config::*;
pub use error::*;
pub use gate::*;
pub use lucky_draw::*;
pub use reward::*;
pub use scratch_card::*;
pub use selector::*;
pub use session::*;
pub use spin_wheel::*;
pub use timer::*;

mod color_match;
mod config;
mod error;
mod gate;
mod lucky_draw;
mod reward;
mod scratch_card;
mod selector;
mod session;
mod spin_wheel;
mod timer;

/// Why a session ended without a reward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// The countdown reached zero with unmatched pairs left.
    Expired,
    /// A non-winning card was picked.
    WrongPick,
    /// Every pair was found, but with more moves than allowed.
    TooManyMoves,
}

/// Result of feeding one input or timer event into a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayOutcome {
    NoChange,
    Progressed,
    Won(RewardOption),
    Lost(LossReason),
}

impl PlayOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_won(&self) -> bool {
        matches!(self, Self::Won(_))
    }

    pub fn won_reward(&self) -> Option<&RewardOption> {
        match self {
            Self::Won(reward) => Some(reward),
            _ => None,
        }
    }
}

impl BitOr for PlayOutcome {
    type Output = PlayOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use PlayOutcome::*;
        match (self, rhs) {
            (Won(reward), _) => Won(reward),
            (_, Won(reward)) => Won(reward),
            (Lost(reason), _) => Lost(reason),
            (_, Lost(reason)) => Lost(reason),
            (Progressed, _) => Progressed,
            (_, Progressed) => Progressed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

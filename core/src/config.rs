use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

fn catalog(options: &[(&str, u32, &str, f64)]) -> RewardCatalog {
    RewardCatalog::new_unchecked(
        options
            .iter()
            .map(|&(code, discount, description, weight)| {
                RewardOption::new(code, discount, description).with_weight(weight)
            })
            .collect(),
    )
}

fn invalid(message: &str) -> PlayError {
    PlayError::InvalidConfig(message.to_string())
}

/// Reward catalogs and tuning for every game, as supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromoConfig {
    pub spin_wheel: SpinWheelConfig,
    pub scratch_card: ScratchCardConfig,
    pub lucky_draw: LuckyDrawConfig,
    pub color_match: ColorMatchConfig,
}

impl PromoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| PlayError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.spin_wheel.validate()?;
        self.scratch_card.validate()?;
        self.lucky_draw.validate()?;
        self.color_match.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinWheelConfig {
    /// One wheel segment per option, weighted.
    pub segments: RewardCatalog,
    pub spin_duration_ms: u32,
    pub full_rotations: u32,
}

impl SpinWheelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.spin_duration_ms == 0 {
            return Err(invalid("spin_duration_ms must be positive"));
        }
        if self.full_rotations == 0 {
            return Err(invalid("full_rotations must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SpinWheelConfig {
    fn default() -> Self {
        Self {
            segments: catalog(&[
                ("SPIN5", 5, "5% off your next order", 4.0),
                ("SPIN10", 10, "10% off your next order", 3.0),
                ("FREESHIP", 0, "Free shipping", 3.0),
                ("SPIN15", 15, "15% off your next order", 2.0),
                ("SPIN20", 20, "20% off your next order", 1.0),
                ("SPIN50", 50, "50% off a single item", 0.5),
            ]),
            spin_duration_ms: 4_000,
            full_rotations: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchCardConfig {
    pub prizes: RewardCatalog,
    pub columns: u16,
    pub rows: u16,
    /// Radius of one scratch stroke, in cells.
    pub brush_radius: u16,
    /// Cleared fraction that must be exceeded to reveal the prize.
    pub reveal_threshold: f32,
}

impl ScratchCardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid("scratch surface must have at least one cell"));
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold < 1.0) {
            return Err(PlayError::InvalidConfig(format!(
                "reveal_threshold must be between 0 and 1, got {}",
                self.reveal_threshold
            )));
        }
        Ok(())
    }
}

impl Default for ScratchCardConfig {
    fn default() -> Self {
        Self {
            prizes: catalog(&[
                ("SCRATCH5", 5, "5% off everything", 1.0),
                ("SCRATCH10", 10, "10% off everything", 1.0),
                ("SCRATCH15", 15, "15% off everything", 1.0),
            ]),
            columns: 24,
            rows: 12,
            brush_radius: 1,
            reveal_threshold: 0.30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckyDrawConfig {
    pub prizes: RewardCatalog,
    pub card_count: usize,
}

impl LuckyDrawConfig {
    pub fn validate(&self) -> Result<()> {
        if self.card_count < 2 {
            return Err(invalid("card_count must be at least 2"));
        }
        Ok(())
    }
}

impl Default for LuckyDrawConfig {
    fn default() -> Self {
        Self {
            prizes: catalog(&[
                ("LUCKY10", 10, "10% off your cart", 1.0),
                ("LUCKY15", 15, "15% off your cart", 1.0),
                ("LUCKY20", 20, "20% off your cart", 1.0),
            ]),
            card_count: 9,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMatchConfig {
    pub prizes: RewardCatalog,
    /// CSS colors, each placed on exactly two tiles.
    pub palette: Vec<String>,
    pub countdown_secs: u32,
    pub compare_delay_ms: u32,
    /// Most pair attempts allowed for a completed board to still pay out.
    pub max_moves: u32,
}

impl ColorMatchConfig {
    pub fn pair_count(&self) -> usize {
        self.palette.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(invalid("palette must contain at least one color"));
        }
        if self.palette.len() > usize::from(ColorIndex::MAX) + 1 {
            return Err(invalid("palette has too many colors"));
        }
        if self.countdown_secs == 0 {
            return Err(invalid("countdown_secs must be positive"));
        }
        if (self.max_moves as usize) < self.pair_count() {
            return Err(PlayError::InvalidConfig(format!(
                "max_moves {} is below the {} moves a perfect game needs",
                self.max_moves,
                self.pair_count()
            )));
        }
        Ok(())
    }
}

impl Default for ColorMatchConfig {
    fn default() -> Self {
        Self {
            prizes: catalog(&[
                ("COLOR5", 5, "5% off accessories", 1.0),
                ("COLOR10", 10, "10% off accessories", 1.0),
            ]),
            palette: vec![
                "#ef4444".to_string(),
                "#f59e0b".to_string(),
                "#10b981".to_string(),
                "#3b82f6".to_string(),
                "#8b5cf6".to_string(),
                "#ec4899".to_string(),
            ],
            countdown_secs: 60,
            compare_delay_ms: 1_000,
            max_moves: 6,
        }
    }
}

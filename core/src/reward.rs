use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

const fn default_weight() -> f64 {
    1.0
}

/// A single prize a game can hand out. Only `weight` matters to the engine, the
/// rest is passed through to the host untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardOption {
    pub code: String,
    pub discount_percent: u32,
    pub description: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl RewardOption {
    pub fn new(code: impl Into<String>, discount_percent: u32, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            discount_percent,
            description: description.into(),
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(PlayError::MissingCode);
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(PlayError::InvalidWeight);
        }
        Ok(())
    }
}

/// Non-empty list of reward options with unique codes and a positive total weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RewardOption>", into = "Vec<RewardOption>")]
pub struct RewardCatalog {
    options: Vec<RewardOption>,
}

impl RewardCatalog {
    pub fn new(options: Vec<RewardOption>) -> Result<Self> {
        if options.is_empty() {
            return Err(PlayError::EmptyCatalog);
        }

        for (index, option) in options.iter().enumerate() {
            option.validate()?;
            if options[..index].iter().any(|prev| prev.code == option.code) {
                return Err(PlayError::DuplicateCode(option.code.to_string()));
            }
        }

        let catalog = Self { options };
        if catalog.total_weight() <= 0.0 {
            return Err(PlayError::InvalidWeight);
        }
        Ok(catalog)
    }

    pub(crate) fn new_unchecked(options: Vec<RewardOption>) -> Self {
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RewardOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, RewardOption> {
        self.options.iter()
    }

    pub fn as_slice(&self) -> &[RewardOption] {
        &self.options
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.options.iter().map(|option| option.weight)
    }

    pub fn total_weight(&self) -> f64 {
        self.weights().sum()
    }

    pub fn find(&self, code: &str) -> Option<&RewardOption> {
        self.options.iter().find(|option| option.code == code)
    }
}

impl Index<usize> for RewardCatalog {
    type Output = RewardOption;

    fn index(&self, index: usize) -> &Self::Output {
        &self.options[index]
    }
}

impl TryFrom<Vec<RewardOption>> for RewardCatalog {
    type Error = PlayError;

    fn try_from(options: Vec<RewardOption>) -> Result<Self> {
        Self::new(options)
    }
}

impl From<RewardCatalog> for Vec<RewardOption> {
    fn from(catalog: RewardCatalog) -> Self {
        catalog.options
    }
}

impl<'a> IntoIterator for &'a RewardCatalog {
    type Item = &'a RewardOption;
    type IntoIter = core::slice::Iter<'a, RewardOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

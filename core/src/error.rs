use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error("Reward catalog is empty")]
    EmptyCatalog,
    #[error("Reward option has an empty code")]
    MissingCode,
    #[error("Reward code {0:?} appears more than once")]
    DuplicateCode(String),
    #[error("Reward weights must be finite, non-negative and sum to a positive total")]
    InvalidWeight,
    #[error("Index out of range")]
    InvalidIndex,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = core::result::Result<T, PlayError>;

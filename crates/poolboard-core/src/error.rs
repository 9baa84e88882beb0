use thiserror::Error;

use crate::square::SquareId;

/// Rejected board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("catalog has no entries")]
    EmptyCatalog,

    #[error("catalog entry #{index} has an empty name")]
    EmptyEntryName { index: usize },

    #[error("catalog entry {0:?} appears more than once")]
    DuplicateEntry(String),

    #[error("catalog entry {0:?} has zero weight")]
    ZeroWeight(String),

    #[error("catalog entry {name:?} has invalid {outcome} price {price}")]
    InvalidPrice {
        name: String,
        outcome: crate::Outcome,
        price: f64,
    },

    #[error("unit price must be greater than zero")]
    ZeroUnitPrice,

    #[error("unit price {unit_price} overflows the pool total for {squares} squares")]
    UnitPriceTooLarge { unit_price: u64, squares: usize },

    #[error("claim for {0} references an entry not in the catalog")]
    UnknownClaimEntry(SquareId),

    #[error("square {0} is claimed more than once")]
    DuplicateClaimRecord(SquareId),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected board interaction. The board is left unchanged whenever one of
/// these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no catalog entry named {0:?}")]
    UnknownEntry(String),

    #[error("square {square} is already claimed by {claimant}")]
    SquareClaimed { square: SquareId, claimant: String },

    #[error("no square selected")]
    NothingSelected,

    #[error("participant name is empty")]
    MissingName,

    #[error("participant email is empty")]
    MissingEmail,

    #[error("square {square} was claimed by {claimant} before this submit")]
    DuplicateClaim { square: SquareId, claimant: String },
}

impl BoardError {
    /// True for the errors that gate the submit action: no selection or an
    /// empty identity field.
    pub fn is_invalid_commit(&self) -> bool {
        matches!(
            self,
            BoardError::NothingSelected | BoardError::MissingName | BoardError::MissingEmail
        )
    }
}

//! Square identity: one catalog entry paired with one outcome side.
//!
//! Every claim on the board is keyed by a [`SquareId`]. The key is derived
//! from a selection alone, so the same `(entry, outcome)` pair always maps to
//! the same square no matter how it was picked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two mutually exclusive sides a square can be claimed under.
///
/// Side A is shown as blue, side B as red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Blue,
    Red,
}

impl Outcome {
    /// Both outcomes in display order.
    pub const ALL: [Outcome; 2] = [Outcome::Blue, Outcome::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Blue => "blue",
            Outcome::Red => "red",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown outcome {0:?} (expected blue/a or red/b)")]
pub struct ParseOutcomeError(pub String);

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "a" => Ok(Outcome::Blue),
            "red" | "b" => Ok(Outcome::Red),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

/// Composite key `(entry name, outcome)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquareId {
    pub entry: String,
    pub outcome: Outcome,
}

impl SquareId {
    pub fn new(entry: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            entry: entry.into(),
            outcome,
        }
    }

    /// True if this square is `(entry, outcome)`.
    pub fn is(&self, entry: &str, outcome: Outcome) -> bool {
        self.outcome == outcome && self.entry == entry
    }
}

/// Renders as `Nevada-red`.
impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.entry, self.outcome)
    }
}

pub mod board;
pub mod catalog;
pub mod claims;
pub mod config;
pub mod error;
pub mod square;

pub use board::{Board, BoardRow, ParticipantDraft, SquareStatus};
pub use catalog::{Catalog, CatalogEntry, battleground_states};
pub use claims::{ClaimRecord, ClaimStore};
pub use config::{BoardConfig, DEFAULT_UNIT_PRICE, DuplicatePolicy};
pub use error::{BoardError, ConfigError};
pub use square::{Outcome, ParseOutcomeError, SquareId};

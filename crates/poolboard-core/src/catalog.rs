//! The fixed list of contestable entries.
//!
//! A [`Catalog`] is built once from a validated [`BoardConfig`](crate::BoardConfig)
//! and never mutated afterwards. Entries keep declaration order.

use serde::{Deserialize, Serialize};

use crate::square::Outcome;

/// One contested region with its weight and per-outcome price multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Electoral votes.
    pub weight: u32,
    pub price_blue: f64,
    pub price_red: f64,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, weight: u32, price_blue: f64, price_red: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            price_blue,
            price_red,
        }
    }

    pub fn price(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Blue => self.price_blue,
            Outcome::Red => self.price_red,
        }
    }
}

/// Read-only, declaration-ordered list of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wrap already-validated entries. Use [`BoardConfig::validate`](crate::BoardConfig::validate)
    /// before calling this with user-supplied data.
    pub(crate) fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// All entries in declaration order.
    pub fn list_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn price_for(&self, name: &str, outcome: Outcome) -> Option<f64> {
        self.entry(name).map(|e| e.price(outcome))
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upper bound on the number of claims: two squares per entry.
    pub fn square_count(&self) -> usize {
        self.entries.len() * Outcome::ALL.len()
    }
}

/// The six battleground entries the board ships with.
pub fn battleground_states() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Arizona", 11, 1.2, 1.8),
        CatalogEntry::new("Georgia", 16, 1.3, 1.7),
        CatalogEntry::new("Michigan", 16, 1.4, 1.6),
        CatalogEntry::new("Nevada", 6, 1.5, 1.5),
        CatalogEntry::new("Pennsylvania", 20, 1.3, 1.7),
        CatalogEntry::new("Wisconsin", 10, 1.4, 1.6),
    ]
}

//! Committed claims, keyed by square.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::board::ParticipantDraft;
use crate::catalog::Catalog;
use crate::error::{BoardError, ConfigError};
use crate::square::{Outcome, SquareId};

/// A participant bound to one square. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub entry_name: String,
    pub outcome: Outcome,
    pub name: String,
    pub email: String,
    /// ISO 8601 timestamp string, UTC with millisecond precision.
    #[serde(rename = "timestampIso8601")]
    pub timestamp: String,
}

impl ClaimRecord {
    pub fn new(square: &SquareId, draft: &ParticipantDraft, now: DateTime<Utc>) -> Self {
        Self {
            entry_name: square.entry.clone(),
            outcome: square.outcome,
            name: draft.name.clone(),
            email: draft.email.clone(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn square(&self) -> SquareId {
        SquareId::new(self.entry_name.clone(), self.outcome)
    }
}

/// Mapping from square to claim. A square holds at most one record.
///
/// Enumeration follows first-insert order; overwriting a square keeps its
/// original position.
#[derive(Debug, Clone, Default)]
pub struct ClaimStore {
    records: HashMap<SquareId, ClaimRecord>,
    order: Vec<SquareId>,
}

impl ClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from saved records, checking each against the catalog.
    pub fn restore(records: Vec<ClaimRecord>, catalog: &Catalog) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        for record in records {
            let square = record.square();
            if !catalog.contains(&square.entry) {
                return Err(ConfigError::UnknownClaimEntry(square));
            }
            if store.is_claimed(&square) {
                return Err(ConfigError::DuplicateClaimRecord(square));
            }
            store.insert(square, record);
        }
        Ok(store)
    }

    pub fn is_claimed(&self, square: &SquareId) -> bool {
        self.records.contains_key(square)
    }

    pub fn claim_for(&self, square: &SquareId) -> Option<&ClaimRecord> {
        self.records.get(square)
    }

    /// Record a claim, replacing any earlier claim on the same square.
    pub fn commit(
        &mut self,
        square: &SquareId,
        draft: &ParticipantDraft,
        now: DateTime<Utc>,
    ) -> ClaimRecord {
        let record = ClaimRecord::new(square, draft, now);
        self.insert(square.clone(), record.clone());
        record
    }

    /// Record a claim only if the square is still free.
    pub fn try_commit(
        &mut self,
        square: &SquareId,
        draft: &ParticipantDraft,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, BoardError> {
        if let Some(existing) = self.records.get(square) {
            return Err(BoardError::DuplicateClaim {
                square: square.clone(),
                claimant: existing.name.clone(),
            });
        }
        Ok(self.commit(square, draft, now))
    }

    /// Claims in insertion order.
    pub fn all_claims(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.order.iter().filter_map(|sq| self.records.get(sq))
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    fn insert(&mut self, square: SquareId, record: ClaimRecord) {
        if self.records.insert(square.clone(), record).is_none() {
            self.order.push(square);
        }
    }
}

//! Selection and commit state machine.
//!
//! A [`Board`] owns the catalog, the claim store, the pending selection and
//! the participant draft for a single viewer. The only transition that
//! writes to the claim store is [`Board::submit`].
//!
//! ```text
//! Idle --select(unclaimed)--> Selected(sq)
//! Selected(sq) --select(other unclaimed)--> Selected(other)
//! Selected(sq) --submit(name, email non-empty)--> Idle   (claim recorded)
//! Selected(sq) --cancel--> Idle
//! ```
//!
//! Square status is never stored; [`Board::square_status`] and
//! [`Board::board_rows`] derive it from the sources on every call.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::claims::{ClaimRecord, ClaimStore};
use crate::config::{BoardConfig, DuplicatePolicy};
use crate::error::{BoardError, ConfigError};
use crate::square::{Outcome, SquareId};

/// Free-form participant identity, edited field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub email: String,
}

/// Projected state of one square. Exactly one holds at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareStatus {
    Claimed { name: String },
    Pending,
    Available,
}

impl SquareStatus {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, SquareStatus::Claimed { .. })
    }
}

/// One catalog entry with both of its squares projected.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow<'a> {
    pub entry: &'a CatalogEntry,
    pub blue: SquareStatus,
    pub red: SquareStatus,
}

impl BoardRow<'_> {
    pub fn status(&self, outcome: Outcome) -> &SquareStatus {
        match outcome {
            Outcome::Blue => &self.blue,
            Outcome::Red => &self.red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    title: String,
    unit_price: u64,
    currency: String,
    policy: DuplicatePolicy,
    catalog: Catalog,
    claims: ClaimStore,
    pending: Option<SquareId>,
    draft: ParticipantDraft,
}

impl Board {
    /// Build an empty board from a config. The config is validated first.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::with_claims(config, Vec::new())
    }

    /// Build a board whose claim store starts with `claims`.
    pub fn with_claims(config: BoardConfig, claims: Vec<ClaimRecord>) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = Catalog::new(config.catalog);
        let claims = ClaimStore::restore(claims, &catalog)?;
        info!(
            entries = catalog.len(),
            claims = claims.total_count(),
            unit_price = config.unit_price,
            "board ready"
        );
        Ok(Self {
            title: config.title,
            unit_price: config.unit_price,
            currency: config.currency,
            policy: config.duplicate_policy,
            catalog,
            claims,
            pending: None,
            draft: ParticipantDraft::default(),
        })
    }

    // ── Catalog ──

    pub fn list_entries(&self) -> &[CatalogEntry] {
        self.catalog.list_entries()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    // ── Inputs ──

    /// Make `(entry, outcome)` the pending selection.
    ///
    /// Claimed squares and names outside the catalog are refused and leave the
    /// current selection in place.
    pub fn select_square(&mut self, entry: &str, outcome: Outcome) -> Result<(), BoardError> {
        if !self.catalog.contains(entry) {
            return Err(BoardError::UnknownEntry(entry.to_string()));
        }
        let square = SquareId::new(entry, outcome);
        if let Some(claim) = self.claims.claim_for(&square) {
            debug!(%square, claimant = %claim.name, "selection refused, square claimed");
            return Err(BoardError::SquareClaimed {
                square,
                claimant: claim.name.clone(),
            });
        }
        debug!(%square, previous = ?self.pending.as_ref().map(|s| s.to_string()), "square selected");
        self.pending = Some(square);
        Ok(())
    }

    /// Drop the pending selection, if any.
    pub fn clear_selection(&mut self) {
        if let Some(square) = self.pending.take() {
            debug!(%square, "selection cleared");
        }
    }

    pub fn set_participant_name(&mut self, text: impl Into<String>) {
        self.draft.name = text.into();
    }

    pub fn set_participant_email(&mut self, text: impl Into<String>) {
        self.draft.email = text.into();
    }

    pub fn reset_draft(&mut self) {
        self.draft = ParticipantDraft::default();
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.submit_target().is_ok()
    }

    /// Commit the pending selection stamped with the current time.
    pub fn submit(&mut self) -> Result<ClaimRecord, BoardError> {
        self.submit_at(Utc::now())
    }

    /// Commit the pending selection with the participant draft.
    ///
    /// On success the selection and the draft are cleared. On any error the
    /// board is left exactly as it was.
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> Result<ClaimRecord, BoardError> {
        let square = self.submit_target()?.clone();

        let record = match self.policy {
            DuplicatePolicy::Overwrite => {
                if let Some(prev) = self.claims.claim_for(&square) {
                    warn!(%square, previous = %prev.name, "overwriting existing claim");
                }
                self.claims.commit(&square, &self.draft, now)
            }
            DuplicatePolicy::Reject => match self.claims.try_commit(&square, &self.draft, now) {
                Ok(record) => record,
                Err(e) => {
                    warn!(%square, error = %e, "claim rejected");
                    return Err(e);
                }
            },
        };

        info!(%square, name = %record.name, total = self.claims.total_count(), "claim committed");
        self.pending = None;
        self.reset_draft();
        Ok(record)
    }

    /// Replace the claim store with `claims`, e.g. after another session
    /// saved its own. The pending selection is kept; if it is now claimed,
    /// the next submit is subject to the duplicate policy.
    pub fn reload_claims(&mut self, claims: Vec<ClaimRecord>) -> Result<(), ConfigError> {
        self.claims = ClaimStore::restore(claims, &self.catalog)?;
        debug!(claims = self.claims.total_count(), "claims reloaded");
        Ok(())
    }

    fn submit_target(&self) -> Result<&SquareId, BoardError> {
        let square = self.pending.as_ref().ok_or(BoardError::NothingSelected)?;
        if self.draft.name.is_empty() {
            return Err(BoardError::MissingName);
        }
        if self.draft.email.is_empty() {
            return Err(BoardError::MissingEmail);
        }
        Ok(square)
    }

    // ── Outputs ──

    pub fn pending_selection(&self) -> Option<&SquareId> {
        self.pending.as_ref()
    }

    pub fn draft(&self) -> &ParticipantDraft {
        &self.draft
    }

    pub fn is_claimed(&self, entry: &str, outcome: Outcome) -> bool {
        self.claims.is_claimed(&SquareId::new(entry, outcome))
    }

    pub fn claim_for(&self, entry: &str, outcome: Outcome) -> Option<&ClaimRecord> {
        self.claims.claim_for(&SquareId::new(entry, outcome))
    }

    /// Claimed beats pending: a square claimed elsewhere while selected here
    /// reports `Claimed`. Names outside the catalog report `Available`.
    pub fn square_status(&self, entry: &str, outcome: Outcome) -> SquareStatus {
        if let Some(claim) = self.claim_for(entry, outcome) {
            return SquareStatus::Claimed {
                name: claim.name.clone(),
            };
        }
        match &self.pending {
            Some(sq) if sq.is(entry, outcome) => SquareStatus::Pending,
            _ => SquareStatus::Available,
        }
    }

    /// Every catalog entry with both squares projected, in catalog order.
    pub fn board_rows(&self) -> Vec<BoardRow<'_>> {
        self.catalog
            .list_entries()
            .iter()
            .map(|entry| BoardRow {
                entry,
                blue: self.square_status(&entry.name, Outcome::Blue),
                red: self.square_status(&entry.name, Outcome::Red),
            })
            .collect()
    }

    pub fn claims(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.claims.all_claims()
    }

    pub fn total_count(&self) -> usize {
        self.claims.total_count()
    }

    /// `total_count × unit_price`. Cannot overflow: a validated config bounds
    /// the unit price by the square count, and claims never exceed it.
    pub fn pool_total(&self) -> u64 {
        self.claims.total_count() as u64 * self.unit_price
    }
}

//! Board configuration: the catalog, the per-square unit price, and the
//! duplicate-claim policy. Passed into [`Board::new`](crate::Board::new) so the
//! state machine can run against synthetic catalogs in tests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, battleground_states};
use crate::error::ConfigError;
use crate::square::Outcome;

pub const DEFAULT_UNIT_PRICE: u64 = 5;

/// What `submit` does when the pending square already has a claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`BoardError::DuplicateClaim`](crate::BoardError::DuplicateClaim).
    #[default]
    Reject,
    /// Replace the earlier claimant (last write wins).
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub title: String,
    /// Price of one square in whole currency units.
    pub unit_price: u64,
    pub currency: String,
    pub duplicate_policy: DuplicatePolicy,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Battleground States Pool Board".to_string(),
            unit_price: DEFAULT_UNIT_PRICE,
            currency: "$".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            catalog: battleground_states(),
        }
    }
}

impl BoardConfig {
    /// Config with the given catalog and every other field defaulted.
    pub fn with_catalog(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Parse a JSON config. Missing fields take their defaults; the result is
    /// not yet validated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_price == 0 {
            return Err(ConfigError::ZeroUnitPrice);
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        // Claims never exceed two per entry, so this bounds every pool total.
        let squares = self.catalog.len() * Outcome::ALL.len();
        if self.unit_price.checked_mul(squares as u64).is_none() {
            return Err(ConfigError::UnitPriceTooLarge {
                unit_price: self.unit_price,
                squares,
            });
        }

        let mut seen = HashSet::with_capacity(self.catalog.len());
        for (index, entry) in self.catalog.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::EmptyEntryName { index });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateEntry(entry.name.clone()));
            }
            if entry.weight == 0 {
                return Err(ConfigError::ZeroWeight(entry.name.clone()));
            }
            for outcome in Outcome::ALL {
                let price = entry.price(outcome);
                if !price.is_finite() || price <= 0.0 {
                    return Err(ConfigError::InvalidPrice {
                        name: entry.name.clone(),
                        outcome,
                        price,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.unit_price, 5);
        assert_eq!(config.catalog.len(), 6);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config = BoardConfig::from_json_str(r#"{"unitPrice": 10}"#).unwrap();
        assert_eq!(config.unit_price, 10);
        assert_eq!(config.currency, "$");
        assert_eq!(config.catalog.len(), 6);
    }

    #[test]
    fn json_catalog_and_policy() {
        let config = BoardConfig::from_json_str(
            r#"{
                "duplicatePolicy": "overwrite",
                "catalog": [{"name": "Ohio", "weight": 17, "priceBlue": 2.0, "priceRed": 1.1}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
        assert_eq!(config.catalog, vec![CatalogEntry::new("Ohio", 17, 2.0, 1.1)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = BoardConfig::from_json_str("{unitPrice").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_empty_catalog() {
        let config = BoardConfig::with_catalog(vec![]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn rejects_zero_unit_price() {
        let config = BoardConfig {
            unit_price: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroUnitPrice)));
    }

    #[test]
    fn rejects_unit_price_that_overflows_pool_total() {
        let config = BoardConfig {
            unit_price: 10_000_000_000_000_000_000,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnitPriceTooLarge { squares: 12, .. })
        ));

        // Largest price whose full-board total still fits.
        let config = BoardConfig {
            unit_price: u64::MAX / 12,
            ..BoardConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_keeps_source_error() {
        let err = BoardConfig::from_json_str(r#"{"unitPrice": "five"}"#).unwrap_err();
        let ConfigError::Json(source) = &err else {
            panic!("expected json error, got {err:?}");
        };
        assert!(source.is_data());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rejects_duplicate_names() {
        let config = BoardConfig::with_catalog(vec![
            CatalogEntry::new("Nevada", 6, 1.5, 1.5),
            CatalogEntry::new("Nevada", 6, 1.5, 1.5),
        ]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateEntry(ref n)) if n == "Nevada"
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let config = BoardConfig::with_catalog(vec![
            CatalogEntry::new("Nevada", 6, 1.5, 1.5),
            CatalogEntry::new("  ", 6, 1.5, 1.5),
        ]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyEntryName { index: 1 })
        ));
    }

    #[test]
    fn rejects_zero_weight() {
        let config = BoardConfig::with_catalog(vec![CatalogEntry::new("Nevada", 0, 1.5, 1.5)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroWeight(ref n)) if n == "Nevada"
        ));
    }

    #[test]
    fn rejects_bad_prices() {
        let config = BoardConfig::with_catalog(vec![CatalogEntry::new("Nevada", 6, 1.5, 0.0)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrice { outcome: Outcome::Red, .. })
        ));

        let config =
            BoardConfig::with_catalog(vec![CatalogEntry::new("Nevada", 6, f64::NAN, 1.5)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrice { outcome: Outcome::Blue, .. })
        ));
    }
}

//! Pricing catalog: service categories, extras and discount rules.
//!
//! The catalog is immutable reference data. It is loaded once at startup,
//! validated, and shared read-only between the live pricing endpoint and the
//! booking submission flow so both price a selection against the same tables.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculators::round_money;

/// A cleaning service with base prices keyed by bedroom count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub base_prices: BTreeMap<u32, Decimal>,
}

impl ServiceCategory {
    pub fn base_price(&self, bedrooms: u32) -> Option<Decimal> {
        self.base_prices.get(&bedrooms).copied()
    }
}

/// An optional add-on priced per unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraServiceItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

/// How much a discount rule takes off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the original subtotal, 0-100
    Percentage(Decimal),
    /// Fixed amount off
    Fixed(Decimal),
}

impl Discount {
    /// Amount this discount takes off `subtotal`, rounded to cents.
    pub fn amount_off(&self, subtotal: Decimal) -> Decimal {
        match self {
            Discount::Percentage(percent) => round_money(subtotal * *percent / dec!(100), 2),
            Discount::Fixed(amount) => *amount,
        }
    }
}

/// Discount applied when the customer opts into the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleDiscount {
    pub id: String,
    pub name: String,
    pub discount: Discount,
    /// Categories the bundle can be combined with. Empty means all.
    #[serde(default)]
    pub eligible_categories: Vec<String>,
    #[serde(default)]
    pub min_subtotal: Option<Decimal>,
}

impl BundleDiscount {
    pub fn is_eligible(&self, category_id: &str, subtotal: Decimal) -> bool {
        let category_ok = self.eligible_categories.is_empty()
            || self.eligible_categories.iter().any(|c| c == category_id);
        let subtotal_ok = self.min_subtotal.map_or(true, |min| subtotal >= min);
        category_ok && subtotal_ok
    }
}

/// Site-wide promotion applied to every selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub discount: Discount,
}

/// Full pricing catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_currency")]
    pub currency: String,
    pub categories: Vec<ServiceCategory>,
    pub extras: Vec<ExtraServiceItem>,
    pub bundle: BundleDiscount,
    #[serde(default)]
    pub promotion: Option<Promotion>,
}

fn default_currency() -> String {
    "AUD".to_string()
}

/// Reasons a catalog is rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no service categories")]
    NoCategories,

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("service category '{0}' has no base prices")]
    EmptyPriceTable(String),

    #[error("negative price for '{0}'")]
    NegativePrice(String),

    #[error("discount '{0}' must be a percentage between 0 and 100 or a non-negative amount")]
    InvalidDiscount(String),
}

impl Catalog {
    /// Load the catalog from a JSON file, or fall back to the built-in one.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let catalog = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog {}", path.display()))?;
                serde_json::from_str::<Catalog>(&raw)
                    .with_context(|| format!("Failed to parse catalog {}", path.display()))?
            }
            None => Catalog::default(),
        };

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn category(&self, id: &str) -> Option<&ServiceCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn extra(&self, id: &str) -> Option<&ExtraServiceItem> {
        self.extras.iter().find(|e| e.id == id)
    }

    /// Check the invariants the calculator relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "category",
                    id: category.id.clone(),
                });
            }
            if category.base_prices.is_empty() {
                return Err(CatalogError::EmptyPriceTable(category.id.clone()));
            }
            if category.base_prices.values().any(|p| p.is_sign_negative()) {
                return Err(CatalogError::NegativePrice(category.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for extra in &self.extras {
            if !seen.insert(extra.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "extra",
                    id: extra.id.clone(),
                });
            }
            if extra.unit_price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(extra.id.clone()));
            }
        }

        check_discount(&self.bundle.id, &self.bundle.discount)?;
        if let Some(promotion) = &self.promotion {
            check_discount(&promotion.id, &promotion.discount)?;
        }

        Ok(())
    }
}

fn check_discount(id: &str, discount: &Discount) -> Result<(), CatalogError> {
    let valid = match discount {
        Discount::Percentage(p) => *p >= Decimal::ZERO && *p <= dec!(100),
        Discount::Fixed(amount) => !amount.is_sign_negative(),
    };
    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidDiscount(id.to_string()))
    }
}

fn category(id: &str, name: &str, prices: [(u32, Decimal); 5]) -> ServiceCategory {
    ServiceCategory {
        id: id.to_string(),
        name: name.to_string(),
        base_prices: prices.into_iter().collect(),
    }
}

fn extra(id: &str, name: &str, unit_price: Decimal, max_quantity: u32) -> ExtraServiceItem {
    ExtraServiceItem {
        id: id.to_string(),
        name: name.to_string(),
        unit_price,
        max_quantity: Some(max_quantity),
    }
}

impl Default for Catalog {
    /// Current Fresh Plus price list
    fn default() -> Self {
        Self {
            currency: default_currency(),
            categories: vec![
                category(
                    "residential",
                    "Residential Cleaning",
                    [(1, dec!(120)), (2, dec!(135)), (3, dec!(150)), (4, dec!(180)), (5, dec!(210))],
                ),
                category(
                    "end-of-lease",
                    "End of Lease Cleaning",
                    [(1, dec!(260)), (2, dec!(330)), (3, dec!(400)), (4, dec!(480)), (5, dec!(560))],
                ),
                category(
                    "deep-clean",
                    "Deep Cleaning",
                    [(1, dec!(190)), (2, dec!(230)), (3, dec!(270)), (4, dec!(320)), (5, dec!(370))],
                ),
            ],
            extras: vec![
                extra("oven-clean", "Oven Cleaning", dec!(40), 2),
                extra("fridge-clean", "Fridge Cleaning", dec!(35), 2),
                extra("interior-windows", "Interior Windows (per window)", dec!(8), 30),
                extra("balcony", "Balcony Cleaning", dec!(30), 3),
                extra("wall-wash", "Wall Washing (per room)", dec!(25), 10),
                extra("carpet-steam", "Carpet Steam Clean (per room)", dec!(45), 8),
                extra("blinds", "Blind Cleaning (per blind)", dec!(12), 20),
                extra("garage", "Garage Sweep", dec!(50), 1),
            ],
            bundle: BundleDiscount {
                id: "bond-back-bundle".to_string(),
                name: "Bond Back Bundle".to_string(),
                discount: Discount::Percentage(dec!(10)),
                eligible_categories: Vec::new(),
                min_subtotal: None,
            },
            promotion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.currency, "AUD");
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::default();
        let residential = catalog.category("residential").unwrap();
        assert_eq!(residential.base_price(3), Some(dec!(150)));
        assert_eq!(residential.base_price(9), None);
        assert_eq!(catalog.extra("oven-clean").unwrap().unit_price, dec!(40));
        assert!(catalog.category("office").is_none());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut catalog = Catalog::default();
        let dup = catalog.categories[0].clone();
        catalog.categories.push(dup);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateId {
                kind: "category",
                id: "residential".to_string()
            })
        );
    }

    #[test]
    fn test_negative_extra_price_rejected() {
        let mut catalog = Catalog::default();
        catalog.extras[0].unit_price = dec!(-1);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::NegativePrice("oven-clean".to_string()))
        );
    }

    #[test]
    fn test_percentage_over_hundred_rejected() {
        let mut catalog = Catalog::default();
        catalog.bundle.discount = Discount::Percentage(dec!(120));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn test_empty_price_table_rejected() {
        let mut catalog = Catalog::default();
        catalog.categories[1].base_prices.clear();
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::EmptyPriceTable("end-of-lease".to_string()))
        );
    }

    #[test]
    fn test_bundle_eligibility() {
        let mut bundle = Catalog::default().bundle;
        assert!(bundle.is_eligible("residential", dec!(10)));

        bundle.eligible_categories = vec!["end-of-lease".to_string()];
        bundle.min_subtotal = Some(dec!(300));
        assert!(!bundle.is_eligible("residential", dec!(500)));
        assert!(!bundle.is_eligible("end-of-lease", dec!(299.99)));
        assert!(bundle.is_eligible("end-of-lease", dec!(300)));
    }

    #[test]
    fn test_discount_amount_off() {
        assert_eq!(Discount::Percentage(dec!(10)).amount_off(dec!(190)), dec!(19.00));
        assert_eq!(Discount::Percentage(dec!(15)).amount_off(dec!(33.33)), dec!(5.00));
        assert_eq!(Discount::Fixed(dec!(25)).amount_off(dec!(190)), dec!(25));
    }

    #[test]
    fn test_catalog_json_round_trip_through_load_format() {
        let json = serde_json::to_string(&Catalog::default()).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Catalog::default());
    }
}

//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::catalog::{Catalog, Discount};
use super::models::{AppliedDiscount, LineKind, PriceLine, PricingResult};

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceLineResponse {
    pub kind: LineKind,
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: MoneyResponse,
    pub amount: MoneyResponse,
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub id: String,
    pub name: String,
    pub amount: MoneyResponse,
}

/// Response for an instant quote
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub lines: Vec<PriceLineResponse>,
    pub discounts: Vec<DiscountResponse>,
    pub original_total: MoneyResponse,
    pub total_savings: MoneyResponse,
    pub total: MoneyResponse,
}

impl PricingResponse {
    pub fn from_result(result: &PricingResult, currency: &str) -> Self {
        Self {
            lines: result
                .lines
                .iter()
                .map(|line: &PriceLine| PriceLineResponse {
                    kind: line.kind,
                    id: line.id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: MoneyResponse::new(line.unit_price, currency),
                    amount: MoneyResponse::new(line.amount, currency),
                })
                .collect(),
            discounts: result
                .discounts
                .iter()
                .map(|d: &AppliedDiscount| DiscountResponse {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    amount: MoneyResponse::new(d.amount, currency),
                })
                .collect(),
            original_total: MoneyResponse::new(result.original_total, currency),
            total_savings: MoneyResponse::new(result.total_savings, currency),
            total: MoneyResponse::new(result.total, currency),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    /// Bedroom count -> base price
    pub base_prices: Vec<(u32, MoneyResponse)>,
}

#[derive(Debug, Serialize)]
pub struct ExtraResponse {
    pub id: String,
    pub name: String,
    pub unit_price: MoneyResponse,
    pub max_quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DiscountRuleResponse {
    pub id: String,
    pub name: String,
    pub discount: Discount,
}

/// Catalog as shown to the intake form
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub currency: String,
    pub categories: Vec<CategoryResponse>,
    pub extras: Vec<ExtraResponse>,
    pub bundle: DiscountRuleResponse,
    pub promotion: Option<DiscountRuleResponse>,
}

impl From<&Catalog> for CatalogResponse {
    fn from(catalog: &Catalog) -> Self {
        let currency = catalog.currency.as_str();
        Self {
            currency: catalog.currency.clone(),
            categories: catalog
                .categories
                .iter()
                .map(|c| CategoryResponse {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    base_prices: c
                        .base_prices
                        .iter()
                        .map(|(&bedrooms, &price)| (bedrooms, MoneyResponse::new(price, currency)))
                        .collect(),
                })
                .collect(),
            extras: catalog
                .extras
                .iter()
                .map(|e| ExtraResponse {
                    id: e.id.clone(),
                    name: e.name.clone(),
                    unit_price: MoneyResponse::new(e.unit_price, currency),
                    max_quantity: e.max_quantity,
                })
                .collect(),
            bundle: DiscountRuleResponse {
                id: catalog.bundle.id.clone(),
                name: catalog.bundle.name.clone(),
                discount: catalog.bundle.discount,
            },
            promotion: catalog.promotion.as_ref().map(|p| DiscountRuleResponse {
                id: p.id.clone(),
                name: p.name.clone(),
                discount: p.discount,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::calculate_total_price;
    use crate::pricing::models::QuoteSelection;

    #[test]
    fn test_pricing_response_serializes_money_as_strings() {
        let catalog = Catalog::default();
        let selection = QuoteSelection {
            service: "residential".to_string(),
            bedrooms: 3,
            bundle_selected: true,
            extras: [("oven-clean".to_string(), 1)].into_iter().collect(),
            ..Default::default()
        };
        let result = calculate_total_price(&selection, &catalog).unwrap();

        let json = serde_json::to_value(PricingResponse::from_result(&result, "AUD")).unwrap();

        assert_eq!(json["original_total"]["amount"], "190.00");
        assert_eq!(json["total_savings"]["amount"], "19.00");
        assert_eq!(json["total"]["amount"], "171.00");
        assert_eq!(json["total"]["currency"], "AUD");
        assert_eq!(json["lines"][1]["kind"], "extra");
    }

    #[test]
    fn test_catalog_response_lists_every_category() {
        let catalog = Catalog::default();
        let response = CatalogResponse::from(&catalog);
        assert_eq!(response.categories.len(), catalog.categories.len());
        assert_eq!(response.extras.len(), catalog.extras.len());
        assert!(response.promotion.is_none());
    }
}

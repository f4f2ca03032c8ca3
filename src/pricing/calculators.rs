//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no logging.
//! The same function prices the live on-screen quote and the amount stored
//! with a booking, so both always agree.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::catalog::{Catalog, ExtraServiceItem, ServiceCategory};
use super::errors::{PricingError, SelectionIssue};
use super::models::{AppliedDiscount, LineKind, PriceLine, PricingResult, QuoteSelection};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use freshplus_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Round to cents and fix the scale at 2 so amounts serialize as "190.00".
fn to_cents(amount: Decimal) -> Decimal {
    let mut cents = round_money(amount, 2);
    cents.rescale(2);
    cents
}

/// Calculate the itemized, discount-applied price of a selection.
///
/// 1. Base price for the category's bedroom tier
/// 2. Plus unit price x quantity for every extra with quantity > 0
/// 3. Minus the bundle discount (when selected and eligible) and any promotion,
///    each computed on the original total
///
/// Selections that reference unknown ids, a missing bedroom tier, or negative
/// or over-cap quantities fail with [`PricingError::InvalidSelection`].
pub fn calculate_total_price(
    selection: &QuoteSelection,
    catalog: &Catalog,
) -> Result<PricingResult, PricingError> {
    let category = catalog
        .category(&selection.service)
        .ok_or_else(|| SelectionIssue::UnknownCategory(selection.service.clone()))?;

    let base_price = category
        .base_price(selection.bedrooms)
        .ok_or_else(|| SelectionIssue::MissingBedroomTier {
            category: category.id.clone(),
            bedrooms: selection.bedrooms,
        })?;

    let quantities = resolve_extras(&selection.extras, catalog)?;

    let mut lines = vec![base_line(category, selection.bedrooms, base_price)];
    lines.extend(catalog.extras.iter().filter_map(|item| {
        quantities
            .get(item.id.as_str())
            .filter(|&&quantity| quantity > 0)
            .map(|&quantity| extra_line(item, quantity))
    }));

    let original_total = to_cents(lines.iter().map(|line| line.amount).sum());

    let mut discounts = Vec::new();
    let mut remaining = original_total;

    if selection.bundle_selected && catalog.bundle.is_eligible(&category.id, original_total) {
        let amount = to_cents(catalog.bundle.discount.amount_off(original_total)).min(remaining);
        remaining -= amount;
        discounts.push(AppliedDiscount {
            id: catalog.bundle.id.clone(),
            name: catalog.bundle.name.clone(),
            amount,
        });
    }

    if let Some(promotion) = &catalog.promotion {
        let amount = to_cents(promotion.discount.amount_off(original_total)).min(remaining);
        discounts.push(AppliedDiscount {
            id: promotion.id.clone(),
            name: promotion.name.clone(),
            amount,
        });
    }

    let total_savings = to_cents(discounts.iter().map(|d| d.amount).sum());
    let total = to_cents((original_total - total_savings).max(Decimal::ZERO));

    Ok(PricingResult {
        lines,
        discounts,
        original_total,
        total_savings,
        total,
    })
}

/// Check every requested extra against the catalog.
///
/// Returns the validated quantities keyed by extra id.
fn resolve_extras<'a>(
    requested: &'a BTreeMap<String, i32>,
    catalog: &Catalog,
) -> Result<BTreeMap<&'a str, u32>, SelectionIssue> {
    requested
        .iter()
        .map(|(id, &quantity)| {
            let item = catalog
                .extra(id)
                .ok_or_else(|| SelectionIssue::UnknownExtra(id.clone()))?;
            Ok((id.as_str(), checked_quantity(item, quantity)?))
        })
        .collect()
}

fn checked_quantity(item: &ExtraServiceItem, requested: i32) -> Result<u32, SelectionIssue> {
    let quantity = u32::try_from(requested).map_err(|_| SelectionIssue::NegativeQuantity {
        extra: item.id.clone(),
        quantity: requested,
    })?;

    match item.max_quantity {
        Some(cap) if quantity > cap => Err(SelectionIssue::QuantityOverCap {
            extra: item.id.clone(),
            quantity,
            cap,
        }),
        _ => Ok(quantity),
    }
}

fn base_line(category: &ServiceCategory, bedrooms: u32, price: Decimal) -> PriceLine {
    PriceLine {
        kind: LineKind::Base,
        id: category.id.clone(),
        name: format!("{} ({} bedroom)", category.name, bedrooms),
        quantity: 1,
        unit_price: to_cents(price),
        amount: to_cents(price),
    }
}

fn extra_line(item: &ExtraServiceItem, quantity: u32) -> PriceLine {
    PriceLine {
        kind: LineKind::Extra,
        id: item.id.clone(),
        name: item.name.clone(),
        quantity,
        unit_price: to_cents(item.unit_price),
        amount: to_cents(item.unit_price * Decimal::from(quantity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::catalog::{Discount, Promotion};
    use rust_decimal_macros::dec;

    fn selection(service: &str, bedrooms: u32, extras: &[(&str, i32)]) -> QuoteSelection {
        QuoteSelection {
            service: service.to_string(),
            bedrooms,
            extras: extras.iter().map(|(id, q)| (id.to_string(), *q)).collect(),
            ..Default::default()
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.125), 2), dec!(2.12));
        assert_eq!(round_money(dec!(2.135), 2), dec!(2.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    #[test]
    fn test_to_cents_fixes_scale() {
        assert_eq!(to_cents(dec!(190)).to_string(), "190.00");
        assert_eq!(to_cents(dec!(17.1)).to_string(), "17.10");
    }

    // ==================== calculate_total_price tests ====================

    #[test]
    fn test_residential_three_bedroom_with_oven() {
        let catalog = Catalog::default();
        let sel = selection("residential", 3, &[("oven-clean", 1), ("fridge-clean", 0)]);

        let result = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(result.original_total, dec!(190));
        assert_eq!(result.total_savings, dec!(0));
        assert_eq!(result.total, dec!(190));
        assert!(result.discounts.is_empty());
    }

    #[test]
    fn test_bundle_takes_ten_percent() {
        let catalog = Catalog::default();
        let mut sel = selection("residential", 3, &[("oven-clean", 1), ("fridge-clean", 0)]);
        sel.bundle_selected = true;

        let result = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(result.original_total, dec!(190.00));
        assert_eq!(result.total_savings, dec!(19.00));
        assert_eq!(result.total, dec!(171.00));
        assert_eq!(result.discounts.len(), 1);
        assert_eq!(result.discounts[0].id, "bond-back-bundle");
    }

    #[test]
    fn test_zero_quantity_extra_not_itemized() {
        let catalog = Catalog::default();
        let sel = selection("residential", 3, &[("oven-clean", 1), ("fridge-clean", 0)]);

        let result = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].kind, LineKind::Base);
        assert_eq!(result.lines[1].id, "oven-clean");
        assert!(result.lines.iter().all(|l| l.id != "fridge-clean"));
    }

    #[test]
    fn test_no_extras_no_bundle_equals_base_price() {
        let catalog = Catalog::default();
        for category in &catalog.categories {
            for (&bedrooms, &price) in &category.base_prices {
                let sel = selection(&category.id, bedrooms, &[("oven-clean", 0)]);
                let result = calculate_total_price(&sel, &catalog).unwrap();
                assert_eq!(result.total, price);
                assert_eq!(result.original_total, price);
            }
        }
    }

    #[test]
    fn test_lines_follow_catalog_order() {
        let catalog = Catalog::default();
        let sel = selection(
            "end-of-lease",
            2,
            &[("garage", 1), ("balcony", 2), ("oven-clean", 1)],
        );

        let result = calculate_total_price(&sel, &catalog).unwrap();
        let ids: Vec<&str> = result.lines.iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, vec!["end-of-lease", "oven-clean", "balcony", "garage"]);
        // 330 + 40 + 60 + 50
        assert_eq!(result.original_total, dec!(480));
        assert_eq!(result.lines[2].amount, dec!(60));
    }

    #[test]
    fn test_unknown_category_fails() {
        let catalog = Catalog::default();
        let err = calculate_total_price(&selection("office", 3, &[]), &catalog).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidSelection(SelectionIssue::UnknownCategory("office".to_string()))
        );
    }

    #[test]
    fn test_missing_bedroom_tier_fails() {
        let catalog = Catalog::default();
        let err = calculate_total_price(&selection("residential", 0, &[]), &catalog).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidSelection(SelectionIssue::MissingBedroomTier { bedrooms: 0, .. })
        ));
    }

    #[test]
    fn test_negative_quantity_fails() {
        let catalog = Catalog::default();
        let sel = selection("residential", 2, &[("oven-clean", -1)]);
        let err = calculate_total_price(&sel, &catalog).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidSelection(SelectionIssue::NegativeQuantity { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_over_cap_quantity_fails() {
        let catalog = Catalog::default();
        let sel = selection("residential", 2, &[("garage", 2)]);
        let err = calculate_total_price(&sel, &catalog).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidSelection(SelectionIssue::QuantityOverCap {
                extra: "garage".to_string(),
                quantity: 2,
                cap: 1,
            })
        );
    }

    #[test]
    fn test_unknown_extra_fails_even_with_zero_quantity() {
        let catalog = Catalog::default();
        let sel = selection("residential", 2, &[("pool-clean", 0)]);
        assert!(calculate_total_price(&sel, &catalog).is_err());
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let catalog = Catalog::default();
        let mut sel = selection("deep-clean", 4, &[("interior-windows", 12), ("blinds", 3)]);
        sel.bundle_selected = true;

        let first = calculate_total_price(&sel, &catalog).unwrap();
        let second = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_more_of_an_extra_never_lowers_original_total() {
        let catalog = Catalog::default();
        for item in &catalog.extras {
            let cap = item.max_quantity.unwrap_or(10) as i32;
            let mut previous = Decimal::ZERO;
            for quantity in 0..=cap {
                let sel = selection("residential", 2, &[(item.id.as_str(), quantity)]);
                let result = calculate_total_price(&sel, &catalog).unwrap();
                assert!(result.original_total >= previous);
                previous = result.original_total;
            }
        }
    }

    #[test]
    fn test_total_is_original_minus_savings() {
        let mut catalog = Catalog::default();
        catalog.promotion = Some(Promotion {
            id: "spring".to_string(),
            name: "Spring Special".to_string(),
            discount: Discount::Percentage(dec!(5)),
        });

        for bundle_selected in [false, true] {
            let mut sel = selection("end-of-lease", 3, &[("carpet-steam", 3), ("wall-wash", 7)]);
            sel.bundle_selected = bundle_selected;
            let result = calculate_total_price(&sel, &catalog).unwrap();

            assert_eq!(result.total, result.original_total - result.total_savings);
            assert!(result.total >= Decimal::ZERO);
            assert!(result.total_savings >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_bundle_and_promotion_do_not_compound() {
        let mut catalog = Catalog::default();
        catalog.promotion = Some(Promotion {
            id: "spring".to_string(),
            name: "Spring Special".to_string(),
            discount: Discount::Percentage(dec!(5)),
        });
        let mut sel = selection("residential", 3, &[("oven-clean", 1)]);
        sel.bundle_selected = true;

        let result = calculate_total_price(&sel, &catalog).unwrap();

        // 10% + 5% of 190
        assert_eq!(result.total_savings, dec!(28.50));
        assert_eq!(result.total, dec!(161.50));
    }

    #[test]
    fn test_fixed_discount_larger_than_total_floors_at_zero() {
        let mut catalog = Catalog::default();
        catalog.bundle.discount = Discount::Fixed(dec!(500));
        let mut sel = selection("residential", 1, &[]);
        sel.bundle_selected = true;

        let result = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(result.original_total, dec!(120));
        assert_eq!(result.total_savings, dec!(120));
        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn test_ineligible_bundle_is_ignored() {
        let mut catalog = Catalog::default();
        catalog.bundle.eligible_categories = vec!["end-of-lease".to_string()];
        let mut sel = selection("residential", 3, &[]);
        sel.bundle_selected = true;

        let result = calculate_total_price(&sel, &catalog).unwrap();

        assert_eq!(result.total_savings, dec!(0));
        assert_eq!(result.total, dec!(150));
    }
}

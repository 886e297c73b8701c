//! Pricing Engine
//!
//! Computes per-line-item prices and the order total:
//! - validates selected options against the menu item's option groups
//! - applies the item's discount percentage to the base price only
//! - adds selected choice price deltas on top of the discounted base
//!
//! Uses rust_decimal for precision calculations. Prices are frozen into
//! line-item snapshots at order time; this module never mutates anything.

use crate::db::models::{MenuItem, SelectionType};
use rust_decimal::prelude::*;
use shared::order::{LineItemSnapshot, OrderItemInput, SelectedOptionSnapshot};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Pricing validation failure at order creation time
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("required option group {group_id} has no selection")]
    MissingRequiredOption { group_id: String },

    #[error("option group {group_id} does not exist on menu item {menu_item_id}")]
    UnknownOptionGroup {
        menu_item_id: String,
        group_id: String,
    },

    #[error("choice {choice_id} does not exist in option group {group_id}")]
    UnknownChoice { group_id: String, choice_id: String },

    #[error("option group {group_id} is single-selection but {selected} choices were selected")]
    TooManyChoices { group_id: String, selected: usize },
}

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// ==================== Line Item Pricing ====================

/// Price one line item against its menu item.
///
/// # Validation
/// - every `required` option group must be referenced by a selection
/// - every referenced group and choice must exist on the menu item
/// - a single-selection group accepts at most one choice
///
/// # Calculation
/// - `discounted_base = base - base * discount/100`, rounded to 2 decimal
///   places; a discount outside `(0, 100]` is ignored rather than rejected
/// - `unit_price = discounted_base + Σ(selected choice price deltas)`
/// - `line_total = unit_price * quantity`
pub fn price_line_item(
    menu_item: &MenuItem,
    input: &OrderItemInput,
) -> Result<LineItemSnapshot, PricingError> {
    // Required groups must all be selected
    for group in menu_item.option_groups.iter().filter(|g| g.required) {
        if !input.options.iter().any(|s| s.group_id == group.id) {
            return Err(PricingError::MissingRequiredOption {
                group_id: group.id.clone(),
            });
        }
    }

    // Resolve every selection against the menu item schema
    let mut selected = Vec::new();
    let mut options_delta = Decimal::ZERO;
    for selection in &input.options {
        let group = menu_item.option_group(&selection.group_id).ok_or_else(|| {
            PricingError::UnknownOptionGroup {
                menu_item_id: menu_item.id.clone(),
                group_id: selection.group_id.clone(),
            }
        })?;

        if group.selection == SelectionType::Single && selection.choice_ids.len() > 1 {
            return Err(PricingError::TooManyChoices {
                group_id: group.id.clone(),
                selected: selection.choice_ids.len(),
            });
        }

        for choice_id in &selection.choice_ids {
            let choice = group
                .choice(choice_id)
                .ok_or_else(|| PricingError::UnknownChoice {
                    group_id: group.id.clone(),
                    choice_id: choice_id.clone(),
                })?;
            options_delta += to_decimal(choice.price_delta);
            selected.push(SelectedOptionSnapshot {
                group_id: group.id.clone(),
                group_name: group.name.clone(),
                choice_id: choice.id.clone(),
                choice_name: choice.name.clone(),
                price_delta: choice.price_delta,
            });
        }
    }

    let base = to_decimal(menu_item.base_price);
    let discount = effective_discount(menu_item.discount_percent);
    let discounted_base = base - base * discount / Decimal::ONE_HUNDRED;
    let unit_price = to_decimal(to_f64(discounted_base)) + options_delta;
    let line_total = unit_price * Decimal::from(input.quantity);

    Ok(LineItemSnapshot {
        menu_item_id: menu_item.id.clone(),
        name: menu_item.name.clone(),
        quantity: input.quantity,
        discount_percent: if discount.is_zero() {
            0.0
        } else {
            menu_item.discount_percent
        },
        unit_price: to_f64(unit_price),
        line_total: to_f64(line_total),
        selected_options: selected,
    })
}

/// Discounts outside (0, 100] are a lenient no-op, not an error
fn effective_discount(percent: f64) -> Decimal {
    if percent > 0.0 && percent <= 100.0 {
        to_decimal(percent)
    } else {
        Decimal::ZERO
    }
}

// ==================== Order Total ====================

/// Sum of line totals, rounded to 2 decimal places
pub fn order_total(items: &[LineItemSnapshot]) -> f64 {
    let sum = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + to_decimal(item.line_total));
    to_f64(sum)
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OptionChoice, OptionGroup};
    use shared::order::OptionSelection;

    fn make_item(base_price: f64, discount_percent: f64) -> MenuItem {
        MenuItem {
            id: "item-1".to_string(),
            shop_id: "shop-1".to_string(),
            name: "Margherita".to_string(),
            base_price,
            discount_percent,
            option_groups: vec![],
            available: true,
        }
    }

    fn make_group(
        id: &str,
        selection: SelectionType,
        required: bool,
        choices: Vec<(&str, f64)>,
    ) -> OptionGroup {
        OptionGroup {
            id: id.to_string(),
            name: format!("Group {}", id),
            selection,
            required,
            choices: choices
                .into_iter()
                .map(|(cid, delta)| OptionChoice {
                    id: cid.to_string(),
                    name: format!("Choice {}", cid),
                    price_delta: delta,
                })
                .collect(),
        }
    }

    fn input(quantity: u32, options: Vec<OptionSelection>) -> OrderItemInput {
        OrderItemInput {
            menu_item_id: "item-1".to_string(),
            quantity,
            options,
        }
    }

    // ==================== Discount Tests ====================

    #[test]
    fn test_discount_applied_to_base() {
        // base 100 with 10% discount, qty 2 -> unit 90.00, line 180.00
        let item = make_item(100.0, 10.0);
        let line = price_line_item(&item, &input(2, vec![])).unwrap();
        assert_eq!(line.unit_price, 90.0);
        assert_eq!(line.line_total, 180.0);
        assert_eq!(line.discount_percent, 10.0);
    }

    #[test]
    fn test_discount_out_of_range_ignored() {
        // Lenient default: 0, negative and >100 all mean "no discount"
        for pct in [0.0, -5.0, 101.0, 250.0] {
            let item = make_item(50.0, pct);
            let line = price_line_item(&item, &input(1, vec![])).unwrap();
            assert_eq!(line.unit_price, 50.0, "discount {pct} should be ignored");
            assert_eq!(line.discount_percent, 0.0);
        }
    }

    #[test]
    fn test_full_discount_allowed() {
        // 100% is inside the window: base becomes free, options still charge
        let mut item = make_item(30.0, 100.0);
        item.option_groups = vec![make_group(
            "g1",
            SelectionType::Multiple,
            false,
            vec![("c1", 2.5)],
        )];
        let line = price_line_item(
            &item,
            &input(
                1,
                vec![OptionSelection {
                    group_id: "g1".to_string(),
                    choice_ids: vec!["c1".to_string()],
                }],
            ),
        )
        .unwrap();
        assert_eq!(line.unit_price, 2.5);
    }

    #[test]
    fn test_discount_rounded_to_cents() {
        // 33.33% of 9.99 -> 9.99 - 3.329... = 6.66 after rounding
        let item = make_item(9.99, 33.33);
        let line = price_line_item(&item, &input(1, vec![])).unwrap();
        assert_eq!(line.unit_price, 6.66);
    }

    // ==================== Option Validation Tests ====================

    #[test]
    fn test_option_deltas_added_after_discount() {
        // Discount applies to the base component only
        let mut item = make_item(100.0, 10.0);
        item.option_groups = vec![make_group(
            "size",
            SelectionType::Single,
            true,
            vec![("large", 5.0)],
        )];
        let line = price_line_item(
            &item,
            &input(
                1,
                vec![OptionSelection {
                    group_id: "size".to_string(),
                    choice_ids: vec!["large".to_string()],
                }],
            ),
        )
        .unwrap();
        // 90.00 discounted base + 5.00 delta, not 94.50
        assert_eq!(line.unit_price, 95.0);
        assert_eq!(line.selected_options.len(), 1);
        assert_eq!(line.selected_options[0].price_delta, 5.0);
    }

    #[test]
    fn test_missing_required_option() {
        let mut item = make_item(10.0, 0.0);
        item.option_groups = vec![make_group(
            "size",
            SelectionType::Single,
            true,
            vec![("s", 0.0), ("l", 2.0)],
        )];
        let err = price_line_item(&item, &input(1, vec![])).unwrap_err();
        assert_eq!(
            err,
            PricingError::MissingRequiredOption {
                group_id: "size".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_group_rejected() {
        let item = make_item(10.0, 0.0);
        let err = price_line_item(
            &item,
            &input(
                1,
                vec![OptionSelection {
                    group_id: "nope".to_string(),
                    choice_ids: vec!["c".to_string()],
                }],
            ),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::UnknownOptionGroup { .. }));
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let mut item = make_item(10.0, 0.0);
        item.option_groups = vec![make_group(
            "extras",
            SelectionType::Multiple,
            false,
            vec![("cheese", 1.0)],
        )];
        let err = price_line_item(
            &item,
            &input(
                1,
                vec![OptionSelection {
                    group_id: "extras".to_string(),
                    choice_ids: vec!["bacon".to_string()],
                }],
            ),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownChoice {
                group_id: "extras".to_string(),
                choice_id: "bacon".to_string()
            }
        );
    }

    #[test]
    fn test_single_selection_rejects_multiple_choices() {
        let mut item = make_item(10.0, 0.0);
        item.option_groups = vec![make_group(
            "size",
            SelectionType::Single,
            false,
            vec![("s", 0.0), ("l", 2.0)],
        )];
        let err = price_line_item(
            &item,
            &input(
                1,
                vec![OptionSelection {
                    group_id: "size".to_string(),
                    choice_ids: vec!["s".to_string(), "l".to_string()],
                }],
            ),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PricingError::TooManyChoices {
                group_id: "size".to_string(),
                selected: 2
            }
        );
    }

    // ==================== Order Total Tests ====================

    #[test]
    fn test_order_total_spec_scenario() {
        // 2 x (price 50, no discount) + 1 x (price 30, 20% discount)
        // = 100.00 + 24.00 = 124.00
        let a = price_line_item(&make_item(50.0, 0.0), &input(2, vec![])).unwrap();
        let b = price_line_item(&make_item(30.0, 20.0), &input(1, vec![])).unwrap();
        assert_eq!(a.line_total, 100.0);
        assert_eq!(b.line_total, 24.0);
        assert_eq!(order_total(&[a, b]), 124.0);
    }

    #[test]
    fn test_pricing_deterministic() {
        let item = make_item(13.37, 15.0);
        let first = price_line_item(&item, &input(3, vec![])).unwrap();
        for _ in 0..10 {
            let again = price_line_item(&item, &input(3, vec![])).unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(
            order_total(std::slice::from_ref(&first)),
            order_total(&[first])
        );
    }

    #[test]
    fn test_empty_order_total() {
        assert_eq!(order_total(&[]), 0.0);
    }
}

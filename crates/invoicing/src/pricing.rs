//! Pricing summary.
//!
//! A snapshot is a pure function of the rows and the adjustment fields.
//! `InvoiceDraft` recomputes it after every mutation, so the displayed totals
//! always match the current inputs.

use serde::{Deserialize, Serialize};

use billbook_core::Money;

use crate::ledger::LineItem;

/// Adjustment fields entered below the item table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustments {
    pub discount: Money,
    pub delivery_charge: Money,
    pub tax: Money,
    pub advance_payment: Money,
}

impl Adjustments {
    /// Build from raw form text; blank or non-numeric fields count as zero.
    pub fn from_inputs(discount: &str, delivery_charge: &str, tax: &str, advance_payment: &str) -> Self {
        Self {
            discount: Money::parse_lenient(discount),
            delivery_charge: Money::parse_lenient(delivery_charge),
            tax: Money::parse_lenient(tax),
            advance_payment: Money::parse_lenient(advance_payment),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_charge: Money,
    pub tax: Money,
    pub grand_total: Money,
    pub balance_amount: Money,
}

/// `subtotal = Σ qty × price`, `grand = subtotal − discount + delivery + tax`,
/// `balance = grand − advance`.
pub fn compute_snapshot(items: &[LineItem], adjustments: &Adjustments) -> PricingSnapshot {
    let subtotal: Money = items
        .iter()
        .map(|item| item.unit_price().times(item.quantity()))
        .sum();
    let grand_total = subtotal - adjustments.discount + adjustments.delivery_charge + adjustments.tax;
    let balance_amount = grand_total - adjustments.advance_payment;

    PricingSnapshot {
        subtotal,
        discount: adjustments.discount,
        delivery_charge: adjustments.delivery_charge,
        tax: adjustments.tax,
        grand_total,
        balance_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ItemInput;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(name: &str, qty: u32, price: Money) -> LineItem {
        LineItem::new(ItemInput::new(name, qty, price)).unwrap()
    }

    #[test]
    fn cake_with_delivery_and_advance() {
        let items = vec![item("Cake", 2, Money::new(dec!(10.00)))];
        let mut adjustments = Adjustments {
            delivery_charge: Money::new(dec!(5)),
            ..Adjustments::default()
        };

        let snapshot = compute_snapshot(&items, &adjustments);
        assert_eq!(snapshot.subtotal.to_string(), "$20.00");
        assert_eq!(snapshot.grand_total.to_string(), "$25.00");

        adjustments.advance_payment = Money::new(dec!(10));
        let snapshot = compute_snapshot(&items, &adjustments);
        assert_eq!(snapshot.balance_amount.to_string(), "$15.00");
    }

    #[test]
    fn empty_draft_is_all_zero() {
        assert_eq!(
            compute_snapshot(&[], &Adjustments::default()),
            PricingSnapshot::default()
        );
    }

    #[test]
    fn junk_adjustment_inputs_count_as_zero() {
        let adjustments = Adjustments::from_inputs("", "abc", "1.5", " ");
        assert_eq!(adjustments.discount, Money::ZERO);
        assert_eq!(adjustments.delivery_charge, Money::ZERO);
        assert_eq!(adjustments.tax, Money::new(dec!(1.5)));
        assert_eq!(adjustments.advance_payment, Money::ZERO);
    }

    #[test]
    fn precision_is_kept_until_display() {
        let items = vec![item("Slice", 3, Money::new(dec!(0.335)))];
        let snapshot = compute_snapshot(&items, &Adjustments::default());
        assert_eq!(snapshot.subtotal.amount(), dec!(1.005));
        assert_eq!(snapshot.subtotal.to_string(), "$1.01");
    }

    #[test]
    fn advance_larger_than_total_goes_negative() {
        let items = vec![item("Cupcake", 1, Money::new(dec!(4)))];
        let adjustments = Adjustments {
            advance_payment: Money::new(dec!(10)),
            ..Adjustments::default()
        };
        let snapshot = compute_snapshot(&items, &adjustments);
        assert_eq!(snapshot.balance_amount.to_string(), "-$6.00");
    }

    #[test]
    fn absurd_adjustment_inputs_cannot_overflow_the_summary() {
        let max = "79228162514264337593543950335";
        let snapshot = compute_snapshot(&[], &Adjustments::from_inputs("", max, max, ""));
        assert_eq!(snapshot, PricingSnapshot::default());

        let snapshot = compute_snapshot(&[], &Adjustments::from_inputs(&format!("-{max}"), "", "", max));
        assert_eq!(snapshot.grand_total, Money::ZERO);
    }

    #[test]
    fn extreme_amounts_saturate_instead_of_panicking() {
        let max = Money::new(rust_decimal::Decimal::MAX);
        let items = vec![item("Big order", u32::MAX, Money::MAX_INPUT); 3];
        let adjustments = Adjustments {
            discount: Money::new(rust_decimal::Decimal::MIN),
            delivery_charge: max,
            tax: max,
            advance_payment: Money::new(rust_decimal::Decimal::MIN),
        };

        let snapshot = compute_snapshot(&items, &adjustments);
        assert_eq!(snapshot.grand_total, max);
        assert_eq!(snapshot.balance_amount, max);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the snapshot identities hold for any non-negative inputs.
        #[test]
        fn snapshot_identities_hold(
            rows in prop::collection::vec((1u32..50, 0i64..500_000), 0..15),
            discount in 0i64..100_000,
            delivery in 0i64..100_000,
            tax in 0i64..100_000,
            advance in 0i64..100_000,
        ) {
            let items: Vec<LineItem> = rows
                .iter()
                .map(|(qty, cents)| item("row", *qty, Money::from_cents(*cents)))
                .collect();
            let adjustments = Adjustments {
                discount: Money::from_cents(discount),
                delivery_charge: Money::from_cents(delivery),
                tax: Money::from_cents(tax),
                advance_payment: Money::from_cents(advance),
            };

            let snapshot = compute_snapshot(&items, &adjustments);

            let expected_subtotal: i64 = rows.iter().map(|(q, c)| i64::from(*q) * c).sum();
            prop_assert_eq!(snapshot.subtotal, Money::from_cents(expected_subtotal));
            prop_assert_eq!(
                snapshot.grand_total,
                snapshot.subtotal - snapshot.discount + snapshot.delivery_charge + snapshot.tax
            );
            prop_assert_eq!(snapshot.balance_amount, snapshot.grand_total - adjustments.advance_payment);
        }
    }
}

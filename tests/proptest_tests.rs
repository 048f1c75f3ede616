use proptest::prelude::*;
use rust_decimal::Decimal;

use invoiceflow::document::{LineItem, LineItemBuilder, currencies};
use invoiceflow::totals::Totals;

/// Quantities up to 1000 and prices up to 100 000.00, expressed in cents so
/// every generated value is exactly representable.
fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((0u32..=1_000, 0i64..=10_000_000), 0..20).prop_map(|raw| {
        raw.into_iter()
            .map(|(quantity, cents)| {
                LineItemBuilder::new("Item", Decimal::from(quantity), Decimal::new(cents, 2))
                    .build()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn totals_obey_the_arithmetic_laws(items in items_strategy(), rate in 0u32..=100) {
        let rate = Decimal::from(rate);
        let totals = Totals::compute(&items, rate);

        let expected_subtotal: Decimal =
            items.iter().map(|i| i.quantity * i.unit_price).sum();
        prop_assert_eq!(totals.subtotal, expected_subtotal);
        prop_assert_eq!(totals.tax_amount, expected_subtotal * rate / Decimal::from(100));
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
    }

    #[test]
    fn zero_rate_means_total_equals_subtotal(items in items_strategy()) {
        let totals = Totals::compute(&items, Decimal::ZERO);
        prop_assert_eq!(totals.tax_amount, Decimal::ZERO);
        prop_assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn item_order_never_changes_the_totals(items in items_strategy()) {
        let forward = Totals::compute(&items, Decimal::from(10));
        let mut reversed = items;
        reversed.reverse();
        prop_assert_eq!(forward, Totals::compute(&reversed, Decimal::from(10)));
    }

    #[test]
    fn formatted_amounts_always_carry_two_decimals(cents in -10_000_000i64..=10_000_000) {
        let formatted = currencies::format_amount("USD", Decimal::new(cents, 2));
        let (_, frac) = formatted.rsplit_once('.').unwrap();
        prop_assert_eq!(frac.len(), 2);
        prop_assert!(frac.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(formatted.starts_with('-'), cents < 0);
    }
}

//! Derived totals: the subtotal/tax/total triple for a document.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::document::LineItem;

/// The derived subtotal/tax/total triple. All values are exact and
/// unrounded; display formatting is the render surface's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub const ZERO: Totals = Totals {
        subtotal: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Pure derivation from line items and a flat tax percentage:
    ///
    /// ```text
    /// subtotal = Σ quantity × unit_price
    /// tax      = subtotal × rate / 100
    /// total    = subtotal + tax
    /// ```
    ///
    /// Every consumer — the explicit recalculate action and the reactive
    /// live preview — runs this one function, so the two always agree
    /// bit for bit.
    pub fn compute(items: &[LineItem], tax_rate_percent: Decimal) -> Totals {
        let subtotal: Decimal = items
            .iter()
            .map(|item| item.quantity * item.unit_price)
            .sum();
        let tax_amount = subtotal * tax_rate_percent / dec!(100);
        Totals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        }
    }
}

impl Default for Totals {
    fn default() -> Self {
        Self::ZERO
    }
}

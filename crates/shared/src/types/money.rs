//! Fixed-point rendering of monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay `rust_decimal::Decimal` end to end and are rendered as
//! two-decimal strings only at the API boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders an amount as a two-decimal string (`"1234.50"`).
///
/// Rounds half away from zero and never renders a negative zero.
#[must_use]
pub fn to_fixed(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Renders an optional amount, treating absence as zero.
#[must_use]
pub fn to_fixed_opt(amount: Option<Decimal>) -> String {
    to_fixed(amount.unwrap_or(Decimal::ZERO))
}

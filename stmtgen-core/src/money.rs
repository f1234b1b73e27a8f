//! Currency helpers. Every amount is a `Decimal` rounded to whole cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole number of cents in `value` after rounding.
pub fn to_cents(value: Decimal) -> i128 {
    let mut rounded = round_cents(value);
    rounded.rescale(2);
    rounded.mantissa()
}

pub fn from_cents(cents: i128) -> Decimal {
    Decimal::from_i128_with_scale(cents, 2)
}

//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculation
//! components, including rounding and clamped subtraction.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Calculations keep full precision; this is for presenting money amounts.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Subtracts `amount` from `value`, flooring the result at zero.
///
/// Chained calls clamp after every step, so a large deduction cannot push an
/// intermediate value below zero and be recovered by a later term.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::subtract_floored;
///
/// assert_eq!(subtract_floored(dec!(100), dec!(30)), dec!(70));
/// assert_eq!(subtract_floored(dec!(100), dec!(130)), dec!(0));
/// ```
pub fn subtract_floored(
    value: Decimal,
    amount: Decimal,
) -> Decimal {
    max(value - amount, Decimal::ZERO)
}

/// Rounds `value` up to the next multiple of `step` unless it already is one.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_up_to_multiple;
///
/// assert_eq!(round_up_to_multiple(dec!(3501), dec!(10)), dec!(3510));
/// assert_eq!(round_up_to_multiple(dec!(3500), dec!(10)), dec!(3500));
/// ```
pub fn round_up_to_multiple(
    value: Decimal,
    step: Decimal,
) -> Decimal {
    if (value % step).is_zero() {
        value
    } else {
        (value / step).ceil() * step
    }
}

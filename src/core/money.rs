//! Conversions applied when an amount leaves the ledger, plus the checked
//! addition used while accumulating. Accumulation always happens on unrounded
//! decimals. The rounding helpers are only called on final values.

use crate::core::errors::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are displayed with.
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds to [`DISPLAY_SCALE`] places using banker's rounding.
pub fn round_half_even(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Renders an amount with exactly [`DISPLAY_SCALE`] decimals, e.g. `"5.00"`.
pub fn format_fixed(amount: Decimal) -> String {
    let mut rounded = round_half_even(amount);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}

/// Integer part of an amount, truncated toward zero.
pub fn truncate_units(amount: Decimal) -> Result<i64, LedgerError> {
    amount.trunc().to_i64().ok_or(LedgerError::AmountOutOfRange(amount))
}

/// Adds two amounts, reporting overflow as [`LedgerError::AmountOutOfRange`]
/// instead of panicking.
pub fn checked_add(total: Decimal, delta: Decimal) -> Result<Decimal, LedgerError> {
    total.checked_add(delta).ok_or(LedgerError::AmountOutOfRange(delta))
}

//! Currency conversion logic.
//!
//! Stored amounts are currency-agnostic. Reports display them in the currency
//! selected by symbol, using a fixed multiplier (not a live exchange rate).
//!
//! CRITICAL: Rounding happens to 2 decimal places with an explicit
//! `RoundingMode`, never through string formatting.

use cashflow_shared::RoundingMode;
use rust_decimal::Decimal;

/// Decimal places shown for every report amount.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

const BRL_MULTIPLIER: Decimal = Decimal::from_parts(546, 0, 0, false, 2);
const EUR_MULTIPLIER: Decimal = Decimal::from_parts(92, 0, 0, false, 2);

/// Returns the display multiplier for a currency symbol.
///
/// Unknown symbols use 1, so the amount is shown unchanged.
#[must_use]
pub fn multiplier_for(currency_symbol: &str) -> Decimal {
    match currency_symbol {
        "R$" => BRL_MULTIPLIER,
        "€" => EUR_MULTIPLIER,
        _ => Decimal::ONE,
    }
}

/// Converts an amount to the display currency and rounds it.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use cashflow_core::currency::{RoundingMode, convert};
///
/// let shown = convert(dec!(20.005), "R$", RoundingMode::HalfAwayFromZero);
/// assert_eq!(shown, dec!(109.23));
/// ```
#[must_use]
pub fn convert(amount: Decimal, currency_symbol: &str, rounding: RoundingMode) -> Decimal {
    round(amount * multiplier_for(currency_symbol), rounding)
}

/// Rounds a display amount to [`DISPLAY_DECIMAL_PLACES`].
#[must_use]
pub fn round(value: Decimal, rounding: RoundingMode) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, rounding.strategy())
}

/// Formats a display amount with exactly two decimals, rounding with `rounding`.
#[must_use]
pub fn format_amount(value: Decimal, rounding: RoundingMode) -> String {
    format!("{:.2}", round(value, rounding))
}

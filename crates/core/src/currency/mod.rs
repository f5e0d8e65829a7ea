//! Display-currency conversion.

pub mod conversion;

#[cfg(test)]
mod props;

pub use cashflow_shared::RoundingMode;
pub use conversion::{DISPLAY_DECIMAL_PLACES, convert, format_amount, multiplier_for, round};

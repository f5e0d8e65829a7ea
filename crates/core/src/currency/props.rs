//! Property-based tests for display-currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{convert, multiplier_for};
use cashflow_shared::RoundingMode;

/// Strategy to generate amounts with up to 3 decimals (0.000 to 1,000,000.000).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|mills| Decimal::new(mills, 3))
}

/// Strategy to pick a display symbol, including ones without a multiplier.
fn symbol() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("R$"), Just("€"), Just("$"), Just("¥"), Just("")]
}

/// Strategy to pick a rounding mode.
fn rounding() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::HalfAwayFromZero),
        Just(RoundingMode::HalfEven)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Conversion preserves order for a fixed symbol.
    #[test]
    fn prop_convert_is_monotone(
        a in amount(),
        b in amount(),
        symbol in symbol(),
        mode in rounding(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(convert(low, symbol, mode) <= convert(high, symbol, mode));
    }

    /// Results never carry more than 2 decimal places.
    #[test]
    fn prop_convert_rounds_to_2_decimals(
        a in amount(),
        symbol in symbol(),
        mode in rounding(),
    ) {
        let result = convert(a, symbol, mode);
        prop_assert!(result.scale() <= 2, "{} has scale {}", result, result.scale());
    }

    /// Symbols without a multiplier only round.
    #[test]
    fn prop_unknown_symbol_is_identity_modulo_rounding(
        a in amount(),
        mode in rounding(),
    ) {
        prop_assert_eq!(multiplier_for("XYZ"), Decimal::ONE);
        let expected = a.round_dp_with_strategy(2, mode.strategy());
        prop_assert_eq!(convert(a, "XYZ", mode), expected);
    }

    /// Converting is deterministic.
    #[test]
    fn prop_convert_is_deterministic(
        a in amount(),
        symbol in symbol(),
        mode in rounding(),
    ) {
        prop_assert_eq!(convert(a, symbol, mode), convert(a, symbol, mode));
    }

    /// A converted amount stays within half a cent of the exact product.
    #[test]
    fn prop_convert_within_half_cent(
        a in amount(),
        symbol in symbol(),
        mode in rounding(),
    ) {
        let exact = a * multiplier_for(symbol);
        let diff = (convert(a, symbol, mode) - exact).abs();
        prop_assert!(diff <= Decimal::new(5, 3));
    }
}

//! Property-based tests for the currency codec.
//!
//! - Round trip: formatting then parsing returns the original amount
//! - Idempotence: re-formatting a parsed string changes nothing
//! - Totality: parsing never yields a non-finite number
//! - Masking: the masked text always reads back as digits / 100

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use moeda_shared::Amount;

use super::codec::CurrencyCodec;

/// Strategy to generate cent amounts (-100,000,000,000.00 to 100,000,000,000.00).
fn cents() -> impl Strategy<Value = i64> {
    -10_000_000_000_000i64..10_000_000_000_000i64
}

/// Strategy to generate float amounts with at most two decimal places.
fn two_place_float() -> impl Strategy<Value = f64> {
    cents().prop_map(|c| Decimal::new(c, 2).to_f64().unwrap_or_default())
}

/// Strategy to generate raw keystroke buffers of digits mixed with mask characters.
fn keystroke_buffer() -> impl Strategy<Value = String> {
    "(R\\$ )?[0-9.,]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// *For any* amount with two decimal places, `parse(format(x))` SHALL equal `x`.
    #[test]
    #[allow(clippy::float_arithmetic)]
    fn prop_format_parse_round_trip(value in two_place_float(), show_symbol in any::<bool>()) {
        let formatted = CurrencyCodec::format(Some(value), show_symbol);
        let parsed = CurrencyCodec::parse(Some(&formatted));
        prop_assert!(
            (parsed - value).abs() <= 1e-9 * value.abs().max(1.0),
            "{} formatted as {} parsed back as {}",
            value, formatted, parsed
        );
    }

    /// *For any* amount, re-formatting the parsed output SHALL reproduce it.
    #[test]
    fn prop_reformat_is_idempotent(value in two_place_float()) {
        let formatted = CurrencyCodec::format(Some(value), true);
        let again = CurrencyCodec::format(Some(CurrencyCodec::parse(Some(&formatted))), true);
        prop_assert_eq!(again, formatted);
    }

    /// *For any* float, the output SHALL carry exactly two fractional digits.
    #[test]
    fn prop_format_has_two_fraction_digits(value in any::<f64>()) {
        let formatted = CurrencyCodec::format(Some(value), false);
        let (_, fraction) = formatted
            .split_once(',')
            .expect("formatted amount has a decimal separator");
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(fraction.bytes().all(|b| b.is_ascii_digit()));
    }

    /// *For any* cent amount, the strict parser SHALL read the exact decimal back.
    #[test]
    fn prop_strict_parse_inverts_format(c in cents(), show_symbol in any::<bool>()) {
        let amount = Amount::from_cents(c);
        let formatted = CurrencyCodec::format_amount(amount, show_symbol);
        prop_assert_eq!(CurrencyCodec::parse_strict(&formatted).unwrap(), amount);
    }

    /// *For any* string, parsing SHALL return a finite number.
    #[test]
    fn prop_parse_is_total(text in any::<String>()) {
        prop_assert!(CurrencyCodec::parse(Some(&text)).is_finite());
    }

    /// *For any* keystroke buffer, the masked text SHALL read back as its digits in cents.
    #[test]
    fn prop_mask_reads_back_as_cents(raw in keystroke_buffer(), cursor in 0usize..40) {
        let state = CurrencyCodec::apply_mask(&raw, cursor);
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        prop_assert!(state.cursor <= state.text.chars().count());
        if digits.is_empty() {
            prop_assert!(state.is_cleared());
        } else {
            let expected = Decimal::from_i128_with_scale(digits.parse::<i128>().unwrap(), 2);
            prop_assert_eq!(CurrencyCodec::parse_strict(&state.text).unwrap().value(), expected);
        }
    }

    /// *For any* masked text, masking it again SHALL leave it unchanged.
    #[test]
    fn prop_mask_is_stable(raw in keystroke_buffer()) {
        let first = CurrencyCodec::apply_mask(&raw, 0);
        let second = CurrencyCodec::apply_mask(&first.text, 0);
        prop_assert_eq!(second.text, first.text);
    }
}

//! Brazilian-locale currency formatting and parsing.
//!
//! Rendering follows the `pt-BR` convention: `.` groups thousands, `,`
//! separates exactly two fractional digits, and the optional symbol prefix
//! is `"R$ "`. Both directions are total: no input makes them fail.

use rust_decimal::Decimal;

use moeda_shared::types::amount::{Amount, CENT_PLACES};
use moeda_shared::{AppError, AppResult};

/// Currency symbol rendered in front of an amount.
pub const SYMBOL: &str = "R$";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Converts amounts to and from their `R$ 10.000,00` representation.
pub struct CurrencyCodec;

impl CurrencyCodec {
    /// Formats a possibly-missing numeric value.
    ///
    /// `None`, NaN, and infinities render as zero. Rounding is half away
    /// from zero on the shortest decimal representation of the float, so
    /// `1.005` renders as `1,01`. A negative input keeps its sign even when
    /// it rounds to zero (`-0.001` renders as `-0,00`).
    ///
    /// # Example
    ///
    /// ```
    /// use moeda_core::currency::CurrencyCodec;
    ///
    /// assert_eq!(CurrencyCodec::format(Some(10000.0), true), "R$ 10.000,00");
    /// assert_eq!(CurrencyCodec::format(None, false), "0,00");
    /// ```
    #[must_use]
    pub fn format(value: Option<f64>, show_symbol: bool) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return Self::format_amount(Amount::ZERO, show_symbol);
        };

        let negative = value.is_sign_negative();
        match Amount::from_f64(value) {
            Some(amount) => render_rounded(amount, negative, show_symbol),
            // Beyond `Decimal` range the float has no fractional part left.
            None => {
                let digits = value.abs().to_string();
                let integer = digits.split_once('.').map_or(digits.as_str(), |(integer, _)| integer);
                render(negative, integer, "00", show_symbol)
            }
        }
    }

    /// Formats an exact decimal value.
    #[must_use]
    pub fn format_decimal(value: Decimal, show_symbol: bool) -> String {
        Self::format_amount(Amount::new(value), show_symbol)
    }

    /// Formats an [`Amount`].
    #[must_use]
    pub fn format_amount(amount: Amount, show_symbol: bool) -> String {
        render_rounded(amount, amount.value().is_sign_negative(), show_symbol)
    }

    /// Parses a formatted amount, coercing anything unreadable to zero.
    ///
    /// Removes every `R$` (any case) with one following whitespace
    /// character, drops every `.`, turns every `,`
    /// into `.`, then reads the longest numeric prefix. `"1,2,3"` therefore
    /// parses as `1.2`. Callers that need to tell "zero" from "garbage"
    /// should use [`CurrencyCodec::parse_strict`].
    #[must_use]
    pub fn parse(text: Option<&str>) -> f64 {
        let Some(text) = text else {
            return 0.0;
        };

        let normalized: String = strip_symbols(text)
            .chars()
            .filter(|c| *c != THOUSANDS_SEPARATOR)
            .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
            .collect();

        leading_number(&normalized)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Same as [`CurrencyCodec::parse`], returned as an exact decimal.
    ///
    /// Values outside `Decimal` range collapse to zero.
    #[must_use]
    pub fn parse_decimal(text: Option<&str>) -> Decimal {
        Amount::from_f64(Self::parse(text)).map_or(Decimal::ZERO, |amount| amount.value())
    }

    /// Parses a well-formed amount, rejecting anything else.
    ///
    /// Accepts an optional `R$` prefix, an optional `-`, integer digits
    /// either ungrouped or grouped by `.` in threes, and an optional `,`
    /// followed by one or two digits.
    pub fn parse_strict(text: &str) -> AppResult<Amount> {
        let invalid = || AppError::Validation(format!("not a currency amount: {text:?}"));

        let body = strip_symbol(text.trim());
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (integer, fraction) = match body.split_once(DECIMAL_SEPARATOR) {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body, None),
        };

        let integer_digits = strict_integer(integer).ok_or_else(invalid)?;
        let fraction_digits = match fraction {
            None => "",
            Some(f)
                if (1..=CENT_PLACES as usize).contains(&f.len())
                    && f.bytes().all(|b| b.is_ascii_digit()) =>
            {
                f
            }
            Some(_) => return Err(invalid()),
        };

        let mut literal = String::with_capacity(integer_digits.len() + fraction_digits.len() + 2);
        if negative {
            literal.push('-');
        }
        literal.push_str(&integer_digits);
        if !fraction_digits.is_empty() {
            literal.push('.');
            literal.push_str(fraction_digits);
        }

        literal.parse::<Amount>().map_err(|_| invalid())
    }
}

/// Formatting shortcut for values that carry an amount.
pub trait ToBrl {
    /// Renders `self` the way [`CurrencyCodec`] does.
    fn to_brl(&self, show_symbol: bool) -> String;
}

impl ToBrl for f64 {
    fn to_brl(&self, show_symbol: bool) -> String {
        CurrencyCodec::format(Some(*self), show_symbol)
    }
}

impl ToBrl for Decimal {
    fn to_brl(&self, show_symbol: bool) -> String {
        CurrencyCodec::format_decimal(*self, show_symbol)
    }
}

impl ToBrl for Amount {
    fn to_brl(&self, show_symbol: bool) -> String {
        CurrencyCodec::format_amount(*self, show_symbol)
    }
}

/// Renders a string of ASCII digits as a number of cents.
///
/// Exact for any length; leading zeros collapse.
pub(crate) fn format_cents(digits: &str, show_symbol: bool) -> String {
    let significant = digits.trim_start_matches('0');
    let padded = format!("{significant:0>3}");
    let (integer, fraction) = padded.split_at(padded.len() - CENT_PLACES as usize);
    render(false, integer, fraction, show_symbol)
}

/// Reads the longest floating-point literal at the start of `text`.
///
/// Leading whitespace is skipped. Returns `None` when no digit is found.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        mantissa_digits += cursor - fraction_start;
        end = cursor;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }

    text[..end].parse().ok()
}

/// Removes every `R$` (any case) together with one whitespace character after it.
fn strip_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let symbol = rest
            .get(..SYMBOL.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SYMBOL));
        if symbol {
            rest = &rest[SYMBOL.len()..];
            if let Some(space) = rest.chars().next().filter(|c| c.is_whitespace()) {
                rest = &rest[space.len_utf8()..];
            }
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Drops a leading `R$` (any case) and the whitespace after it.
fn strip_symbol(text: &str) -> &str {
    match text.get(..SYMBOL.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SYMBOL) => text[SYMBOL.len()..].trim_start(),
        _ => text,
    }
}

/// Validates an integer part and returns its digits without separators.
fn strict_integer(integer: &str) -> Option<String> {
    if integer.is_empty() {
        return None;
    }
    if integer.bytes().all(|b| b.is_ascii_digit()) {
        return Some(integer.to_string());
    }

    let mut groups = integer.split(THOUSANDS_SEPARATOR);
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Rounds to cents and renders with the given sign.
fn render_rounded(amount: Amount, negative: bool, show_symbol: bool) -> String {
    let digits = amount.round_to_cents().value().abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    render(negative, integer, fraction, show_symbol)
}

/// Assembles the final string from unsigned integer and fraction digits.
fn render(negative: bool, integer: &str, fraction: &str, show_symbol: bool) -> String {
    let integer = match integer.trim_start_matches('0') {
        "" => "0",
        significant => significant,
    };

    let mut out = String::with_capacity(integer.len() + integer.len() / 3 + fraction.len() + 6);
    if show_symbol {
        out.push_str(SYMBOL);
        out.push(' ');
    }
    if negative {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(digit);
    }
    out.push(DECIMAL_SEPARATOR);
    out.push_str(fraction);
    out
}

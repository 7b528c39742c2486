//! Normalisation of amounts reported by the receipt OCR service.
//!
//! The service answers with `valor_encontrado` as either a JSON number or
//! a free-form string such as `"R$ 1.234,56"`. Unlike
//! [`CurrencyCodec::parse`](super::CurrencyCodec::parse) this path reports
//! failure, because an unreadable OCR result must not silently fill a
//! payment field with zero.

use serde_json::Value;

use moeda_shared::Amount;

use super::codec::SYMBOL;

/// Reads an OCR amount, returning `None` when it is not a finite number.
#[must_use]
pub fn parse_ocr_value(value: &Value) -> Option<Amount> {
    match value {
        Value::Number(number) => number
            .to_string()
            .parse::<Amount>()
            .ok()
            .or_else(|| number.as_f64().and_then(Amount::from_f64)),
        Value::String(text) => parse_ocr_text(text),
        _ => None,
    }
}

fn parse_ocr_text(text: &str) -> Option<Amount> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let body = match compact.get(..SYMBOL.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SYMBOL) => &compact[SYMBOL.len()..],
        _ => compact.as_str(),
    };

    let sanitized = drop_grouping_dots(body).replacen(',', ".", 1);
    if sanitized.is_empty() {
        return Some(Amount::ZERO);
    }

    sanitized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .and_then(Amount::from_f64)
}

/// Removes each `.` followed by exactly three digits and then a non-digit or the end.
fn drop_grouping_dots(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_digit = |i: usize| chars.get(i).is_some_and(char::is_ascii_digit);

    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            let grouping = *c == '.'
                && (i + 1..=i + 3).all(is_digit)
                && !is_digit(i + 4);
            !grouping
        })
        .map(|(_, c)| *c)
        .collect()
}

//! Event handlers that keep currency fields formatted.

use serde_json::Value;
use tracing::{debug, trace, warn};

use moeda_shared::config::FormatConfig;

use super::field::{CurrencyField, DisplayElement};
use crate::currency::codec::leading_number;
use crate::currency::{CurrencyCodec, parse_ocr_value};

/// Field lifecycle events a host forwards to the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The field appeared in the page.
    Mount,
    /// The field content changed through typing or pasting.
    Input,
    /// The field lost focus.
    Blur,
}

/// Applies the currency codec to fields and display elements.
///
/// Input fields always show the symbol while masking. `display_symbol`
/// controls the read-only elements only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInputBinder {
    display_symbol: bool,
}

impl CurrencyInputBinder {
    /// Creates a binder whose display elements carry the symbol.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            display_symbol: true,
        }
    }

    /// Creates a binder from formatting configuration.
    #[must_use]
    pub const fn from_config(config: &FormatConfig) -> Self {
        Self {
            display_symbol: config.show_symbol,
        }
    }

    /// Dispatches a field event to its handler.
    pub fn handle<F: CurrencyField + ?Sized>(&self, event: FieldEvent, field: &mut F) {
        match event {
            FieldEvent::Mount => {
                self.attach(field);
            }
            FieldEvent::Input => self.on_input(field),
            FieldEvent::Blur => self.on_blur(field),
        }
    }

    /// Attaches currency handling to a field once.
    ///
    /// Returns `false` when the field was already bound; nothing is touched
    /// in that case.
    pub fn attach<F: CurrencyField + ?Sized>(&self, field: &mut F) -> bool {
        if field.is_currency_bound() {
            trace!("currency field already bound");
            return false;
        }
        field.mark_currency_bound();
        normalize(field);
        true
    }

    /// Masks the field after a keystroke and keeps the cursor near the edit.
    pub fn on_input<F: CurrencyField + ?Sized>(&self, field: &mut F) {
        let raw = field.value();
        let cursor = field.cursor().unwrap_or_else(|| raw.chars().count());
        let state = CurrencyCodec::apply_mask(&raw, cursor);
        trace!(raw = %raw, masked = %state.text, cursor = state.cursor, "masked currency input");

        field.set_value(state.text);
        field.set_cursor(state.cursor);
    }

    /// Re-normalizes the field when it loses focus.
    pub fn on_blur<F: CurrencyField + ?Sized>(&self, field: &mut F) {
        normalize(field);
    }

    /// Writes an OCR-reported amount into the field.
    ///
    /// Returns whether the value was readable; the field is left untouched
    /// otherwise.
    pub fn fill_from_ocr<F: CurrencyField + ?Sized>(&self, field: &mut F, value: &Value) -> bool {
        match parse_ocr_value(value) {
            Some(amount) => {
                let formatted = CurrencyCodec::format_amount(amount, true);
                debug!(amount = %amount, formatted = %formatted, "filled currency field from OCR");
                field.set_value(formatted);
                true
            }
            None => {
                warn!(value = %value, "OCR amount could not be read");
                false
            }
        }
    }

    /// Formats each element whose raw value reads as a number.
    ///
    /// Returns how many elements were updated.
    pub fn update_display_values<E: DisplayElement>(&self, elements: &mut [E]) -> usize {
        let mut updated = 0;
        for element in elements.iter_mut() {
            let Some(value) = element.data_value().as_deref().and_then(leading_number) else {
                continue;
            };
            element.set_text(CurrencyCodec::format(Some(value), self.display_symbol));
            updated += 1;
        }
        debug!(updated, total = elements.len(), "updated currency display values");
        updated
    }

    /// Reformats elements whose text holds a plain number such as `1234.50`.
    ///
    /// Everything except digits, `.` and `-` is discarded before reading the
    /// number. Returns how many elements were updated.
    pub fn replace_auto_values<E: DisplayElement>(&self, elements: &mut [E]) -> usize {
        let mut updated = 0;
        for element in elements.iter_mut() {
            let numeric: String = element
                .text()
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
                .collect();
            let Some(value) = leading_number(&numeric) else {
                continue;
            };
            element.set_text(CurrencyCodec::format(Some(value), self.display_symbol));
            updated += 1;
        }
        debug!(updated, total = elements.len(), "replaced plain currency values");
        updated
    }
}

impl Default for CurrencyInputBinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites a non-empty field through `parse` then `format`.
fn normalize<F: CurrencyField + ?Sized>(field: &mut F) {
    let value = field.value();
    if value.is_empty() {
        return;
    }
    let formatted = CurrencyCodec::format(Some(CurrencyCodec::parse(Some(&value))), true);
    if formatted != value {
        debug!(from = %value, to = %formatted, "normalized currency field");
        field.set_value(formatted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::field::{TextElement, TextField};
    use serde_json::json;

    #[test]
    fn test_attach_normalizes_existing_value() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("1.234,5");

        assert!(binder.attach(&mut field));
        assert!(field.is_currency_bound());
        assert_eq!(field.value(), "R$ 1.234,50");
    }

    #[test]
    fn test_attach_leaves_empty_field_empty() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("");

        assert!(binder.attach(&mut field));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_attach_is_idempotent() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("10");
        assert!(binder.attach(&mut field));

        field.set_value("not touched".to_string());
        assert!(!binder.attach(&mut field));
        assert_eq!(field.value(), "not touched");
    }

    #[test]
    fn test_input_masks_and_moves_cursor() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("R$ 123,456").with_cursor(10);

        binder.on_input(&mut field);
        assert_eq!(field.value(), "R$ 1.234,56");
        assert_eq!(field.cursor(), Some(11));
    }

    #[test]
    fn test_input_without_cursor_uses_end() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("12345");

        binder.on_input(&mut field);
        assert_eq!(field.value(), "R$ 123,45");
        assert_eq!(field.cursor(), Some(9));
    }

    #[test]
    fn test_input_without_digits_clears_field() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("R$ ").with_cursor(3);

        binder.on_input(&mut field);
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), Some(0));
    }

    #[test]
    fn test_blur_normalizes() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("r$10");

        binder.on_blur(&mut field);
        assert_eq!(field.value(), "R$ 10,00");

        let mut empty = TextField::new("");
        binder.on_blur(&mut empty);
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn test_handle_dispatches_lifecycle() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("");

        binder.handle(FieldEvent::Mount, &mut field);
        assert!(field.is_currency_bound());

        field.set_value("1".to_string());
        binder.handle(FieldEvent::Input, &mut field);
        assert_eq!(field.value(), "R$ 0,01");

        field.set_value("R$ 0,015".to_string());
        binder.handle(FieldEvent::Input, &mut field);
        assert_eq!(field.value(), "R$ 0,15");

        binder.handle(FieldEvent::Blur, &mut field);
        assert_eq!(field.value(), "R$ 0,15");
    }

    #[test]
    fn test_handle_works_through_trait_objects() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("5");
        let dynamic: &mut dyn CurrencyField = &mut field;

        binder.handle(FieldEvent::Mount, dynamic);
        assert_eq!(field.value(), "R$ 5,00");
    }

    #[test]
    fn test_fill_from_ocr() {
        let binder = CurrencyInputBinder::new();
        let mut field = TextField::new("");

        assert!(binder.fill_from_ocr(&mut field, &json!("R$ 1.234,56")));
        assert_eq!(field.value(), "R$ 1.234,56");

        assert!(!binder.fill_from_ocr(&mut field, &json!("ilegível")));
        assert_eq!(field.value(), "R$ 1.234,56");
    }

    #[test]
    fn test_update_display_values_skips_non_numeric() {
        let binder = CurrencyInputBinder::new();
        let mut elements = vec![
            TextElement::with_data_value("1234.5"),
            TextElement::with_data_value("abc"),
            TextElement::new("unchanged"),
            TextElement::with_data_value("-0.1"),
        ];

        assert_eq!(binder.update_display_values(&mut elements), 2);
        assert_eq!(elements[0].text, "R$ 1.234,50");
        assert_eq!(elements[1].text, "");
        assert_eq!(elements[2].text, "unchanged");
        assert_eq!(elements[3].text, "R$ -0,10");
    }

    #[test]
    fn test_display_symbol_follows_config() {
        let binder = CurrencyInputBinder::from_config(&FormatConfig { show_symbol: false });
        let mut elements = vec![TextElement::with_data_value("10")];

        binder.update_display_values(&mut elements);
        assert_eq!(elements[0].text, "10,00");
    }

    #[test]
    fn test_replace_auto_values() {
        let binder = CurrencyInputBinder::new();
        let mut elements = vec![
            TextElement::new("Total: 1234.50"),
            TextElement::new("-15"),
            TextElement::new("n/a"),
        ];

        assert_eq!(binder.replace_auto_values(&mut elements), 2);
        assert_eq!(elements[0].text, "R$ 1.234,50");
        assert_eq!(elements[1].text, "R$ -15,00");
        assert_eq!(elements[2].text, "n/a");
    }
}

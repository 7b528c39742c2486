//! Field abstractions and their in-memory implementations.

/// An editable text input that may carry an amount.
pub trait CurrencyField {
    /// Current text of the field.
    fn value(&self) -> String;

    /// Replaces the text of the field.
    fn set_value(&mut self, value: String);

    /// Cursor offset in characters, if the field has a selection.
    fn cursor(&self) -> Option<usize>;

    /// Collapses the selection to `position`.
    fn set_cursor(&mut self, position: usize);

    /// Whether currency handling is already attached to this field.
    fn is_currency_bound(&self) -> bool;

    /// Records that currency handling is attached to this field.
    fn mark_currency_bound(&mut self);
}

/// A read-only element that displays an amount.
pub trait DisplayElement {
    /// Raw numeric value carried by the element, if any.
    fn data_value(&self) -> Option<String>;

    /// Displayed text.
    fn text(&self) -> String;

    /// Replaces the displayed text.
    fn set_text(&mut self, text: String);
}

/// In-memory text input.
///
/// Assigning a value moves the cursor to the end, like a browser input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: Option<usize>,
    currency_bound: bool,
}

impl TextField {
    /// Creates an unfocused field holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            cursor: None,
            currency_bound: false,
        }
    }

    /// Places the cursor at `position`.
    #[must_use]
    pub fn with_cursor(mut self, position: usize) -> Self {
        self.cursor = Some(position);
        self
    }
}

impl CurrencyField for TextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.cursor = Some(value.chars().count());
        self.value = value;
    }

    fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor = Some(position.min(self.value.chars().count()));
    }

    fn is_currency_bound(&self) -> bool {
        self.currency_bound
    }

    fn mark_currency_bound(&mut self) {
        self.currency_bound = true;
    }
}

/// In-memory display element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextElement {
    /// Raw numeric value, the `data-value` attribute in HTML.
    pub data_value: Option<String>,
    /// Displayed text.
    pub text: String,
}

impl TextElement {
    /// Creates an element showing `text` with no raw value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            data_value: None,
            text: text.into(),
        }
    }

    /// Creates an empty element carrying a raw value.
    #[must_use]
    pub fn with_data_value(data_value: impl Into<String>) -> Self {
        Self {
            data_value: Some(data_value.into()),
            text: String::new(),
        }
    }
}

impl DisplayElement for TextElement {
    fn data_value(&self) -> Option<String> {
        self.data_value.clone()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

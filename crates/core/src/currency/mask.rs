//! Keystroke-driven masking of a currency input.
//!
//! The digits of the field are read as a whole number of cents and the
//! field is re-rendered with the symbol. The cursor follows the change in
//! length, which keeps it close to where the user was typing without being
//! an exact inverse mapping.

use serde::{Deserialize, Serialize};

use super::codec::{CurrencyCodec, format_cents};

/// Field content and cursor after one masking step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedInputState {
    /// Text to write back into the field.
    pub text: String,
    /// Cursor offset in characters, always within `0..=text.chars().count()`.
    pub cursor: usize,
}

impl MaskedInputState {
    /// Returns true if the mask cleared the field.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.text.is_empty()
    }
}

impl CurrencyCodec {
    /// Re-renders raw field text as an amount in cents.
    ///
    /// A field without digits is cleared rather than rendered as zero.
    ///
    /// # Example
    ///
    /// ```
    /// use moeda_core::currency::CurrencyCodec;
    ///
    /// let state = CurrencyCodec::apply_mask("12345", 5);
    /// assert_eq!(state.text, "R$ 123,45");
    /// assert_eq!(state.cursor, 9);
    /// ```
    #[must_use]
    pub fn apply_mask(raw: &str, cursor_before: usize) -> MaskedInputState {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return MaskedInputState {
                text: String::new(),
                cursor: 0,
            };
        }

        let text = format_cents(&digits, true);
        let cursor = shift_cursor(cursor_before, raw.chars().count(), text.chars().count());
        MaskedInputState { text, cursor }
    }
}

/// Moves the cursor by the change in length and clamps it into the new text.
fn shift_cursor(cursor: usize, old_len: usize, new_len: usize) -> usize {
    let shifted = if new_len >= old_len {
        cursor.saturating_add(new_len - old_len)
    } else {
        cursor.saturating_sub(old_len - new_len)
    };
    shifted.min(new_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_mask_digits_as_cents() {
        let state = CurrencyCodec::apply_mask("12345", 5);
        assert_eq!(state.text, "R$ 123,45");
        assert_eq!(state.cursor, 9);
    }

    #[rstest]
    #[case("")]
    #[case("R$ ")]
    #[case("abc,.")]
    fn test_mask_without_digits_clears(#[case] raw: &str) {
        let state = CurrencyCodec::apply_mask(raw, raw.len());
        assert!(state.is_cleared());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_mask_typing_a_digit_at_the_end() {
        // "R$ 1,23" plus a typed "4"
        let state = CurrencyCodec::apply_mask("R$ 1,234", 8);
        assert_eq!(state.text, "R$ 12,34");
        assert_eq!(state.cursor, 8);
    }

    #[test]
    fn test_mask_growing_past_a_thousand() {
        // "R$ 123,45" plus a typed "6"
        let state = CurrencyCodec::apply_mask("R$ 123,456", 10);
        assert_eq!(state.text, "R$ 1.234,56");
        assert_eq!(state.cursor, 11);
    }

    #[test]
    fn test_mask_deleting_a_digit() {
        // Backspace at the end of "R$ 1.234,56"
        let state = CurrencyCodec::apply_mask("R$ 1.234,5", 10);
        assert_eq!(state.text, "R$ 123,45");
        assert_eq!(state.cursor, 9);
    }

    #[test]
    fn test_mask_collapses_leading_zeros() {
        let state = CurrencyCodec::apply_mask("R$ 0,012", 8);
        assert_eq!(state.text, "R$ 0,12");
    }

    #[test]
    fn test_mask_ignores_non_ascii_digits() {
        let state = CurrencyCodec::apply_mask("١٢3", 3);
        assert_eq!(state.text, "R$ 0,03");
    }

    #[rstest]
    #[case(0, 5, 9, 4)]
    #[case(2, 9, 4, 0)]
    #[case(9, 9, 4, 4)]
    #[case(100, 3, 7, 7)]
    #[case(3, 7, 7, 3)]
    fn test_shift_cursor(
        #[case] cursor: usize,
        #[case] old_len: usize,
        #[case] new_len: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(shift_cursor(cursor, old_len, new_len), expected);
    }
}

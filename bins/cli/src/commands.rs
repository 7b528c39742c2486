//! Subcommands of the `moeda` binary.

use clap::Subcommand;
use tracing::debug;

use moeda_core::{CurrencyCodec, CurrencyInputBinder};
use moeda_core::binding::{CurrencyField, TextField};
use moeda_shared::config::FormatConfig;
use moeda_shared::{AppError, AppResult};

/// Codec operations exposed on the command line.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a number as an amount, e.g. `1234.5` -> `R$ 1.234,50`
    Format {
        /// Number to render; anything unreadable renders as zero
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Omit the `R$ ` prefix
        #[arg(long)]
        no_symbol: bool,
    },
    /// Read an amount back into a number
    Parse {
        /// Formatted amount, e.g. `R$ 1.234,50`
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Fail on malformed input instead of printing 0
        #[arg(long)]
        strict: bool,
    },
    /// Apply the keystroke mask to a raw field buffer
    Mask {
        /// Raw field content
        #[arg(allow_hyphen_values = true)]
        raw: String,

        /// Cursor offset before the edit; defaults to the end of the buffer
        #[arg(long)]
        cursor: Option<usize>,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalise an OCR `valor_encontrado` JSON literal into an amount
    Ocr {
        /// JSON literal, e.g. `"R$ 1.234,56"` (with quotes) or `1234.56`
        #[arg(allow_hyphen_values = true)]
        payload: String,
    },
}

impl Command {
    /// Runs the command and returns the line to print.
    pub fn run(self, config: &FormatConfig) -> AppResult<String> {
        match self {
            Self::Format { value, no_symbol } => {
                let number = value.trim().parse::<f64>().ok();
                Ok(CurrencyCodec::format(number, config.show_symbol && !no_symbol))
            }
            Self::Parse { text, strict: true } => {
                CurrencyCodec::parse_strict(&text).map(|amount| amount.to_string())
            }
            Self::Parse { text, strict: false } => {
                Ok(CurrencyCodec::parse(Some(&text)).to_string())
            }
            Self::Mask { raw, cursor, json } => {
                let cursor = cursor.unwrap_or_else(|| raw.chars().count());
                let state = CurrencyCodec::apply_mask(&raw, cursor);
                debug!(cursor = state.cursor, "mask applied");
                if json {
                    serde_json::to_string(&state).map_err(|e| AppError::Internal(e.to_string()))
                } else {
                    Ok(state.text)
                }
            }
            Self::Ocr { payload } => {
                let value: serde_json::Value = serde_json::from_str(&payload)
                    .map_err(|e| AppError::Validation(format!("invalid JSON payload: {e}")))?;

                let mut field = TextField::default();
                if !CurrencyInputBinder::from_config(config).fill_from_ocr(&mut field, &value) {
                    return Err(AppError::Validation(format!(
                        "OCR value is not an amount: {value}"
                    )));
                }
                Ok(field.value())
            }
        }
    }
}

//! Core currency logic for Moeda.
//!
//! This crate contains pure formatting logic with ZERO host or DOM dependencies.
//!
//! # Modules
//!
//! - `currency` - Formatting, parsing, masking, and OCR amount normalisation
//! - `binding` - Field lifecycle handlers built on the codec

pub mod binding;
pub mod currency;

pub use binding::{CurrencyInputBinder, FieldEvent};
pub use currency::{CurrencyCodec, MaskedInputState, ToBrl};

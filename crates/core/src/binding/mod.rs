//! Attaching the currency codec to host text fields.
//!
//! Host environments (a DOM bridge, a TUI, tests) expose their inputs
//! through [`CurrencyField`] and their read-only amount displays through
//! [`DisplayElement`]. A [`CurrencyInputBinder`] is constructed explicitly
//! and handed to whatever dispatches field events; there is no global
//! registry.

pub mod binder;
pub mod field;

pub use binder::{CurrencyInputBinder, FieldEvent};
pub use field::{CurrencyField, DisplayElement, TextElement, TextField};

//! Brazilian-locale currency codec.

pub mod codec;
pub mod mask;
pub mod ocr;

#[cfg(test)]
mod props;

pub use codec::{CurrencyCodec, SYMBOL, ToBrl};
pub use mask::MaskedInputState;
pub use ocr::parse_ocr_value;

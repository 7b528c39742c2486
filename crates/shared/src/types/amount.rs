//! Amount type with decimal precision.
//!
//! CRITICAL: Never render money from floating-point arithmetic.
//! This type wraps `rust_decimal::Decimal`; values arriving as `f64` are
//! converted through their shortest decimal representation, which is the
//! number a user actually sees.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits a rendered amount always carries.
pub const CENT_PLACES: u32 = 2;

/// Represents a monetary amount.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new Amount from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates an amount from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_PLACES))
    }

    /// Converts a float into an amount.
    ///
    /// Returns `None` for NaN, infinities, and magnitudes `Decimal` cannot hold.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64_retain(value))
            .map(Self)
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the closest `f64` to this amount.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    ///
    /// A negative zero is not negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to whole cents, half away from zero, with the scale fixed at two.
    ///
    /// The sign is not normalised; a small negative value may round to a
    /// negative zero.
    #[must_use]
    pub fn round_to_cents(&self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CENT_PLACES);
        Self(rounded)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

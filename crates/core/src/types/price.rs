//! Price representation using decimal arithmetic.
//!
//! All monetary amounts in Makiya use [`rust_decimal::Decimal`] - never
//! floats - so cart totals are exact. The storefront sells in a single
//! currency (Peruvian soles), so [`Price`] carries the amount only and
//! formats with the fixed `S/` symbol.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency symbol used for display (Peruvian sol).
pub const CURRENCY_SYMBOL: &str = "S/";

/// A monetary amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., `S/ 18.50`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL} {:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Compute a line total: unit price times quantity, exactly.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

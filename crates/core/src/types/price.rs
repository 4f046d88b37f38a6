//! Type-safe price representation using decimal arithmetic.
//!
//! The Titan catalog is single-currency (USD), so `Price` wraps a bare
//! [`Decimal`] rather than carrying a currency code. Prices serialize as
//! plain JSON numbers - the cart snapshot format stores `price: 12400`,
//! not a string or an object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A USD unit price.
///
/// Never negative for catalog products; the type itself does not enforce
/// this, catalog loading does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// The underlying decimal dollar amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g., "$12400.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

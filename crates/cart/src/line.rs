//! Cart line items and derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use titan_core::{Price, ProductId};

/// An immutable catalog fact: what a shopper can add to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique catalog identifier (handle).
    pub id: ProductId,
    /// Image path for display.
    pub image: String,
    /// Display title.
    pub title: String,
    /// Unit price. Non-negative.
    pub price: Price,
}

/// One product plus a quantity within a cart.
///
/// Lines created through store operations always have `quantity >= 1`;
/// an update that would bring the quantity below 1 is ignored, leaving
/// the prior quantity unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier this line is keyed by.
    pub id: ProductId,
    /// Product image path.
    pub image: String,
    /// Product display title.
    pub title: String,
    /// Unit price at the time the line was created.
    pub price: Price,
    /// Number of units. At least 1 for lines created through operations.
    pub quantity: u32,
}

impl CartLine {
    /// Create a fresh line for a product with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            image: product.image.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.quantity)
    }
}

/// The reference tax rate applied at cart display and checkout (10%).
#[must_use]
pub fn default_tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Derived order summary values.
///
/// These are recomputed from the lines on every read and never cached -
/// they have no lifecycle of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Price,
    /// `subtotal * tax_rate`.
    pub tax: Price,
    /// `subtotal + tax`.
    pub total: Price,
}

impl CartTotals {
    /// Compute totals for a set of lines at the given tax rate.
    #[must_use]
    pub fn compute(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal * tax_rate;

        Self {
            subtotal: Price::new(subtotal),
            tax: Price::new(tax),
            total: Price::new(subtotal + tax),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            image: format!("/static/images/products/{id}.jpg"),
            title: id.to_string(),
            price: Price::from_dollars(price),
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line("p1", 100, 3).line_total(), Decimal::from(300));
    }

    #[test]
    fn test_totals_reference_scenario() {
        // Two units of a $100 product: subtotal 200, 10% tax 20, total 220.
        let lines = vec![line("p1", 100, 2)];
        let totals = CartTotals::compute(&lines, default_tax_rate());

        assert_eq!(totals.subtotal, Price::from_dollars(200));
        assert_eq!(totals.tax, Price::from_dollars(20));
        assert_eq!(totals.total, Price::from_dollars(220));
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = CartTotals::compute(&[], default_tax_rate());
        assert_eq!(totals.subtotal, Price::ZERO);
        assert_eq!(totals.tax, Price::ZERO);
        assert_eq!(totals.total, Price::ZERO);
    }

    #[test]
    fn test_totals_sum_across_lines() {
        let lines = vec![line("p1", 100, 1), line("p2", 250, 2)];
        let totals = CartTotals::compute(&lines, default_tax_rate());
        assert_eq!(totals.subtotal, Price::from_dollars(600));
        assert_eq!(totals.total, Price::from_dollars(660));
    }
}

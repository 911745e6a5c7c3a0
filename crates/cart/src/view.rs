//! Presentational cart snapshots.
//!
//! Surfaces render these instead of the raw aggregate: prices arrive
//! preformatted and only display-relevant fields are exposed. Views are
//! derived from a cart snapshot on demand and hold no state of their own.

use starfruit_core::{Cart, LineItem, Price};

/// Line-item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    /// Product id, for remove/set-quantity actions.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Units of this product.
    pub quantity: u32,
    /// Formatted unit price (e.g. `$10.50`).
    pub unit_price: String,
    /// Formatted `price * quantity` for the line.
    pub line_total: String,
    /// First product image, if any.
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Lines in display order.
    pub items: Vec<LineItemView>,
    /// Formatted cart total.
    pub subtotal: String,
    /// Total units across all lines.
    pub item_count: u32,
}

impl CartView {
    /// An empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Whether there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(LineItemView::from).collect(),
            subtotal: Price::new(cart.total()).to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&LineItem> for LineItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.price.to_string(),
            line_total: Price::new(line.line_total()).to_string(),
            image: line.images.first().cloned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use starfruit_core::{ProductId, ProductSnapshot};

    #[test]
    fn test_view_formats_prices() {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                id: ProductId::new("p1"),
                name: "Starfruit Chips".to_string(),
                price: Price::from_cents(1050),
                images: vec![
                    "https://cdn.example.com/front.jpg".to_string(),
                    "https://cdn.example.com/back.jpg".to_string(),
                ],
            },
            2,
        )
        .unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$21.00");

        let item = view.items.first().unwrap();
        assert_eq!(item.unit_price, "$10.50");
        assert_eq!(item.line_total, "$21.00");
        assert_eq!(item.image.as_deref(), Some("https://cdn.example.com/front.jpg"));
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view, CartView::from(&Cart::new()));
    }
}

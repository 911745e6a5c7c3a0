//! The cart aggregate and its line items.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s with at most one entry
//! per product id. Repeated adds merge by id and accumulate quantity; a
//! quantity that would reach zero removes the line instead of storing it.
//! The total is recomputed from the line items on every read.
//!
//! This module is pure: no storage, no notification, no HTTP. The shared,
//! persisted store lives in the `cart` crate and routes every mutation
//! through the operations defined here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors from cart mutations.
///
/// These are rejected before any mutation takes place, so a failed call
/// leaves the cart exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product cannot be carted (blank id or negative price).
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// The quantity delta must be at least 1.
    #[error("quantity delta must be at least 1")]
    ZeroQuantityDelta,
}

/// A product as it enters the cart boundary.
///
/// All incoming shapes (catalog entries, admin-entered records, buy-now
/// snapshots) are normalized into this one form before they reach the cart,
/// so the aggregate never has to tolerate missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product identifier, unique key within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs, may be empty. Surfaces show the first one.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductSnapshot {
    fn validate(&self) -> Result<(), CartError> {
        if self.id.is_blank() {
            return Err(CartError::InvalidProduct("missing product id".into()));
        }
        if self.price.is_negative() {
            return Err(CartError::InvalidProduct(format!(
                "negative price for product {}",
                self.id
            )));
        }
        Ok(())
    }
}

/// One product entry in the cart with an associated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique key within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs, may be empty.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units of this product. Always at least 1; a line that would drop to
    /// zero is removed from the cart instead.
    pub quantity: u32,
}

impl LineItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }

    fn from_snapshot(product: ProductSnapshot, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            images: product.images,
            quantity,
        }
    }
}

/// A single-product snapshot for the buy-now fast path.
///
/// Same shape as a [`LineItem`] but held independently of the [`Cart`]; it
/// is never merged into it. Created by a "buy now" action, consumed exactly
/// once by checkout, and deleted after success or explicit cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyNowSelection {
    /// The product being bought.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Units to buy, defaults to 1.
    pub quantity: u32,
}

impl BuyNowSelection {
    /// Create a selection for `quantity` units of `product`.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the product has a blank id or negative price,
    /// or if `quantity` is zero.
    pub fn new(product: ProductSnapshot, quantity: u32) -> Result<Self, CartError> {
        product.validate()?;
        if quantity == 0 {
            return Err(CartError::ZeroQuantityDelta);
        }
        Ok(Self { product, quantity })
    }

    /// The total for this selection.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// The aggregate of line items a user intends to purchase.
///
/// Serializes as the plain line-item sequence, which is also the persisted
/// representation; deserialization reconstructs display order from the
/// stored sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity_delta` units of `product`.
    ///
    /// If a line with the same id exists its quantity is increased,
    /// otherwise a new line is appended. The merge keys on the product id
    /// alone, so the same product can never appear as two separate lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the product has a blank id or negative price,
    /// or if `quantity_delta` is zero. Nothing is mutated on error.
    pub fn add(&mut self, product: ProductSnapshot, quantity_delta: u32) -> Result<(), CartError> {
        product.validate()?;
        if quantity_delta == 0 {
            return Err(CartError::ZeroQuantityDelta);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity_delta);
        } else {
            self.lines
                .push(LineItem::from_snapshot(product, quantity_delta));
        }
        Ok(())
    }

    /// Remove the line with the given id. Absence is a no-op, so UI removal
    /// stays idempotent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|l| &l.id != id);
    }

    /// Overwrite the stored quantity for the given id.
    ///
    /// A quantity of zero behaves as [`Cart::remove`]; the invariant that no
    /// line carries a non-positive quantity is enforced here rather than in
    /// every caller. An id not in the cart is a no-op.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` over all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The line items in display (insertion) order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents),
            images: vec![format!("https://cdn.example.com/{id}.jpg")],
        }
    }

    #[test]
    fn test_repeated_add_merges_by_id() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 1).unwrap();
        cart.add(product("p1", 1000), 1).unwrap();

        assert_eq!(cart.len(), 1);
        let line = cart.line(&ProductId::new("p1")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_add_accumulates_deltas() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 2).unwrap();
        cart.add(product("p1", 500), 3).unwrap();
        cart.add(product("p1", 500), 1).unwrap();

        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 6);
    }

    #[test]
    fn test_total_over_multiple_lines() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 2).unwrap();
        cart.add(product("p2", 500), 1).unwrap();
        assert_eq!(cart.total(), Decimal::new(2500, 2));

        cart.remove(&ProductId::new("p1"));
        assert_eq!(cart.total(), Decimal::new(500, 2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 1).unwrap();

        cart.remove(&ProductId::new("p1"));
        assert!(cart.is_empty());
        // Second removal of the same id is a no-op, not an error.
        cart.remove(&ProductId::new("p1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 3).unwrap();

        cart.set_quantity(&ProductId::new("p1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 3).unwrap();

        cart.set_quantity(&ProductId::new("p1"), 7);
        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 7);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 1).unwrap();

        cart.set_quantity(&ProductId::new("p9"), 4);
        assert_eq!(cart.len(), 1);
        assert!(cart.line(&ProductId::new("p9")).is_none());
    }

    #[test]
    fn test_add_rejects_blank_id() {
        let mut cart = Cart::new();
        let err = cart.add(product("  ", 1000), 1).unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut cart = Cart::new();
        let mut bad = product("p1", 1000);
        bad.price = Price::from_cents(-100);
        let err = cart.add(bad, 1).unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_zero_delta() {
        let mut cart = Cart::new();
        let err = cart.add(product("p1", 1000), 0).unwrap_err();
        assert_eq!(err, CartError::ZeroQuantityDelta);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(product("b", 100), 1).unwrap();
        cart.add(product("a", 100), 1).unwrap();
        cart.add(product("b", 100), 1).unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 2).unwrap();
        cart.add(product("p2", 550), 1).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total(), cart.total());
    }

    #[test]
    fn test_deserialize_numeric_ids_from_legacy_storage() {
        // Older persisted carts stored numeric product ids.
        let json = r#"[{"id":42,"name":"Legacy","price":"9.99","quantity":1}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert!(cart.line(&ProductId::new("42")).is_some());
    }

    #[test]
    fn test_buy_now_selection_defaults() {
        let selection = BuyNowSelection::new(product("p1", 1250), 1).unwrap();
        assert_eq!(selection.quantity, 1);
        assert_eq!(selection.total(), Decimal::new(1250, 2));
    }

    #[test]
    fn test_buy_now_rejects_zero_quantity() {
        let err = BuyNowSelection::new(product("p1", 1250), 0).unwrap_err();
        assert_eq!(err, CartError::ZeroQuantityDelta);
    }

    #[test]
    fn test_item_count() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1000), 2).unwrap();
        cart.add(product("p2", 500), 3).unwrap();
        assert_eq!(cart.item_count(), 5);
    }
}

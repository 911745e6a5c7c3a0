//! Wire types for the storefront REST backend.
//!
//! These mirror what the backend actually sends and are converted into core
//! domain types at the client boundary. Field names follow the backend's
//! camelCase convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use starfruit_core::{BuyNowSelection, Cart, Price, ProductId, ProductSnapshot};

// =============================================================================
// Catalog
// =============================================================================

/// A product as returned by `GET /products`.
///
/// Ids may arrive as strings or numbers and prices as numbers or strings;
/// both are normalized by the core newtypes during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs, may be empty.
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CatalogProduct> for ProductSnapshot {
    fn from(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            images: product.images,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Delivery contact for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    /// Recipient name.
    pub contact_name: String,
    /// Phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
}

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Recipient name.
    pub contact_name: String,
    /// Phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Ordered lines.
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    /// Build a request from the current cart snapshot.
    #[must_use]
    pub fn from_cart(cart: &Cart, contact: &ContactDetails) -> Self {
        Self {
            contact_name: contact.contact_name.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            items: cart
                .lines()
                .iter()
                .map(|line| OrderItem {
                    product_id: line.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    /// Build a request from a buy-now selection.
    #[must_use]
    pub fn from_selection(selection: &BuyNowSelection, contact: &ContactDetails) -> Self {
        Self {
            contact_name: contact.contact_name.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            items: vec![OrderItem {
                product_id: selection.product.id.clone(),
                quantity: selection.quantity,
            }],
        }
    }
}

/// Confirmation payload returned on a 2xx order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Backend-assigned order id.
    pub id: String,
    /// Order status, if the backend reports one.
    #[serde(default)]
    pub status: Option<String>,
    /// Creation timestamp, if the backend reports one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Error payloads observed from the backend: `{"message": ...}` or
/// `{"error": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_product_accepts_numeric_id_and_price() {
        let json = r#"{"id": 7, "name": "Starfruit Soap", "price": 4.5}"#;
        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("7"));
        assert_eq!(product.price.to_string(), "$4.50");
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_order_request_wire_shape() {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                id: ProductId::new("p1"),
                name: "Starfruit Tea".to_string(),
                price: Price::from_cents(899),
                images: Vec::new(),
            },
            2,
        )
        .unwrap();
        let contact = ContactDetails {
            contact_name: "Ada".to_string(),
            phone: "+45 555 0101".to_string(),
            address: "1 Orchard Way".to_string(),
        };

        let value = serde_json::to_value(OrderRequest::from_cart(&cart, &contact)).unwrap();
        assert_eq!(value["contactName"], "Ada");
        assert_eq!(value["items"][0]["productId"], "p1");
        assert_eq!(value["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_order_request_from_selection_has_one_line() {
        let selection = BuyNowSelection::new(
            ProductSnapshot {
                id: ProductId::new("p2"),
                name: "Starfruit Candle".to_string(),
                price: Price::from_cents(1500),
                images: Vec::new(),
            },
            1,
        )
        .unwrap();
        let contact = ContactDetails {
            contact_name: "Ada".to_string(),
            phone: "+45 555 0101".to_string(),
            address: "1 Orchard Way".to_string(),
        };

        let request = OrderRequest::from_selection(&selection, &contact);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items.first().unwrap().quantity, 1);
    }

    #[test]
    fn test_confirmation_tolerates_minimal_payload() {
        let confirmation: OrderConfirmation =
            serde_json::from_str(r#"{"id": "ord_123"}"#).unwrap();
        assert_eq!(confirmation.id, "ord_123");
        assert!(confirmation.status.is_none());
        assert!(confirmation.created_at.is_none());
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "out of stock", "error": "other"}"#).unwrap();
        assert_eq!(body.into_message().unwrap(), "out of stock");
    }
}

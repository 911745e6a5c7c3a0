//! Type-safe product identifier.
//!
//! Product ids arrive from several sources that disagree on their JSON
//! representation: the catalog API emits strings, while admin-entered
//! records and older persisted carts may carry numbers. `ProductId`
//! normalizes both at the deserialization boundary and always serializes
//! back as a string, so everything past the boundary deals with one shape.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A product identifier, unique key within a cart.
///
/// Deserializes from either a JSON string or a JSON number; serializes as a
/// string. A blank id is representable but is rejected by the cart before
/// any mutation (see `Cart::add`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both `"42"` and `42` on the wire.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
            Raw::Float(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_string() {
        let id: ProductId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(id, ProductId::new("p1"));
    }

    #[test]
    fn test_deserialize_from_number() {
        let id: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ProductId::new("42"));
    }

    #[test]
    fn test_serialize_always_string() {
        let json = serde_json::to_string(&ProductId::new("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_is_blank() {
        assert!(ProductId::new("").is_blank());
        assert!(ProductId::new("   ").is_blank());
        assert!(!ProductId::new("p1").is_blank());
    }
}

//! REST backend clients: catalog lookup and order submission.
//!
//! # Architecture
//!
//! - The backend is the source of truth for products and orders - no local
//!   sync, direct API calls
//! - Wire types live in [`types`] and are normalized into core domain types
//!   at this boundary, so internal invariants never tolerate missing fields
//! - Catalog responses are cached in-memory via `moka`
//!
//! # Endpoints
//!
//! - `GET {base}/products` - ordered product sequence
//! - `POST {base}/orders` - order submission, bearer-authenticated

mod catalog;
mod orders;
pub mod types;

pub use types::{CatalogProduct, ContactDetails, OrderConfirmation, OrderItem, OrderRequest};

use std::sync::Arc;

use moka::future::Cache;
use secrecy::SecretString;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (network, timeout, malformed response body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend rejected the request with an error payload.
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message when available, generic otherwise.
        message: String,
    },

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Client for the storefront REST backend.
///
/// Cheaply cloneable; catalog responses are cached for the configured TTL.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    products_endpoint: String,
    orders_endpoint: String,
    bearer_token: SecretString,
    catalog_cache: Cache<&'static str, Arc<Vec<CatalogProduct>>>,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let base = config.base_url.as_str().trim_end_matches('/').to_string();
        let catalog_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                http: reqwest::Client::new(),
                products_endpoint: format!("{base}/products"),
                orders_endpoint: format!("{base}/orders"),
                bearer_token: config.bearer_token.clone(),
                catalog_cache,
            }),
        }
    }

    /// Map a non-success response into a [`BackendError`].
    ///
    /// Tries the backend's `{"message": ...}` / `{"error": ...}` shapes
    /// before falling back to the raw body.
    async fn error_from_response(response: reqwest::Response) -> BackendError {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return BackendError::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<types::ErrorBody>(&body)
            .ok()
            .and_then(types::ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body.chars().take(500).collect()
                }
            });

        BackendError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 422,
            message: "address is required".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (422): address is required");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = BackendError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");
    }
}

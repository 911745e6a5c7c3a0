//! Catalog lookup.

use std::sync::Arc;

use tracing::{debug, instrument};

use starfruit_core::{ProductId, ProductSnapshot};

use super::types::CatalogProduct;
use super::{BackendClient, BackendError};

const PRODUCTS_CACHE_KEY: &str = "products";

impl BackendClient {
    /// Fetch the product catalog (`GET /products`).
    ///
    /// Responses are cached for the configured TTL; concurrent callers may
    /// race on a cold cache, which is harmless for an idempotent read.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Arc<Vec<CatalogProduct>>, BackendError> {
        if let Some(products) = self.inner.catalog_cache.get(&PRODUCTS_CACHE_KEY).await {
            debug!("catalog cache hit");
            return Ok(products);
        }

        let response = self
            .inner
            .http
            .get(&self.inner.products_endpoint)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let products: Arc<Vec<CatalogProduct>> = Arc::new(response.json().await?);
        debug!(count = products.len(), "catalog fetched");
        self.inner
            .catalog_cache
            .insert(PRODUCTS_CACHE_KEY, Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Look up one catalog product by id, normalized into the shape the
    /// cart accepts.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the catalog cannot be fetched.
    #[instrument(skip(self))]
    pub async fn find_product(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductSnapshot>, BackendError> {
        let products = self.list_products().await?;
        Ok(products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .map(ProductSnapshot::from))
    }
}

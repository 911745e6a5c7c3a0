//! Order submission.

use secrecy::ExposeSecret;
use tracing::{info, instrument};

use super::types::{OrderConfirmation, OrderRequest};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// Submit an order (`POST /orders`), bearer-authenticated.
    ///
    /// One request, no automatic retry; the caller decides whether to
    /// resubmit after a failure.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` with the backend-provided message on a
    /// 4xx/5xx response, `BackendError::RateLimited` on 429, and
    /// `BackendError::Http` on network failure.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn submit_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderConfirmation, BackendError> {
        let response = self
            .inner
            .http
            .post(&self.inner.orders_endpoint)
            .bearer_auth(self.inner.bearer_token.expose_secret())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let confirmation: OrderConfirmation = response.json().await?;
        info!(order_id = %confirmation.id, "order accepted");
        Ok(confirmation)
    }
}

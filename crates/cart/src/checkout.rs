//! Checkout submission.
//!
//! Converts either the cart or the buy-now selection into a single order
//! submission and reconciles local state with the outcome: success clears
//! the source (store and persistence), failure leaves it untouched so the
//! user can retry without re-entering anything.
//!
//! The submitter is a small state machine, `Idle -> Submitting`, with the
//! terminal outcome carried in the returned `Result`. While `Submitting`,
//! further submissions are refused so a double-clicked confirm button can
//! never place two orders.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{instrument, warn};

use crate::backend::{BackendClient, BackendError, ContactDetails, OrderConfirmation, OrderRequest};
use crate::buy_now::BuyNowSlot;
use crate::store::CartStore;

/// Errors from checkout submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to submit; no network call was made.
    #[error("nothing to submit: the order source is empty")]
    EmptyOrder,

    /// A submission is already in flight; no second network call was made.
    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    /// The backend or network failed; the cart/selection is unchanged and
    /// can be resubmitted.
    #[error("order submission failed: {0}")]
    Submission(#[from] BackendError),
}

/// Observable submitter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// No submission in progress.
    Idle,
    /// A submission is in flight; confirm actions should be disabled.
    Submitting,
}

/// Submits orders against the backend.
///
/// Cheaply cloneable; all clones share the in-flight guard, so concurrent
/// confirm clicks from any surface are refused together.
#[derive(Clone)]
pub struct CheckoutSubmitter {
    inner: Arc<CheckoutSubmitterInner>,
}

struct CheckoutSubmitterInner {
    backend: BackendClient,
    in_flight: AtomicBool,
}

impl CheckoutSubmitter {
    /// Create a submitter over a backend client.
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self {
            inner: Arc::new(CheckoutSubmitterInner {
                backend,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        if self.inner.in_flight.load(Ordering::Acquire) {
            CheckoutState::Submitting
        } else {
            CheckoutState::Idle
        }
    }

    /// Submit the current cart as one order.
    ///
    /// On success the cart store is cleared (memory and persistence) before
    /// the confirmation is returned. On failure the cart is left exactly as
    /// it was.
    ///
    /// # Errors
    ///
    /// `EmptyOrder` if the cart is empty (no network call),
    /// `SubmissionInFlight` if another submission is running, or
    /// `Submission` for backend/network failures.
    #[instrument(skip(self, store, contact))]
    pub async fn submit_cart(
        &self,
        store: &CartStore,
        contact: &ContactDetails,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let snapshot = store.snapshot();
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }
        let _guard = self.acquire()?;

        let request = OrderRequest::from_cart(&snapshot, contact);
        let confirmation = match self.inner.backend.submit_order(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!("order submission failed, cart left intact for retry: {e}");
                return Err(e.into());
            }
        };

        store.clear();
        Ok(confirmation)
    }

    /// Submit the buy-now selection as one order, bypassing the cart.
    ///
    /// On success the selection is consumed so a later visit to the
    /// checkout page cannot resubmit it; on failure it is retained for
    /// retry.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CheckoutSubmitter::submit_cart`]; `EmptyOrder`
    /// when no selection is set.
    #[instrument(skip(self, slot, contact))]
    pub async fn submit_buy_now(
        &self,
        slot: &BuyNowSlot,
        contact: &ContactDetails,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let Some(selection) = slot.peek() else {
            return Err(CheckoutError::EmptyOrder);
        };
        let _guard = self.acquire()?;

        let request = OrderRequest::from_selection(&selection, contact);
        let confirmation = match self.inner.backend.submit_order(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!("buy-now submission failed, selection left intact for retry: {e}");
                return Err(e.into());
            }
        };

        slot.clear();
        Ok(confirmation)
    }

    /// Move `Idle -> Submitting`, refusing if already submitting. The guard
    /// returns to `Idle` on drop, on every exit path.
    fn acquire(&self) -> Result<InFlightGuard<'_>, CheckoutError> {
        self.inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckoutError::SubmissionInFlight)?;
        Ok(InFlightGuard(&self.inner.in_flight))
    }
}

#[derive(Debug)]
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::storage::CartStorage;
    use secrecy::SecretString;
    use std::time::Duration;

    /// A client pointed at an address nothing listens on. Tests using it
    /// prove a code path made no network call by observing an error other
    /// than `Submission`.
    fn unreachable_backend() -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: "http://127.0.0.1:9".parse().unwrap(),
            bearer_token: SecretString::from("test-token"),
            catalog_cache_ttl: Duration::from_secs(1),
        })
    }

    #[tokio::test]
    async fn test_empty_cart_is_refused_without_network() {
        let submitter = CheckoutSubmitter::new(unreachable_backend());
        let store = CartStore::open(CartStorage::in_memory());
        let contact = ContactDetails {
            contact_name: "Ada".to_string(),
            phone: "+45 555 0101".to_string(),
            address: "1 Orchard Way".to_string(),
        };

        let err = submitter.submit_cart(&store, &contact).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyOrder));
        assert_eq!(submitter.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_empty_buy_now_is_refused_without_network() {
        let submitter = CheckoutSubmitter::new(unreachable_backend());
        let slot = BuyNowSlot::open(CartStorage::in_memory());
        let contact = ContactDetails {
            contact_name: "Ada".to_string(),
            phone: "+45 555 0101".to_string(),
            address: "1 Orchard Way".to_string(),
        };

        let err = submitter.submit_buy_now(&slot, &contact).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyOrder));
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let submitter = CheckoutSubmitter::new(unreachable_backend());

        {
            let _guard = submitter.acquire().unwrap();
            assert_eq!(submitter.state(), CheckoutState::Submitting);
            assert!(matches!(
                submitter.acquire().unwrap_err(),
                CheckoutError::SubmissionInFlight
            ));
        }

        assert_eq!(submitter.state(), CheckoutState::Idle);
        assert!(submitter.acquire().is_ok());
    }
}

//! Buy-now fast path.
//!
//! A single-product purchase that bypasses the main cart entirely. The
//! selection lives in its own storage slot, so putting something in the
//! cart and buying something else immediately never interact.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use starfruit_core::{BuyNowSelection, CartError, ProductSnapshot};

use crate::storage::CartStorage;

/// Holder of at most one [`BuyNowSelection`].
///
/// `set` overwrites any previous selection; checkout consumes it on
/// success, and `clear` is the explicit cancellation path. A selection is
/// never merged into the cart store.
#[derive(Clone)]
pub struct BuyNowSlot {
    inner: Arc<BuyNowSlotInner>,
}

struct BuyNowSlotInner {
    selection: Mutex<Option<BuyNowSelection>>,
    storage: CartStorage,
}

impl BuyNowSlot {
    /// Open the slot, hydrating any persisted selection.
    #[must_use]
    pub fn open(storage: CartStorage) -> Self {
        let selection = storage.load_buy_now();
        Self {
            inner: Arc::new(BuyNowSlotInner {
                selection: Mutex::new(selection),
                storage,
            }),
        }
    }

    /// Store a selection for `quantity` units of `product`, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns `CartError` for a blank product id, negative price, or zero
    /// quantity; the previous selection is kept on error.
    pub fn set(
        &self,
        product: ProductSnapshot,
        quantity: u32,
    ) -> Result<BuyNowSelection, CartError> {
        let selection = BuyNowSelection::new(product, quantity)?;
        *self.lock() = Some(selection.clone());
        if let Err(e) = self.inner.storage.save_buy_now(&selection) {
            warn!("buy-now persistence failed, continuing with in-memory selection: {e}");
        }
        Ok(selection)
    }

    /// The current selection, left in place.
    #[must_use]
    pub fn peek(&self) -> Option<BuyNowSelection> {
        self.lock().clone()
    }

    /// Consume the selection, removing it from memory and storage.
    #[must_use]
    pub fn take(&self) -> Option<BuyNowSelection> {
        let selection = self.lock().take();
        if selection.is_some() {
            self.clear_storage();
        }
        selection
    }

    /// Explicit cancellation: drop the selection so a later visit to the
    /// checkout page cannot resubmit it.
    pub fn clear(&self) {
        *self.lock() = None;
        self.clear_storage();
    }

    fn clear_storage(&self) {
        if let Err(e) = self.inner.storage.clear_buy_now() {
            warn!("failed to clear persisted buy-now selection: {e}");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<BuyNowSelection>> {
        self.inner
            .selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

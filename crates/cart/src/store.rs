//! The shared cart store.
//!
//! Single source of truth for cart contents. Constructed once per session
//! and cloned into every consumer; all mutations go through its operations,
//! which write through to storage before returning and then publish the new
//! snapshot on a watch channel. Surfaces subscribe to that channel instead
//! of re-reading storage, so every mounted surface renders the same cart.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::warn;

use starfruit_core::{Cart, CartError, ProductId, ProductSnapshot};

use crate::storage::CartStorage;
use crate::surface::CartSurface;

/// Shared, persisted cart store.
///
/// Cheaply cloneable; all clones observe and mutate the same cart.
/// Mutations are serialized by an internal lock, matching the one-action-
/// at-a-time model of the UI that drives them.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    cart: Mutex<Cart>,
    storage: CartStorage,
    tx: watch::Sender<Cart>,
}

impl CartStore {
    /// Open the store, hydrating from persisted storage.
    ///
    /// A missing or corrupted persisted cart hydrates as empty; the session
    /// starts fresh rather than failing.
    #[must_use]
    pub fn open(storage: CartStorage) -> Self {
        let cart = storage.load_cart();
        let (tx, _rx) = watch::channel(cart.clone());
        Self {
            inner: Arc::new(CartStoreInner {
                cart: Mutex::new(cart),
                storage,
                tx,
            }),
        }
    }

    /// Add `quantity_delta` units of `product`, merging by product id.
    ///
    /// The updated cart is persisted before this returns and every
    /// subscribed surface is notified.
    ///
    /// # Errors
    ///
    /// Returns `CartError` for a blank product id, negative price, or zero
    /// delta; nothing is mutated or persisted on error.
    pub fn add(
        &self,
        product: ProductSnapshot,
        quantity_delta: u32,
    ) -> Result<Cart, CartError> {
        self.try_apply(|cart| cart.add(product, quantity_delta))
    }

    /// Remove the line with the given id. Absence is a no-op.
    pub fn remove(&self, id: &ProductId) -> Cart {
        self.apply(|cart| cart.remove(id))
    }

    /// Overwrite the quantity for the given id; zero removes the line.
    pub fn set_quantity(&self, id: &ProductId, quantity: u32) -> Cart {
        self.apply(|cart| cart.set_quantity(id, quantity))
    }

    /// Empty the cart and remove its persisted key.
    ///
    /// Used after successful checkout: a subsequent [`CartStore::open`]
    /// against the same storage yields an empty cart.
    pub fn clear(&self) -> Cart {
        let mut cart = self.lock();
        cart.clear();
        let snapshot = cart.clone();
        if let Err(e) = self.inner.storage.clear_cart() {
            warn!("failed to clear persisted cart: {e}");
        }
        self.inner.tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Current cart total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock().total()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A snapshot of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Subscribe to cart changes. The receiver starts at the current
    /// snapshot and observes every subsequent mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.tx.subscribe()
    }

    /// A new surface bound to this store.
    #[must_use]
    pub fn surface(&self) -> CartSurface {
        CartSurface::new(self)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, op: impl FnOnce(&mut Cart)) -> Cart {
        let mut cart = self.lock();
        op(&mut cart);
        self.commit(&cart)
    }

    fn try_apply(
        &self,
        op: impl FnOnce(&mut Cart) -> Result<(), CartError>,
    ) -> Result<Cart, CartError> {
        let mut cart = self.lock();
        op(&mut cart)?;
        Ok(self.commit(&cart))
    }

    /// Write-through, then notify. The write precedes acknowledgment so a
    /// reload immediately after a mutation never loses it; a storage
    /// failure is non-fatal and the in-memory cart stays authoritative for
    /// the session.
    ///
    /// Called with the cart lock held: racing mutations through clones
    /// persist and notify in the same order they mutated, so durable state
    /// can never lag behind memory once a call has returned.
    fn commit(&self, cart: &Cart) -> Cart {
        let snapshot = cart.clone();
        if let Err(e) = self.inner.storage.save_cart(&snapshot) {
            warn!("cart persistence failed, continuing with in-memory cart: {e}");
        }
        self.inner.tx.send_replace(snapshot.clone());
        snapshot
    }
}

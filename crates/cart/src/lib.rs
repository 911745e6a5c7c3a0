//! Starfruit cart & checkout engine.
//!
//! The single source of truth for cart contents, shared by every surface
//! that renders it (sidebar widget, cart page), persisted across reloads,
//! and consumed by checkout.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - shared cart store; every mutation writes through
//!   to durable storage before returning and publishes the new snapshot to
//!   all subscribed surfaces
//! - [`storage`] - key-value persistence adapter (file-backed or in-memory)
//! - [`surface::CartSurface`] - a consumer of the store; surfaces observe
//!   change notifications instead of re-reading storage, so the sidebar and
//!   the cart page can never disagree
//! - [`buy_now::BuyNowSlot`] - single-item fast path, stored independently
//!   of the cart
//! - [`backend::BackendClient`] - REST clients for catalog lookup and order
//!   submission
//! - [`checkout::CheckoutSubmitter`] - converts the cart or the buy-now
//!   selection into one order submission and reconciles local state with
//!   the outcome
//!
//! # Example
//!
//! ```rust,ignore
//! use starfruit_cart::{BuyNowSlot, CartStorage, CartStore, JsonFileStorage};
//!
//! let storage = CartStorage::new(JsonFileStorage::new("/var/lib/starfruit"));
//! let store = CartStore::open(storage.clone());
//!
//! store.add(product, 1)?;
//! let mut sidebar = store.surface();
//! let view = sidebar.view(); // same snapshot every surface sees
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod buy_now;
pub mod checkout;
pub mod config;
pub mod storage;
pub mod store;
pub mod surface;
pub mod view;

pub use backend::{BackendClient, BackendError, CatalogProduct, ContactDetails, OrderConfirmation};
pub use buy_now::BuyNowSlot;
pub use checkout::{CheckoutError, CheckoutState, CheckoutSubmitter};
pub use config::{BackendConfig, CartConfig, ConfigError};
pub use storage::{CartStorage, JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
pub use surface::CartSurface;
pub use view::{CartView, LineItemView};

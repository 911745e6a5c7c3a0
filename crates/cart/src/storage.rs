//! Durable key-value persistence for the cart and the buy-now slot.
//!
//! The store writes through to a [`KeyValueStorage`] on every mutation so a
//! reload never loses a mutation that was already acknowledged. Storage is
//! deliberately forgiving on the read side: a missing or unparsable value
//! degrades to "cart is empty" with a warning, never an error, because
//! corrupted persistence must not block the surfaces.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use starfruit_core::{BuyNowSelection, Cart};

/// Well-known storage keys.
pub mod keys {
    /// Key holding the JSON-encoded cart.
    pub const CART: &str = "cart";

    /// Key holding the JSON-encoded buy-now selection.
    pub const BUY_NOW: &str = "buyNowProduct";
}

/// Errors from the persistence layer.
///
/// These never crash a surface: writes are logged and the in-memory store
/// stays authoritative, reads fall back to the empty value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (disk full, permissions).
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable single-key-atomic string storage.
///
/// The contract is the one the engine relies on: `put` either fully
/// replaces the value under a key or leaves the previous value intact.
pub trait KeyValueStorage: Send + Sync {
    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Remove `key`. Absence is a no-op.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JsonFileStorage
// =============================================================================

/// File-backed storage: one file per key under a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create storage rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage, used in tests and for sessions that opt out of
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// CartStorage
// =============================================================================

/// The persistence adapter: serializes the cart and the buy-now selection
/// into their well-known keys on any [`KeyValueStorage`].
#[derive(Clone)]
pub struct CartStorage {
    inner: Arc<dyn KeyValueStorage>,
}

impl CartStorage {
    /// Wrap a key-value backend.
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            inner: Arc::new(storage),
        }
    }

    /// In-memory storage, for tests and ephemeral sessions.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on serialization or write failure; callers
    /// log and carry on with the in-memory cart as the authority.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        self.save_slot(keys::CART, cart)
    }

    /// Load the persisted cart.
    ///
    /// An absent key or an unparsable value yields the empty cart; a parse
    /// failure is logged but never propagated.
    #[must_use]
    pub fn load_cart(&self) -> Cart {
        self.load_slot(keys::CART).unwrap_or_default()
    }

    /// Remove the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on delete failure.
    pub fn clear_cart(&self) -> Result<(), StorageError> {
        self.inner.delete(keys::CART)
    }

    /// Persist the buy-now selection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on serialization or write failure.
    pub fn save_buy_now(&self, selection: &BuyNowSelection) -> Result<(), StorageError> {
        self.save_slot(keys::BUY_NOW, selection)
    }

    /// Load the persisted buy-now selection, if any.
    #[must_use]
    pub fn load_buy_now(&self) -> Option<BuyNowSelection> {
        self.load_slot(keys::BUY_NOW)
    }

    /// Remove the persisted buy-now selection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on delete failure.
    pub fn clear_buy_now(&self) -> Result<(), StorageError> {
        self.inner.delete(keys::BUY_NOW)
    }

    fn save_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(value)?;
        self.inner.put(key, &encoded)
    }

    fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.inner.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read {key} from storage, treating as empty: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("stored {key} is unparsable, treating as empty: {e}");
                None
            }
        }
    }
}

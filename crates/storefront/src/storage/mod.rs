//! Key-value persistence port for client-local store snapshots.
//!
//! # Keys
//!
//! | Key | Contents |
//! |---|---|
//! | `enzobay-cart-storage` | `{"state":{"items":[...]},"version":0}` |
//! | `enzobay-wishlist-storage` | `{"state":{"items":[...]},"version":0}` |
//! | `enzobay-recently-viewed-storage` | `{"state":{"items":[...]},"version":0}` |
//! | `enzobay-auth-storage` | `{"state":{"user":...,"isAuthenticated":...},"version":0}` |
//! | `closedBanners` | bare JSON array of banner ids |
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, used for tests and the default server
//! - [`FileStorage`] - one `<key>.json` file per key under a data directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys used by the stores.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "enzobay-cart-storage";

    /// Wishlist products.
    pub const WISHLIST: &str = "enzobay-wishlist-storage";

    /// Recently viewed products (most recent first).
    pub const RECENTLY_VIEWED: &str = "enzobay-recently-viewed-storage";

    /// Signed-in user.
    pub const AUTH: &str = "enzobay-auth-storage";

    /// Banner ids dismissed this session.
    pub const CLOSED_BANNERS: &str = "closedBanners";
}

/// Snapshot schema version written alongside every versioned snapshot.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key-value store.
///
/// Implementations must be safe to share between threads; every store holds
/// an `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// How a store's state is laid out under its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `{"state": ..., "version": N}`.
    Versioned,
    /// The state serialized directly.
    Bare,
}

#[derive(Serialize)]
struct VersionedRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(serde::Deserialize)]
struct Versioned<T> {
    state: T,
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
}

/// Load and decode the snapshot under `key`.
///
/// # Errors
///
/// Returns `StorageError` if the backend fails or the snapshot is corrupt.
pub fn load_snapshot<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
    format: SnapshotFormat,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    let state = match format {
        SnapshotFormat::Versioned => serde_json::from_str::<Versioned<T>>(&raw)?.state,
        SnapshotFormat::Bare => serde_json::from_str(&raw)?,
    };
    Ok(Some(state))
}

/// Encode `state` and write it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub fn save_snapshot<T: Serialize>(
    storage: &dyn KeyValueStore,
    key: &str,
    format: SnapshotFormat,
    state: &T,
) -> Result<(), StorageError> {
    let raw = match format {
        SnapshotFormat::Versioned => serde_json::to_string(&VersionedRef {
            state,
            version: SNAPSHOT_VERSION,
        })?,
        SnapshotFormat::Bare => serde_json::to_string(state)?,
    };
    storage.set(key, &raw)
}

//! Reactive client-state stores.
//!
//! Each store keeps its state in a [`tokio::sync::watch`] channel: mutations
//! go through the sender and every subscriber sees the new snapshot. After
//! each effective mutation the full state is written to the key-value port
//! under the store's fixed key, and a new store rehydrates from that key.
//!
//! Persistence is best-effort. A failed write is logged and the in-memory
//! state stays authoritative; a corrupt snapshot on load is logged and
//! replaced with empty state. Callers for whom the snapshot is the only
//! lasting result (the CLI) call `flush` to surface write failures.

pub mod auth;
pub mod cart;
pub mod closed_banners;
pub mod recently_viewed;
pub mod wishlist;

pub use auth::{AuthState, AuthStore};
pub use cart::{CartState, CartStore};
pub use closed_banners::ClosedBannersStore;
pub use recently_viewed::{RecentlyViewedState, RecentlyViewedStore};
pub use wishlist::{WishlistState, WishlistStore};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::storage::{KeyValueStore, SnapshotFormat, StorageError, load_snapshot, save_snapshot};

/// State container shared by all concrete stores.
pub struct PersistedStore<T> {
    key: &'static str,
    format: SnapshotFormat,
    storage: Arc<dyn KeyValueStore>,
    sender: watch::Sender<T>,
}

impl<T> PersistedStore<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Build a store, rehydrating from `key` if a snapshot exists.
    pub fn hydrate(storage: Arc<dyn KeyValueStore>, key: &'static str, format: SnapshotFormat) -> Self {
        let state = match load_snapshot::<T>(storage.as_ref(), key, format) {
            Ok(Some(state)) => {
                tracing::debug!(key, "store rehydrated");
                state
            }
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable store snapshot");
                T::default()
            }
        };

        Self {
            key,
            format,
            storage,
            sender: watch::Sender::new(state),
        }
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Subscribe to state changes.
    ///
    /// The receiver starts with the current state marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Apply a mutation.
    ///
    /// `f` returns whether it changed anything; only effective changes
    /// notify subscribers and are persisted.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = self.sender.send_if_modified(f);
        if changed {
            self.persist();
        }
        changed
    }

    /// Replace the state with its default and persist it.
    pub fn reset(&self) {
        self.sender.send_modify(|state| *state = T::default());
        self.persist();
    }

    /// Write the current state to storage and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or written.
    pub fn flush(&self) -> Result<(), StorageError> {
        let state = self.sender.borrow();
        save_snapshot(self.storage.as_ref(), self.key, self.format, &*state)
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(key = self.key, error = %e, "failed to persist store snapshot");
        }
    }
}

impl<T: Clone> PersistedStore<T> {
    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.sender.borrow().clone()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn store(storage: Arc<dyn KeyValueStore>) -> PersistedStore<Vec<u32>> {
        PersistedStore::hydrate(storage, "numbers", SnapshotFormat::Versioned)
    }

    #[test]
    fn test_update_persists_and_rehydrates() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let numbers = store(storage.clone());
        assert!(numbers.update(|v| {
            v.push(7);
            true
        }));

        let rebuilt = store(storage);
        assert_eq!(rebuilt.snapshot(), vec![7]);
    }

    #[test]
    fn test_noop_update_does_not_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let numbers = store(storage.clone());
        assert!(!numbers.update(|_| false));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let numbers = store(Arc::new(MemoryStorage::new()));
        let mut rx = numbers.subscribe();

        numbers.update(|v| {
            v.push(1);
            true
        });
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), vec![1]);

        numbers.update(|_| false);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("numbers", "[[[").unwrap();
        let numbers = store(storage);
        assert!(numbers.snapshot().is_empty());
    }

    struct FailingStorage;

    impl KeyValueStore for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let numbers = store(Arc::new(FailingStorage));
        numbers.update(|v| {
            v.push(3);
            true
        });
        assert_eq!(numbers.snapshot(), vec![3]);
        assert!(matches!(numbers.flush(), Err(StorageError::Poisoned)));
    }

    #[test]
    fn test_flush_writes_current_state() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let numbers = store(storage.clone());
        numbers.update(|v| {
            v.push(9);
            true
        });
        storage.clear().unwrap();

        numbers.flush().unwrap();
        assert_eq!(store(storage).snapshot(), vec![9]);
    }
}

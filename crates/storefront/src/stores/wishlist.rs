//! Wishlist store: a set of products keyed by id, in the order they were saved.

use std::sync::Arc;

use enzobay_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::PersistedStore;
use crate::storage::{KeyValueStore, SnapshotFormat, StorageError, keys};

/// Persisted wishlist state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistState {
    pub items: Vec<Product>,
}

/// Wishlist store persisted under `enzobay-wishlist-storage`.
pub struct WishlistStore {
    inner: PersistedStore<WishlistState>,
}

impl WishlistStore {
    /// Build the store, rehydrating any saved wishlist.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::hydrate(storage, keys::WISHLIST, SnapshotFormat::Versioned),
        }
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add_item(&self, product: Product) -> bool {
        self.inner.update(|state| {
            if state.items.iter().any(|p| p.id == product.id) {
                return false;
            }
            state.items.push(product);
            true
        })
    }

    /// Remove a product. Returns whether it was present.
    pub fn remove_item(&self, id: &ProductId) -> bool {
        self.inner.update(|state| {
            let before = state.items.len();
            state.items.retain(|p| &p.id != id);
            state.items.len() != before
        })
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle(&self, product: Product) -> bool {
        if self.remove_item(&product.id) {
            false
        } else {
            self.add_item(product)
        }
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.inner.read(|state| state.items.iter().any(|p| &p.id == id))
    }

    pub fn clear_wishlist(&self) {
        self.inner.update(|state| {
            let had_items = !state.items.is_empty();
            state.items.clear();
            had_items
        });
    }

    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.inner.read(|state| state.items.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read(|state| state.items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the wishlist to storage, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.inner.flush()
    }

    /// Subscribe to wishlist changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WishlistState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::stores::test_support::product;

    fn wishlist() -> WishlistStore {
        WishlistStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_membership_follows_add_and_remove() {
        let wishlist = wishlist();
        let id = ProductId::new("p-3");

        wishlist.add_item(product("p-3", 10, None));
        assert!(wishlist.is_in_wishlist(&id));

        wishlist.remove_item(&id);
        assert!(!wishlist.is_in_wishlist(&id));
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let wishlist = wishlist();
        assert!(wishlist.add_item(product("p-1", 10, None)));
        assert!(!wishlist.add_item(product("p-1", 10, None)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let wishlist = wishlist();
        assert!(wishlist.toggle(product("p-1", 10, None)));
        assert!(!wishlist.toggle(product("p-1", 10, None)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_clear_and_rehydrate() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let wishlist = WishlistStore::new(storage.clone());
        wishlist.add_item(product("p-1", 10, None));
        wishlist.add_item(product("p-2", 10, None));
        assert_eq!(WishlistStore::new(storage.clone()).len(), 2);

        wishlist.clear_wishlist();
        assert!(WishlistStore::new(storage).is_empty());
    }
}

//! Recently-viewed store: most recent first, de-duplicated, capped.

use std::sync::Arc;

use enzobay_core::Product;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::PersistedStore;
use crate::storage::{KeyValueStore, SnapshotFormat, keys};

/// Maximum number of products remembered.
pub const MAX_RECENTLY_VIEWED: usize = 10;

/// Persisted recently-viewed state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentlyViewedState {
    pub items: Vec<Product>,
}

/// Recently-viewed store persisted under `enzobay-recently-viewed-storage`.
pub struct RecentlyViewedStore {
    inner: PersistedStore<RecentlyViewedState>,
}

impl RecentlyViewedStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::hydrate(
                storage,
                keys::RECENTLY_VIEWED,
                SnapshotFormat::Versioned,
            ),
        }
    }

    /// Record a view: drop any earlier entry for the product, put it first,
    /// and keep at most [`MAX_RECENTLY_VIEWED`] entries.
    pub fn add_item(&self, product: Product) {
        self.inner.update(|state| {
            state.items.retain(|p| p.id != product.id);
            state.items.insert(0, product);
            state.items.truncate(MAX_RECENTLY_VIEWED);
            true
        });
    }

    pub fn clear_items(&self) {
        self.inner.update(|state| {
            let had_items = !state.items.is_empty();
            state.items.clear();
            had_items
        });
    }

    /// Remembered products, most recent first.
    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.inner.read(|state| state.items.clone())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RecentlyViewedState> {
        self.inner.subscribe()
    }
}

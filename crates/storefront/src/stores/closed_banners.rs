//! Banners the visitor dismissed during the current session.

use std::collections::BTreeSet;
use std::sync::Arc;

use enzobay_core::{Banner, BannerId};
use tokio::sync::watch;

use super::PersistedStore;
use crate::storage::{KeyValueStore, SnapshotFormat, StorageError, keys};

/// Dismissed banner ids, persisted as a bare JSON array under `closedBanners`.
pub struct ClosedBannersStore {
    inner: PersistedStore<BTreeSet<BannerId>>,
}

impl ClosedBannersStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::hydrate(storage, keys::CLOSED_BANNERS, SnapshotFormat::Bare),
        }
    }

    /// Hide a banner for the rest of the session.
    pub fn dismiss(&self, id: BannerId) -> bool {
        self.inner.update(|closed| closed.insert(id))
    }

    #[must_use]
    pub fn is_dismissed(&self, id: &BannerId) -> bool {
        self.inner.read(|closed| closed.contains(id))
    }

    /// Drop dismissed banners from `banners`, keeping order.
    #[must_use]
    pub fn visible(&self, banners: Vec<Banner>) -> Vec<Banner> {
        self.inner.read(|closed| {
            banners
                .into_iter()
                .filter(|banner| !closed.contains(&banner.id))
                .collect()
        })
    }

    /// Start a new session with nothing dismissed.
    pub fn reset(&self) {
        self.inner.reset();
    }

    /// Write the dismissed set to storage, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.inner.flush()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BTreeSet<BannerId>> {
        self.inner.subscribe()
    }
}

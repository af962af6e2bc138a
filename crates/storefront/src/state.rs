//! Application state shared across handlers.

use std::sync::Arc;

use crate::banners::BannerService;
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::{StorageBackend, StorefrontConfig};
use crate::services::{AuthError, AuthService, OrderService};
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
use crate::stores::{
    AuthStore, CartStore, ClosedBannersStore, RecentlyViewedStore, WishlistStore,
};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("account seeding failed: {0}")]
    Auth(#[from] AuthError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every store reads and writes
/// through the same `KeyValueStore`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    clock: Arc<dyn Clock>,
    catalog: Catalog,
    cart: CartStore,
    wishlist: WishlistStore,
    recently_viewed: RecentlyViewedStore,
    auth: AuthStore,
    closed_banners: ClosedBannersStore,
    banners: BannerService,
    orders: OrderService,
    accounts: AuthService,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Opens the configured storage backend and, when enabled, seeds the
    /// demo accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be opened or an account
    /// password cannot be hashed.
    pub async fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storage: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::open(&config.data_dir)?),
        };
        let accounts = if config.demo_accounts {
            AuthService::with_demo_accounts().await?
        } else {
            AuthService::new()
        };

        Ok(Self::from_parts(
            config,
            storage,
            Arc::new(SystemClock),
            accounts,
        ))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        accounts: AuthService,
    ) -> Self {
        let banners = BannerService::builtin(config.mock_latency, Arc::clone(&clock));
        let orders = OrderService::new(config.checkout, config.mock_latency, Arc::clone(&clock));

        Self {
            inner: Arc::new(AppStateInner {
                catalog: Catalog::builtin(),
                cart: CartStore::new(Arc::clone(&storage)),
                wishlist: WishlistStore::new(Arc::clone(&storage)),
                recently_viewed: RecentlyViewedStore::new(Arc::clone(&storage)),
                auth: AuthStore::new(Arc::clone(&storage)),
                closed_banners: ClosedBannersStore::new(storage),
                banners,
                orders,
                accounts,
                clock,
                config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn recently_viewed(&self) -> &RecentlyViewedStore {
        &self.inner.recently_viewed
    }

    /// Signed-in user store.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    #[must_use]
    pub fn closed_banners(&self) -> &ClosedBannersStore {
        &self.inner.closed_banners
    }

    #[must_use]
    pub fn banners(&self) -> &BannerService {
        &self.inner.banners
    }

    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Account directory used for login and registration.
    #[must_use]
    pub fn accounts(&self) -> &AuthService {
        &self.inner.accounts
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::FixedClock;

    /// In-memory state with no latency, no demo accounts and a clock fixed
    /// at 2024-06-15 12:00 UTC.
    pub(crate) fn test_state() -> AppState {
        test_state_with_latency(Duration::ZERO)
    }

    /// Like [`test_state`], with simulated service latency.
    pub(crate) fn test_state_with_latency(latency: Duration) -> AppState {
        let config = StorefrontConfig {
            mock_latency: latency,
            demo_accounts: false,
            ..StorefrontConfig::default()
        };
        let now = Utc
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .unwrap_or_default();
        AppState::from_parts(
            config,
            Arc::new(MemoryStorage::new()),
            Arc::new(FixedClock(now)),
            AuthService::new(),
        )
    }
}

//! Banner service.
//!
//! Mimics a remote banner API over a static list. Every call waits for the
//! configured latency before answering; nothing can fail, and "not found" is
//! `None`.

mod data;

pub use data::builtin_banners;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use enzobay_core::{Banner, BannerId, BannerPosition};
use tracing::instrument;

use crate::clock::Clock;

/// Serves banners from an in-memory list.
pub struct BannerService {
    banners: Vec<Banner>,
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl BannerService {
    /// Create a service over `banners`.
    #[must_use]
    pub fn new(banners: Vec<Banner>, latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            banners,
            latency,
            clock,
        }
    }

    /// Create a service over the built-in banner list.
    #[must_use]
    pub fn builtin(latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::new(builtin_banners(), latency, clock)
    }

    /// Live banners for a page slot, highest precedence (lowest priority) first.
    #[instrument(skip(self))]
    pub async fn get_banners_by_position(&self, position: BannerPosition) -> Vec<Banner> {
        self.simulate_latency().await;
        let banners = self.live_at(position, self.clock.now());
        tracing::debug!(count = banners.len(), "banners selected");
        banners
    }

    /// Every banner regardless of status or window, ordered by priority.
    pub async fn get_all_banners(&self) -> Vec<Banner> {
        self.simulate_latency().await;
        let mut banners = self.banners.clone();
        banners.sort_by_key(|banner| banner.priority);
        banners
    }

    #[instrument(skip(self))]
    pub async fn get_banner_by_id(&self, id: &BannerId) -> Option<Banner> {
        self.simulate_latency().await;
        self.banners.iter().find(|banner| &banner.id == id).cloned()
    }

    /// Banners for `position` that are live at `now`.
    ///
    /// The sort is stable, so equal priorities keep list order.
    #[must_use]
    pub fn live_at(&self, position: BannerPosition, now: DateTime<Utc>) -> Vec<Banner> {
        let mut banners: Vec<Banner> = self
            .banners
            .iter()
            .filter(|banner| banner.position == position && banner.is_live_at(now))
            .cloned()
            .collect();
        banners.sort_by_key(|banner| banner.priority);
        banners
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

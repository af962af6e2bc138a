//! Promotional banners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::BannerId;
use super::status::{BannerAnimation, BannerPosition, BannerSize, BannerStatus};

/// A promotional element bound to a page slot and an optional date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cta_text: String,
    pub cta_link: String,
    pub image: String,
    pub position: BannerPosition,
    pub status: BannerStatus,
    /// Sort key; lower values are shown first.
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub style: BannerStyle,
}

/// Presentation attributes for a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerStyle {
    pub background_color: String,
    pub text_color: String,
    #[serde(default)]
    pub animation: BannerAnimation,
    #[serde(default)]
    pub size: BannerSize,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#111827".to_string(),
            animation: BannerAnimation::default(),
            size: BannerSize::default(),
        }
    }
}

impl Banner {
    /// Whether the banner is active and `now` falls inside its date window.
    ///
    /// Both bounds are inclusive; a missing bound is open.
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.status == BannerStatus::Active
            && self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| end >= now)
    }
}

//! Status and slot enums for various entities.

use serde::{Deserialize, Serialize};

/// Page slot a banner is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerPosition {
    HomeTop,
    HomeMiddle,
    HomeBottom,
    CategoryTop,
    ProductSidebar,
    CheckoutTop,
}

impl BannerPosition {
    /// Every slot, in page order.
    pub const ALL: [Self; 6] = [
        Self::HomeTop,
        Self::HomeMiddle,
        Self::HomeBottom,
        Self::CategoryTop,
        Self::ProductSidebar,
        Self::CheckoutTop,
    ];

    /// Wire name of the slot (`home_top`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HomeTop => "home_top",
            Self::HomeMiddle => "home_middle",
            Self::HomeBottom => "home_bottom",
            Self::CategoryTop => "category_top",
            Self::ProductSidebar => "product_sidebar",
            Self::CheckoutTop => "checkout_top",
        }
    }
}

impl std::fmt::Display for BannerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BannerPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| format!("invalid banner position: {s}"))
    }
}

/// Whether a banner may be shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BannerStatus {
    #[default]
    Active,
    Inactive,
}

/// Entrance animation for a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BannerAnimation {
    #[default]
    None,
    Fade,
    Slide,
    Zoom,
}

/// Rendered size of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BannerSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Orders can be cancelled until they leave the warehouse.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Seller,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Seller => write!(f, "seller"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

//! Product reference data.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Money, apply_discount};

/// A catalog product.
///
/// Products are immutable reference data; stores hold clones of them.
/// Serialized in camelCase so persisted snapshots match the client's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// List price before discount.
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub description: String,
    /// Ordered image URLs; the first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Percentage discount, e.g. `10` for 10% off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantOptions>,
}

const fn default_in_stock() -> bool {
    true
}

/// Selectable variant dimensions for a product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptions {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl Product {
    /// Price after applying the product's discount, if any.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        apply_discount(self.price, self.discount)
    }

    /// Discounted price with currency attached.
    #[must_use]
    pub fn sale_price(&self) -> Money {
        Money::new(self.discounted_price(), self.currency)
    }

    /// The primary image, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Number of tags shared with another product.
    #[must_use]
    pub fn shared_tags(&self, other: &Self) -> usize {
        self.tags.intersection(&other.tags).count()
    }
}

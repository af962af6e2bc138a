//! Product catalog.
//!
//! An immutable in-memory product list. Every query is a linear scan; the
//! list is small enough that nothing is indexed.
//!
//! Every product is priced in one currency, so cart and order totals can
//! sum line prices directly.

mod data;

pub use data::builtin_products;

use std::cmp::Ordering;

use enzobay_core::{Product, ProductId};

/// Default number of similar products returned.
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;

const SAME_CATEGORY_SCORE: usize = 3;
const SAME_BRAND_SCORE: usize = 1;

/// Read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Catalog over the built-in product list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_products())
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in `category`, compared case-insensitively.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.products.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Case-insensitive substring search over name, brand, category and tags.
    ///
    /// A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.brand
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&needle))
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Products related to `id`.
    ///
    /// Each other product scores 3 for sharing the category, 1 per shared
    /// tag, and 1 for sharing the brand. Zero scores are dropped; the rest
    /// are ordered by score, then rating, then id, and cut to `limit`.
    /// An unknown id yields nothing.
    #[must_use]
    pub fn similar_products(&self, id: &ProductId, limit: usize) -> Vec<&Product> {
        let Some(target) = self.get(id) else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, &Product)> = self
            .products
            .iter()
            .filter(|p| &p.id != id)
            .map(|p| (similarity(target, p), p))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .cmp(score_a)
                .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
                .then_with(|| a.id.cmp(&b.id))
        });

        scored.into_iter().take(limit).map(|(_, p)| p).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn similarity(target: &Product, candidate: &Product) -> usize {
    let mut score = target.shared_tags(candidate);
    if target.category == candidate.category {
        score += SAME_CATEGORY_SCORE;
    }
    if target.brand.is_some() && target.brand == candidate.brand {
        score += SAME_BRAND_SCORE;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.all().len(), 16);
        assert_eq!(
            catalog.categories(),
            vec!["beauty", "books", "electronics", "fashion", "home", "sports"]
        );
    }

    #[test]
    fn test_builtin_catalog_uses_one_currency() {
        let catalog = Catalog::builtin();
        assert!(
            catalog
                .all()
                .iter()
                .all(|p| p.currency == enzobay_core::CurrencyCode::USD)
        );
    }

    #[test]
    fn test_get_and_by_category() {
        let catalog = Catalog::builtin();
        assert!(catalog.get(&ProductId::new("p-1")).is_some());
        assert!(catalog.get(&ProductId::new("p-99")).is_none());
        assert_eq!(catalog.by_category("Electronics").len(), 4);
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.search("soundmax")), vec!["p-1", "p-3"]);
        assert!(catalog.search("   ").is_empty());
        assert!(!catalog.search("FITNESS").is_empty());
    }

    #[test]
    fn test_similar_products_prefers_category_and_tags() {
        let catalog = Catalog::builtin();
        let similar = catalog.similar_products(&ProductId::new("p-1"), DEFAULT_SIMILAR_LIMIT);

        // Speaker shares category, brand and three tags; watch shares
        // category and one tag; laptop only the category.
        assert_eq!(ids(&similar), vec!["p-3", "p-2", "p-4"]);
        assert!(similar.iter().all(|p| p.id.as_str() != "p-1"));
    }

    #[test]
    fn test_similar_products_respects_limit_and_unknown_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.similar_products(&ProductId::new("p-11"), 2).len(), 2);
        assert!(catalog.similar_products(&ProductId::new("missing"), 4).is_empty());
    }

    #[test]
    fn test_similar_products_drops_unrelated() {
        let catalog = Catalog::builtin();
        let similar = catalog.similar_products(&ProductId::new("p-14"), 16);
        // The book shares only the "work" tag with the laptop and lamp.
        assert_eq!(ids(&similar), vec!["p-4", "p-10"]);
    }
}

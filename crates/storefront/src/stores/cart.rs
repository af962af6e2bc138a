//! Cart store.
//!
//! Holds an ordered list of cart lines, at most one per product id. Lines
//! never hold a quantity below one: a zero quantity removes the line.

use std::sync::Arc;

use enzobay_core::{CartItem, CurrencyCode, Money, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::PersistedStore;
use crate::storage::{KeyValueStore, SnapshotFormat, StorageError, keys};

/// Persisted cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Σ(discounted price × quantity).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Currency of the cart, taken from its first line.
    ///
    /// The catalog prices everything in one currency, so the first line
    /// speaks for the whole cart and `total` needs no conversion.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.items
            .first()
            .map(|item| item.product.currency)
            .unwrap_or_default()
    }
}

/// Cart store persisted under `enzobay-cart-storage`.
pub struct CartStore {
    inner: PersistedStore<CartState>,
}

impl CartStore {
    /// Build the store, rehydrating any saved cart.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::hydrate(storage, keys::CART, SnapshotFormat::Versioned),
        }
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// There is no stock check; a quantity of zero counts as one.
    pub fn add_item(&self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        self.inner.update(|state| {
            if let Some(item) = state.items.iter_mut().find(|i| i.product.id == product.id) {
                item.quantity = item.quantity.saturating_add(quantity);
            } else {
                state.items.push(CartItem::new(product, quantity));
            }
            true
        });
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&self, id: &ProductId) -> bool {
        self.inner.update(|state| {
            let before = state.items.len();
            state.items.retain(|item| &item.product.id != id);
            state.items.len() != before
        })
    }

    /// Overwrite the quantity of the line for `id`.
    ///
    /// A quantity of zero removes the line. Returns whether the cart changed.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }
        self.inner.update(|state| {
            match state.items.iter_mut().find(|item| &item.product.id == id) {
                Some(item) if item.quantity != quantity => {
                    item.quantity = quantity;
                    true
                }
                _ => false,
            }
        })
    }

    /// Take ordered quantities out of the cart.
    ///
    /// Each ordered line lowers the matching cart line by its quantity and
    /// drops the line once nothing is left. Lines added or topped up after
    /// the order was taken keep the difference. Returns whether the cart
    /// changed.
    pub fn remove_ordered(&self, ordered: &[CartItem]) -> bool {
        self.inner.update(|state| {
            let mut changed = false;
            for line in ordered {
                if let Some(item) = state
                    .items
                    .iter_mut()
                    .find(|item| item.product.id == line.product.id)
                {
                    item.quantity = item.quantity.saturating_sub(line.quantity);
                    changed = true;
                }
            }
            state.items.retain(|item| item.quantity > 0);
            changed
        })
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.inner.update(|state| {
            let had_items = !state.items.is_empty();
            state.items.clear();
            had_items
        });
    }

    /// Current cart lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.read(|state| state.items.clone())
    }

    /// Σ(discounted price × quantity), computed on demand.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.inner.read(CartState::total)
    }

    /// Cart total with the cart's currency attached.
    #[must_use]
    pub fn cart_total_money(&self) -> Money {
        self.inner
            .read(|state| Money::new(state.total(), state.currency()))
    }

    /// Σ quantity.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner.read(CartState::item_count)
    }

    /// Whether `id` is in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.inner
            .read(|state| state.items.iter().any(|item| &item.product.id == id))
    }

    /// Full state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.inner.snapshot()
    }

    /// Write the cart to storage, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.inner.flush()
    }

    /// Subscribe to cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::stores::test_support::product;

    fn cart() -> CartStore {
        CartStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_total_applies_discount() {
        let cart = cart();
        cart.add_item(product("p-1", 1000, Some(10)), 2);
        assert_eq!(cart.cart_total(), Decimal::new(1800, 0));
    }

    #[test]
    fn test_adding_same_product_merges_lines() {
        let cart = cart();
        cart.add_item(product("p-1", 10, None), 1);
        cart.add_item(product("p-1", 10, None), 3);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 4);
    }

    #[test]
    fn test_item_count_tracks_present_lines() {
        let cart = cart();
        cart.add_item(product("a", 1, None), 2);
        cart.add_item(product("b", 1, None), 3);
        cart.add_item(product("c", 1, None), 1);
        assert_eq!(cart.item_count(), 6);

        assert!(cart.remove_item(&ProductId::new("b")));
        assert_eq!(cart.item_count(), 3);

        cart.add_item(product("a", 1, None), 5);
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let cart = cart();
        cart.add_item(product("a", 1, None), 1);
        assert!(!cart.remove_item(&ProductId::new("zzz")));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let cart = cart();
        cart.add_item(product("a", 5, None), 1);
        assert!(cart.update_quantity(&ProductId::new("a"), 7));
        assert_eq!(cart.item_count(), 7);
        assert!(!cart.update_quantity(&ProductId::new("missing"), 2));
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let cart = cart();
        cart.add_item(product("a", 5, None), 4);
        assert!(cart.update_quantity(&ProductId::new("a"), 0));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let cart = cart();
        cart.add_item(product("a", 5, None), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let cart = cart();
        for id in ["c", "a", "b"] {
            cart.add_item(product(id, 1, None), 1);
        }
        cart.add_item(product("a", 1, None), 1);

        let ids: Vec<_> = cart.items().into_iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![ProductId::new("c"), ProductId::new("a"), ProductId::new("b")]);
    }

    #[test]
    fn test_cart_survives_rebuild() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(storage.clone());
        cart.add_item(product("a", 20, Some(50)), 3);
        drop(cart);

        let cart = CartStore::new(storage);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.cart_total(), Decimal::new(30, 0));
    }

    #[test]
    fn test_remove_ordered_keeps_later_additions() {
        let cart = cart();
        cart.add_item(product("a", 10, None), 2);
        let ordered = cart.items();

        cart.add_item(product("a", 10, None), 1);
        cart.add_item(product("b", 5, None), 4);

        assert!(cart.remove_ordered(&ordered));
        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product.id, ProductId::new("a"));
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[1].quantity, 4);
    }

    #[test]
    fn test_remove_ordered_drops_exhausted_lines() {
        let cart = cart();
        cart.add_item(product("a", 10, None), 2);
        cart.add_item(product("b", 5, None), 1);
        let ordered = cart.items();

        // A line removed meanwhile is simply skipped.
        cart.remove_item(&ProductId::new("b"));
        assert!(cart.remove_ordered(&ordered));
        assert!(cart.items().is_empty());
        assert!(!cart.remove_ordered(&ordered));
    }

    #[test]
    fn test_clear_cart() {
        let cart = cart();
        cart.add_item(product("a", 20, None), 3);
        cart.clear_cart();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.cart_total(), Decimal::ZERO);
        assert_eq!(cart.cart_total_money().display(), "$0.00");
    }
}

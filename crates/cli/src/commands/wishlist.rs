//! Wishlist commands over the file-backed wishlist snapshot.

use std::path::Path;

use enzobay_core::ProductId;
use enzobay_storefront::catalog::Catalog;
use enzobay_storefront::stores::WishlistStore;

use super::{CliError, find_product, open_storage, product_lines};

fn open(data_dir: &Path) -> Result<WishlistStore, CliError> {
    Ok(WishlistStore::new(open_storage(data_dir)?))
}

fn render(wishlist: &WishlistStore) -> String {
    let items = wishlist.items();
    if items.is_empty() {
        return "Wishlist is empty\n".to_string();
    }
    product_lines(&items)
}

/// Show the saved wishlist.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened.
pub fn show(data_dir: &Path) -> Result<String, CliError> {
    Ok(render(&open(data_dir)?))
}

/// Save the product if absent, remove it if present.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` for an unknown id, or
/// `CliError::Storage` if the wishlist cannot be saved.
pub fn toggle(data_dir: &Path, id: &str) -> Result<String, CliError> {
    let product = find_product(&Catalog::builtin(), id)?;
    let wishlist = open(data_dir)?;
    let saved = wishlist.toggle(product);
    wishlist.flush()?;
    let verb = if saved { "Saved" } else { "Removed" };
    Ok(format!("{verb} {id}\n{}", render(&wishlist)))
}

/// Remove a product from the saved wishlist.
///
/// # Errors
///
/// Returns `CliError::NotPresent` if the product is not saved.
pub fn remove(data_dir: &Path, id: &str) -> Result<String, CliError> {
    let wishlist = open(data_dir)?;
    if !wishlist.remove_item(&ProductId::new(id)) {
        return Err(CliError::NotPresent(id.to_owned(), "wishlist"));
    }
    wishlist.flush()?;
    Ok(render(&wishlist))
}

/// Empty the saved wishlist.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened.
pub fn clear(data_dir: &Path) -> Result<String, CliError> {
    let wishlist = open(data_dir)?;
    wishlist.clear_wishlist();
    wishlist.flush()?;
    Ok(render(&wishlist))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let dir = std::env::temp_dir().join(format!("enzobay-cli-{}", uuid::Uuid::new_v4()));

        let out = toggle(&dir, "p-11").unwrap();
        assert!(out.starts_with("Saved p-11"));
        assert!(show(&dir).unwrap().contains("Yoga Mat Pro"));

        let out = toggle(&dir, "p-11").unwrap();
        assert!(out.starts_with("Removed p-11"));
        assert!(out.ends_with("Wishlist is empty\n"));

        assert!(matches!(remove(&dir, "p-11"), Err(CliError::NotPresent(..))));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unsaved_toggle_is_an_error() {
        let dir = std::env::temp_dir().join(format!("enzobay-cli-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("enzobay-wishlist-storage.json.tmp")).unwrap();

        assert!(matches!(toggle(&dir, "p-4"), Err(CliError::Storage(_))));
        assert_eq!(show(&dir).unwrap(), "Wishlist is empty\n");

        std::fs::remove_dir_all(dir).ok();
    }
}

//! Cart commands over the file-backed cart snapshot.
//!
//! # Usage
//!
//! ```bash
//! enzobay-cli cart show
//! enzobay-cli cart add p-1 -q 2
//! enzobay-cli cart set p-1 5
//! enzobay-cli cart remove p-1
//! enzobay-cli cart clear
//! ```

use std::fmt::Write as _;
use std::path::Path;

use enzobay_core::ProductId;
use enzobay_storefront::catalog::Catalog;
use enzobay_storefront::stores::CartStore;

use super::{CliError, find_product, open_storage};

fn open(data_dir: &Path) -> Result<CartStore, CliError> {
    Ok(CartStore::new(open_storage(data_dir)?))
}

/// Render the cart lines and total.
fn render(cart: &CartStore) -> String {
    let items = cart.items();
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in &items {
        let _ = writeln!(
            out,
            "{:<6} {:<40} {:>3} x {:>10}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.sale_price().display()
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), total {}",
        cart.item_count(),
        cart.cart_total_money().display()
    );
    out
}

/// Show the saved cart.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened.
pub fn show(data_dir: &Path) -> Result<String, CliError> {
    Ok(render(&open(data_dir)?))
}

/// Add a catalog product to the saved cart.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` for an unknown id, or
/// `CliError::Storage` if the cart cannot be saved.
pub fn add(data_dir: &Path, id: &str, quantity: u32) -> Result<String, CliError> {
    let product = find_product(&Catalog::builtin(), id)?;
    let cart = open(data_dir)?;
    cart.add_item(product, quantity);
    cart.flush()?;
    tracing::info!(product_id = id, quantity, "added to cart");
    Ok(render(&cart))
}

/// Overwrite a line's quantity; zero removes it.
///
/// # Errors
///
/// Returns `CliError::NotPresent` if the product is not in the cart.
pub fn set(data_dir: &Path, id: &str, quantity: u32) -> Result<String, CliError> {
    let cart = open(data_dir)?;
    let id = ProductId::new(id);
    if !cart.contains(&id) {
        return Err(CliError::NotPresent(id.to_string(), "cart"));
    }
    cart.update_quantity(&id, quantity);
    cart.flush()?;
    Ok(render(&cart))
}

/// Remove a line from the saved cart.
///
/// # Errors
///
/// Returns `CliError::NotPresent` if the product is not in the cart.
pub fn remove(data_dir: &Path, id: &str) -> Result<String, CliError> {
    let cart = open(data_dir)?;
    if !cart.remove_item(&ProductId::new(id)) {
        return Err(CliError::NotPresent(id.to_owned(), "cart"));
    }
    cart.flush()?;
    Ok(render(&cart))
}

/// Empty the saved cart.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened or
/// the cart cannot be saved.
pub fn clear(data_dir: &Path) -> Result<String, CliError> {
    let cart = open(data_dir)?;
    cart.clear_cart();
    cart.flush()?;
    Ok(render(&cart))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("enzobay-cli-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_cart_persists_between_invocations() {
        let dir = temp_dir();

        add(&dir, "p-3", 2).unwrap();
        let out = add(&dir, "p-3", 1).unwrap();
        assert!(out.contains("3 item(s), total $179.97"));

        let out = show(&dir).unwrap();
        assert!(out.contains("Portable Bluetooth Speaker"));

        let out = set(&dir, "p-3", 0).unwrap();
        assert_eq!(out, "Cart is empty\n");

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_lines_are_errors() {
        let dir = temp_dir();

        assert!(matches!(remove(&dir, "p-1"), Err(CliError::NotPresent(..))));
        assert!(matches!(set(&dir, "p-1", 2), Err(CliError::NotPresent(..))));
        assert!(matches!(add(&dir, "p-99", 1), Err(CliError::ProductNotFound(_))));
        assert_eq!(clear(&dir).unwrap(), "Cart is empty\n");

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unsaved_cart_is_an_error() {
        let dir = temp_dir();
        // A directory where the temp snapshot goes makes every write fail.
        std::fs::create_dir_all(dir.join("enzobay-cart-storage.json.tmp")).unwrap();

        assert!(matches!(add(&dir, "p-1", 2), Err(CliError::Storage(_))));
        assert_eq!(show(&dir).unwrap(), "Cart is empty\n");

        std::fs::remove_dir_all(dir).ok();
    }
}

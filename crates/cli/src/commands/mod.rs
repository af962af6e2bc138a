//! Subcommand implementations.
//!
//! Each command renders its output to a `String`; `main` prints it. Store
//! commands read and write the same `<key>.json` snapshots the storefront
//! uses with `STOREFRONT_STORAGE=file`.

pub mod banners;
pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use enzobay_core::{Product, ProductId};
use enzobay_storefront::catalog::Catalog;
use enzobay_storefront::storage::{FileStorage, KeyValueStore, StorageError};
use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The data directory could not be opened or a snapshot not saved.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No product has this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No banner has this id.
    #[error("Banner not found: {0}")]
    BannerNotFound(String),

    /// The item is not in the cart or wishlist.
    #[error("{0} is not in the {1}")]
    NotPresent(String, &'static str),
}

/// Open the snapshot directory shared with the storefront.
fn open_storage(data_dir: &Path) -> Result<Arc<dyn KeyValueStore>, CliError> {
    Ok(Arc::new(FileStorage::open(data_dir)?))
}

/// Look up a product in the built-in catalog.
fn find_product(catalog: &Catalog, id: &str) -> Result<Product, CliError> {
    catalog
        .get(&ProductId::new(id))
        .cloned()
        .ok_or_else(|| CliError::ProductNotFound(id.to_owned()))
}

/// One product per line: id, name, sale price, discount and stock.
fn product_lines<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut out = String::new();
    for product in products {
        let _ = write!(
            out,
            "{:<6} {:<40} {:>10}",
            product.id,
            product.name,
            product.sale_price().display()
        );
        if let Some(discount) = product.discount {
            let _ = write!(out, "  -{discount}%");
        }
        if !product.in_stock {
            out.push_str("  (out of stock)");
        }
        out.push('\n');
    }
    out
}

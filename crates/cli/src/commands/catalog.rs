//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! enzobay-cli catalog list --category electronics
//! enzobay-cli catalog list --search wireless
//! enzobay-cli catalog show p-1
//! enzobay-cli catalog similar p-1 --limit 3
//! ```

use std::fmt::Write as _;

use enzobay_core::ProductId;
use enzobay_storefront::catalog::Catalog;

use super::{CliError, find_product, product_lines};

/// List products, optionally narrowed by category and search text.
#[must_use]
pub fn list(category: Option<&str>, search: Option<&str>) -> String {
    let catalog = Catalog::builtin();
    let mut products = match search {
        Some(query) => catalog.search(query),
        None => catalog.all().iter().collect(),
    };
    if let Some(category) = category {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }

    if products.is_empty() {
        return "No products found\n".to_string();
    }
    product_lines(products)
}

/// Full details for one product.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` for an unknown id.
pub fn show(id: &str) -> Result<String, CliError> {
    let product = find_product(&Catalog::builtin(), id)?;

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.name, product.id);
    let _ = writeln!(out, "Price:    {}", product.sale_price().display());
    if product.discount.is_some() {
        let _ = writeln!(
            out,
            "Was:      {}",
            enzobay_core::Money::new(product.price, product.currency).display()
        );
    }
    let _ = writeln!(out, "Category: {}", product.category);
    if let Some(brand) = &product.brand {
        let _ = writeln!(out, "Brand:    {brand}");
    }
    let _ = writeln!(
        out,
        "Rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    let _ = writeln!(
        out,
        "Tags:     {}",
        product.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    let _ = writeln!(
        out,
        "Stock:    {}",
        if product.in_stock { "in stock" } else { "out of stock" }
    );
    let _ = writeln!(out, "\n{}", product.description);
    Ok(out)
}

/// Products similar to `id`.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` for an unknown id.
pub fn similar(id: &str, limit: usize) -> Result<String, CliError> {
    let catalog = Catalog::builtin();
    find_product(&catalog, id)?;

    let similar = catalog.similar_products(&ProductId::new(id), limit);
    if similar.is_empty() {
        return Ok("No similar products\n".to_string());
    }
    Ok(product_lines(similar))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters() {
        let out = list(Some("books"), None);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("The Pragmatic Engineer"));

        assert_eq!(list(None, Some("no-such-thing")), "No products found\n");
    }

    #[test]
    fn test_show_marks_discount_and_stock() {
        let out = show("p-6").unwrap();
        assert!(out.contains("out of stock"));
        assert!(!out.contains("Was:"));

        let out = show("p-1").unwrap();
        assert!(out.contains("Was:      $199.99"));
    }

    #[test]
    fn test_unknown_product() {
        assert!(matches!(show("p-0"), Err(CliError::ProductNotFound(_))));
        assert!(matches!(similar("p-0", 4), Err(CliError::ProductNotFound(_))));
    }

    #[test]
    fn test_similar_respects_limit() {
        let out = similar("p-1", 2).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("p-3"));
    }
}

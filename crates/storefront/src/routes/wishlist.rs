//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use enzobay_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::products::find_product;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Wishlist display data.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<Product>,
    pub count: usize,
}

impl WishlistView {
    fn current(state: &AppState) -> Self {
        let items = state.wishlist().items();
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Toggle result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleView {
    pub product_id: ProductId,
    pub in_wishlist: bool,
}

/// Add-to-wishlist request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: String,
}

pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    Json(WishlistView::current(&state))
}

/// Save a product. Saving twice is a no-op.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToWishlistRequest>,
) -> Result<Json<WishlistView>> {
    let id = ProductId::new(request.product_id);
    let product = find_product(&state, &id)?;
    if state.wishlist().add_item(product) {
        add_breadcrumb("wishlist", "Saved product", Some(&[("product_id", id.as_str())]));
    }
    Ok(Json(WishlistView::current(&state)))
}

#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleView>> {
    let id = ProductId::new(id);
    let product = find_product(&state, &id)?;
    let in_wishlist = state.wishlist().toggle(product);
    Ok(Json(ToggleView {
        product_id: id,
        in_wishlist,
    }))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WishlistView>> {
    let id = ProductId::new(id);
    if !state.wishlist().remove_item(&id) {
        return Err(AppError::NotFound(format!("wishlist item {id}")));
    }
    Ok(Json(WishlistView::current(&state)))
}

pub async fn clear(State(state): State<AppState>) -> Json<WishlistView> {
    state.wishlist().clear_wishlist();
    Json(WishlistView::current(&state))
}

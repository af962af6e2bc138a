//! Cart route handlers.
//!
//! Every mutating handler answers with the full cart so clients can redraw
//! without a second request.

use axum::{
    Json,
    extract::{Path, State},
};
use enzobay_core::{CartItem, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::products::find_product;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::stores::CartStore;

/// Cart display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub formatted_total: String,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        let state = cart.snapshot();
        let total = cart.cart_total_money();
        Self {
            item_count: state.item_count(),
            items: state.items,
            total: total.amount,
            formatted_total: total.display(),
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Current cart.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(state.cart()))
}

/// Add a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(request.product_id);
    let product = find_product(&state, &id)?;
    let quantity = request.quantity.unwrap_or(1);

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", id.as_str()), ("quantity", &quantity.to_string())]),
    );
    state.cart().add_item(product, quantity);
    tracing::info!(product_id = %id, quantity, "added to cart");

    Ok(Json(CartView::from(state.cart())))
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(id);
    if !state.cart().contains(&id) {
        return Err(AppError::NotFound(format!("cart line {id}")));
    }
    state.cart().update_quantity(&id, request.quantity);
    Ok(Json(CartView::from(state.cart())))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(id);
    if !state.cart().remove_item(&id) {
        return Err(AppError::NotFound(format!("cart line {id}")));
    }
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
    Ok(Json(CartView::from(state.cart())))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    state.cart().clear_cart();
    Json(CartView::from(state.cart()))
}

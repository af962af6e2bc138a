//! Recently viewed route handlers.
//!
//! Entries are recorded by the product detail handler, not here.

use axum::{Json, extract::State};
use enzobay_core::Product;

use crate::state::AppState;

/// Recently viewed products, most recent first.
pub async fn show(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.recently_viewed().items())
}

pub async fn clear(State(state): State<AppState>) -> Json<Vec<Product>> {
    state.recently_viewed().clear_items();
    Json(Vec::new())
}

//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use enzobay_core::{Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::DEFAULT_SIMILAR_LIMIT;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Upper bound on `?limit=` for similar products.
const MAX_SIMILAR_LIMIT: usize = 12;

/// Query parameters for product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Query parameters for similar products.
#[derive(Debug, Default, Deserialize)]
pub struct SimilarQuery {
    pub limit: Option<usize>,
}

/// Product listing, optionally narrowed by category and search text.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Product>> {
    let catalog = state.catalog();
    let mut products: Vec<&Product> = match query.q.as_deref() {
        Some(q) => catalog.search(q),
        None => catalog.all().iter().collect(),
    };
    if let Some(category) = query.category.as_deref() {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }
    Json(products.into_iter().cloned().collect())
}

/// Distinct categories.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog()
            .categories()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    )
}

/// Product detail. Viewing a product records it as recently viewed.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let product = find_product(&state, &id)?;

    add_breadcrumb("catalog", "Viewed product", Some(&[("product_id", id.as_str())]));
    state.recently_viewed().add_item(product.clone());

    Ok(Json(product))
}

/// Products similar to `id`.
#[instrument(skip(state))]
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> Result<Json<Vec<Product>>> {
    let id = ProductId::new(id);
    find_product(&state, &id)?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_SIMILAR_LIMIT)
        .min(MAX_SIMILAR_LIMIT);
    Ok(Json(
        state
            .catalog()
            .similar_products(&id, limit)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

/// Look up a product, mapping a miss to 404.
pub(crate) fn find_product(state: &AppState, id: &ProductId) -> Result<Product> {
    state
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::app;
    use crate::routes::test_support::send;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_index_filters() {
        let app = app(test_state());

        let (status, body) = send(&app, Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 16);

        let (_, body) = send(&app, Method::GET, "/api/products?category=Electronics", None).await;
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (_, body) = send(&app, Method::GET, "/api/products?q=soundmax", None).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["p-1", "p-3"]);
    }

    #[tokio::test]
    async fn test_show_records_recently_viewed() {
        let state = test_state();
        let app = app(state.clone());

        let (status, body) = send(&app, Method::GET, "/api/products/p-2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Smart Fitness Watch");
        assert_eq!(body["reviewCount"], 842);

        let viewed = state.recently_viewed().items();
        assert_eq!(viewed.len(), 1);
        assert_eq!(viewed[0].id.as_str(), "p-2");
    }

    #[tokio::test]
    async fn test_show_unknown_is_404() {
        let state = test_state();
        let app = app(state.clone());

        let (status, body) = send(&app, Method::GET, "/api/products/p-404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("p-404"));
        assert!(state.recently_viewed().items().is_empty());
    }

    #[tokio::test]
    async fn test_similar() {
        let app = app(test_state());

        let (status, body) = send(&app, Method::GET, "/api/products/p-1/similar?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["p-3", "p-2"]);

        let (status, _) = send(&app, Method::GET, "/api/products/nope/similar", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                            - Health check
//!
//! # Catalog
//! GET    /api/products                      - List (?category=, ?q=)
//! GET    /api/products/categories           - Distinct categories
//! GET    /api/products/{id}                 - Detail (records recently viewed)
//! GET    /api/products/{id}/similar         - Similar products (?limit=)
//!
//! # Cart
//! GET    /api/cart                          - Cart contents and totals
//! POST   /api/cart/items                    - Add product
//! PUT    /api/cart/items/{id}               - Set quantity (0 removes)
//! DELETE /api/cart/items/{id}               - Remove line
//! DELETE /api/cart                          - Clear cart
//!
//! # Wishlist
//! GET    /api/wishlist                      - Wishlist contents
//! POST   /api/wishlist/items                - Add product
//! POST   /api/wishlist/items/{id}/toggle    - Add or remove product
//! DELETE /api/wishlist/items/{id}           - Remove product
//! DELETE /api/wishlist                      - Clear wishlist
//!
//! # Recently viewed
//! GET    /api/recently-viewed               - Most recent first
//! DELETE /api/recently-viewed               - Clear history
//!
//! # Banners
//! GET    /api/banners?position=home_top     - Live, undismissed banners for a slot
//! GET    /api/banners/all                   - Every banner
//! GET    /api/banners/{id}                  - Banner detail
//! POST   /api/banners/{id}/dismiss          - Dismiss a banner
//! DELETE /api/banners/dismissed             - Forget dismissed banners
//!
//! # Auth
//! POST   /api/auth/register                 - Create account and sign in
//! POST   /api/auth/login                    - Sign in
//! POST   /api/auth/logout                   - Sign out
//! GET    /api/auth/me                       - Signed-in user
//!
//! # Checkout & orders
//! GET    /api/checkout/summary              - Subtotal, shipping, tax, total
//! POST   /api/checkout                      - Validate, place order, clear cart
//! GET    /api/orders                        - Signed-in user's orders
//! GET    /api/orders/{id}                   - Order detail
//! POST   /api/orders/{id}/cancel            - Cancel order
//! ```

pub mod auth;
pub mod banners;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod recently_viewed;
pub mod wishlist;

use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
        .route("/{id}/similar", get(products::similar))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/items", post(wishlist::add))
        .route("/items/{id}", delete(wishlist::remove))
        .route("/items/{id}/toggle", post(wishlist::toggle))
}

/// Create the banner routes router.
pub fn banner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banners::by_position))
        .route("/all", get(banners::all))
        .route("/dismissed", delete(banners::reset_dismissed))
        .route("/{id}", get(banners::show))
        .route("/{id}/dismiss", post(banners::dismiss))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::my_orders))
        .route("/{id}", get(checkout::show_order))
        .route("/{id}/cancel", post(checkout::cancel_order))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route(
            "/recently-viewed",
            get(recently_viewed::show).delete(recently_viewed::clear),
        )
        .nest("/banners", banner_routes())
        .nest("/auth", auth_routes())
        .route("/checkout", post(checkout::place_order))
        .route("/checkout/summary", get(checkout::summary))
        .nest("/orders", order_routes())
}

/// The full application router with state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Send one request through `app`, returning status and JSON body.
    ///
    /// An empty body is returned as `Value::Null`.
    pub(crate) async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::test_support::send;
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_health() {
        let app = app(test_state());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = app(test_state());
        let (status, _) = send(&app, Method::GET, "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

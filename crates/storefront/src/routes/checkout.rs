//! Checkout and order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use enzobay_core::{CurrencyCode, Money, Order, OrderId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::checkout::CheckoutForm;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Checkout price breakdown for the current cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub formatted_total: String,
    pub currency: CurrencyCode,
}

/// Subtotal, shipping, tax and total for what is in the cart now.
pub async fn summary(State(state): State<AppState>) -> Json<CheckoutSummary> {
    let cart = state.cart().snapshot();
    let totals = state.orders().pricing().totals(&cart.items);
    let currency = cart.currency();

    Json(CheckoutSummary {
        item_count: cart.item_count(),
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        formatted_total: Money::new(totals.total, currency).display(),
        currency,
    })
}

/// Validate the form, place the order, then take the ordered lines out of
/// the cart.
///
/// Only what was ordered is removed; anything added to the cart while the
/// order was being placed stays.
#[instrument(skip(state, form))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<Order>)> {
    let checkout = form.validate(state.clock().now())?;
    let user_id = state.auth().current_user().map(|user| user.id);

    let order = state
        .orders()
        .place_order(user_id, state.cart().items(), checkout)
        .await?;
    state.cart().remove_ordered(&order.items);

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order.id.as_str())]),
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// Orders placed by the signed-in user, newest first.
#[instrument(skip(state))]
pub async fn my_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let user = state
        .auth()
        .current_user()
        .ok_or_else(|| AppError::Unauthorized("sign in to see your orders".to_string()))?;
    Ok(Json(state.orders().orders_for_user(&user.id).await))
}

#[instrument(skip(state))]
pub async fn show_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let id = OrderId::new(id);
    state
        .orders()
        .get_order(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

#[instrument(skip(state))]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders().cancel_order(&OrderId::new(id)).await?;
    Ok(Json(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;
    use std::time::Duration;

    use axum::http::{Method, StatusCode};
    use enzobay_core::{OrderStatus, UserId, UserRole};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use crate::routes::app;
    use crate::routes::test_support::send;
    use crate::state::test_support::{test_state, test_state_with_latency};

    fn form() -> Value {
        json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0018",
            "addressLine": "12 Analytical Row",
            "city": "London",
            "state": "Greater London",
            "postalCode": "NW1 6XE",
            "paymentMethod": "card",
            "cardNumber": "4242 4242 4242 4242",
            "cardExpiry": "08/29",
            "cardCvv": "123",
        })
    }

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_summary_applies_shipping_and_tax() {
        let state = test_state();
        let app = app(state.clone());
        // Coffee set: 45.00 less 10% = 40.50, two of them.
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-8", "quantity": 2 }))).await;

        let (status, body) = send(&app, Method::GET, "/api/checkout/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["subtotal"]), Decimal::new(81, 0));
        assert_eq!(decimal(&body["shipping"]), Decimal::new(50, 0));
        assert_eq!(decimal(&body["tax"]), Decimal::new(1458, 2));
        assert_eq!(body["formattedTotal"], "$145.58");
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let state = test_state();
        let app = app(state.clone());
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-4" }))).await;

        let (status, order) = send(&app, Method::POST, "/api/checkout", Some(form())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["status"], "pending");
        assert_eq!(order["payment"]["method"], "card");
        assert_eq!(order["payment"]["last4"], "4242");
        assert_eq!(decimal(&order["shipping"]), Decimal::ZERO);
        assert!(order.get("userId").is_none());
        assert_eq!(state.cart().item_count(), 0);

        let id = order["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], order["id"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_items_added_during_checkout_stay_in_cart() {
        let state = test_state_with_latency(Duration::from_millis(300));
        let app = app(state.clone());
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-1" }))).await;

        let checkout = tokio::spawn({
            let app = app.clone();
            async move { send(&app, Method::POST, "/api/checkout", Some(form())).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-2" }))).await;

        let (status, order) = checkout.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let ordered: Vec<&str> = order["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ordered, vec!["p-1"]);

        let items = state.cart().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id.as_str(), "p-2");
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let state = test_state();
        let app = app(state.clone());
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-1" }))).await;

        let mut bad = form();
        bad["cardNumber"] = json!("4242 4242 4242 4241");
        bad["postalCode"] = json!("");
        let (status, body) = send(&app, Method::POST, "/api/checkout", Some(bad)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["cardNumber"].is_string());
        assert_eq!(body["fields"]["postalCode"], "Postal code is required");
        assert_eq!(state.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_bad_request() {
        let app = app(test_state());
        let (status, body) = send(&app, Method::POST, "/api/checkout", Some(form())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_orders_belong_to_signed_in_user() {
        let state = test_state();
        let app = app(state.clone());

        let (status, _) = send(&app, Method::GET, "/api/orders", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        state.auth().sign_in(enzobay_core::User {
            id: UserId::new("u-7"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Customer,
        });
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-16" }))).await;
        let (_, order) = send(&app, Method::POST, "/api/checkout", Some(form())).await;
        assert_eq!(order["userId"], "u-7");

        let (status, body) = send(&app, Method::GET, "/api/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let state = test_state();
        let app = app(state.clone());
        send(&app, Method::POST, "/api/cart/items", Some(json!({ "productId": "p-2" }))).await;
        let (_, order) = send(&app, Method::POST, "/api/checkout", Some(form())).await;
        let id = order["id"].as_str().unwrap();

        let (status, body) = send(&app, Method::POST, &format!("/api/orders/{id}/cancel"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "cancelled");

        state
            .orders()
            .set_status(&enzobay_core::OrderId::new(id), OrderStatus::Delivered)
            .await
            .unwrap();
        let (status, _) = send(&app, Method::POST, &format!("/api/orders/{id}/cancel"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, Method::POST, "/api/orders/ORD-00000000/cancel", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

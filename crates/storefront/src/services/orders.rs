//! Mock order service.
//!
//! Orders live in memory for the life of the process. Like the banner
//! service, each call waits for the configured latency first. Lookups that
//! find nothing return `None`.

use std::sync::Arc;
use std::time::Duration;

use enzobay_core::{CartItem, Order, OrderId, OrderStatus, UserId};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::checkout::ValidCheckout;
use crate::clock::Clock;

/// Errors from order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// No order has this id.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order has progressed past the point of cancellation.
    #[error("order {id} cannot be cancelled while {status:?}")]
    NotCancellable { id: OrderId, status: OrderStatus },
}

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPricing {
    /// Flat shipping fee below the free-shipping threshold.
    pub shipping_fee: Decimal,
    /// Subtotals at or above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Tax as a fraction of the subtotal (`0.18` = 18%).
    pub tax_rate: Decimal,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            shipping_fee: Decimal::new(50, 0),
            free_shipping_threshold: Decimal::new(500, 0),
            tax_rate: Decimal::new(18, 2),
        }
    }
}

/// Price breakdown for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutPricing {
    /// Compute subtotal, shipping, tax and total for `items`.
    #[must_use]
    pub fn totals(&self, items: &[CartItem]) -> OrderTotals {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let shipping = if items.is_empty() || subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        };
        let tax = (subtotal * self.tax_rate).round_dp(2);

        OrderTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

/// Places and looks up orders.
pub struct OrderService {
    orders: RwLock<Vec<Order>>,
    pricing: CheckoutPricing,
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    #[must_use]
    pub fn new(pricing: CheckoutPricing, latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            pricing,
            latency,
            clock,
        }
    }

    #[must_use]
    pub const fn pricing(&self) -> &CheckoutPricing {
        &self.pricing
    }

    /// Place an order for `items`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if `items` is empty.
    #[instrument(skip(self, items, checkout), fields(lines = items.len()))]
    pub async fn place_order(
        &self,
        user_id: Option<UserId>,
        items: Vec<CartItem>,
        checkout: ValidCheckout,
    ) -> Result<Order, OrderError> {
        self.simulate_latency().await;

        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let totals = self.pricing.totals(&items);
        let currency = items
            .first()
            .map(|item| item.product.currency)
            .unwrap_or_default();

        let order = Order {
            id: new_order_id(),
            user_id,
            items,
            shipping_address: checkout.shipping,
            payment: checkout.payment,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            total: totals.total,
            currency,
            status: OrderStatus::Pending,
            placed_at: self.clock.now(),
        };

        self.orders.write().await.push(order.clone());
        tracing::info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }

    /// Look up an order by id.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> Option<Order> {
        self.simulate_latency().await;
        self.orders
            .read()
            .await
            .iter()
            .find(|order| &order.id == id)
            .cloned()
    }

    /// Orders placed by `user_id`, newest first.
    pub async fn orders_for_user(&self, user_id: &UserId) -> Vec<Order> {
        self.simulate_latency().await;
        self.orders
            .read()
            .await
            .iter()
            .rev()
            .filter(|order| order.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect()
    }

    /// Cancel a pending or processing order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown id and
    /// `OrderError::NotCancellable` once the order has shipped.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.simulate_latency().await;
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;

        if !order.status.is_cancellable() {
            return Err(OrderError::NotCancellable {
                id: id.clone(),
                status: order.status,
            });
        }

        order.status = OrderStatus::Cancelled;
        tracing::info!(order_id = %id, "order cancelled");
        Ok(order.clone())
    }

    /// Move an order to `status`. Returns `None` for an unknown id.
    pub async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.iter_mut().find(|order| &order.id == id)?;
        order.status = status;
        Some(order.clone())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// `ORD-` followed by eight upper-case hex characters.
fn new_order_id() -> OrderId {
    let uuid = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    OrderId::new(format!("ORD-{}", uuid.get(..8).unwrap_or(&uuid)))
}

//! Mock backend services.
//!
//! # Services
//!
//! - `auth` - Account directory with Argon2 password hashing
//! - `orders` - Order placement, lookup and cancellation
//!
//! Banner serving lives in [`crate::banners`].

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use orders::{CheckoutPricing, OrderError, OrderService, OrderTotals};

//! Core types for Enzobay.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts.

pub mod banner;
pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use banner::{Banner, BannerStyle};
pub use cart::CartItem;
pub use id::*;
pub use order::{Order, PaymentMethod, ShippingAddress};
pub use price::{CurrencyCode, Money};
pub use product::{Product, VariantOptions};
pub use status::*;
pub use user::User;

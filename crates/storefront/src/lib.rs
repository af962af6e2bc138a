//! Enzobay storefront library.
//!
//! The client-side state layer of the Enzobay shop: persisted cart, wishlist,
//! recently-viewed, auth and dismissed-banner stores, the product catalog,
//! mock banner, order and account services, checkout validation, and a JSON
//! API over all of it.
//!
//! # Modules
//!
//! - [`storage`] - Key-value persistence port with memory and file backends
//! - [`stores`] - Reactive stores persisted through the port
//! - [`catalog`] - Product catalog and similar-product ranking
//! - [`banners`] - Scheduled promotional banners
//! - [`checkout`] - Checkout and registration form validation
//! - [`services`] - Mock account and order services
//! - [`routes`] - Axum JSON API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod banners;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

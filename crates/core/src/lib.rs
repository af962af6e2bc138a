//! Enzobay Core - Shared types library.
//!
//! This crate provides the domain types used across all Enzobay components:
//! - `storefront` - Store containers, mock services, and the JSON API
//! - `cli` - Command-line access to the persisted stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! HTTP. Every record here is plain reference data that the storefront
//! stores snapshot to the key-value port as JSON.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, money, products, cart lines, banners, orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

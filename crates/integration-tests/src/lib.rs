//! Integration tests for Enzobay.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p enzobay-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_persistence` - Stores rehydrating from file-backed snapshots
//! - `checkout_flow` - Browse, cart, sign in and check out over the HTTP API
//!
//! Every test gets its own temporary data directory through [`TestContext`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{TimeZone, Utc};
use enzobay_storefront::clock::FixedClock;
use enzobay_storefront::config::{StorageBackend, StorefrontConfig};
use enzobay_storefront::services::AuthService;
use enzobay_storefront::state::AppState;
use enzobay_storefront::storage::{FileStorage, KeyValueStore, StorageError};
use serde_json::Value;
use tower::ServiceExt;

/// A temporary data directory, removed on drop.
pub struct TestContext {
    dir: PathBuf,
}

impl TestContext {
    /// Create a fresh, empty data directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("enzobay-it-{}", uuid::Uuid::new_v4()));
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File storage over this context's directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn storage(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        Ok(Arc::new(FileStorage::open(&self.dir)?))
    }

    /// Application state over this directory with no latency and a clock
    /// fixed at 2024-06-15 12:00 UTC. Calling it again simulates a restart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn state(&self, accounts: AuthService) -> Result<AppState, StorageError> {
        let config = StorefrontConfig {
            storage: StorageBackend::File,
            data_dir: self.dir.clone(),
            mock_latency: Duration::ZERO,
            demo_accounts: false,
            ..StorefrontConfig::default()
        };
        let now = Utc
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .unwrap_or_default();
        Ok(AppState::from_parts(
            config,
            self.storage()?,
            Arc::new(FixedClock(now)),
            accounts,
        ))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Send one JSON request through `app`, returning status and JSON body.
///
/// An empty response body is returned as `Value::Null`.
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not JSON.
#[allow(clippy::unwrap_used)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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

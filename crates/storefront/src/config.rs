//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STORAGE` - `memory` or `file` (default: memory)
//! - `STOREFRONT_DATA_DIR` - Snapshot directory for file storage (default: .enzobay)
//! - `STOREFRONT_MOCK_LATENCY_MS` - Simulated service latency (default: 300)
//! - `STOREFRONT_DEMO_ACCOUNTS` - Seed demo accounts at startup (default: true)
//! - `CHECKOUT_SHIPPING_FEE` - Flat shipping fee (default: 50)
//! - `CHECKOUT_FREE_SHIPPING_THRESHOLD` - Free shipping from this subtotal (default: 500)
//! - `CHECKOUT_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.18)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::services::CheckoutPricing;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where store snapshots are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// One JSON file per key under the data directory.
    File,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("expected `memory` or `file`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Snapshot storage backend
    pub storage: StorageBackend,
    /// Directory for file-backed snapshots
    pub data_dir: PathBuf,
    /// Delay applied to every mock service call
    pub mock_latency: Duration,
    /// Whether to seed the demo accounts at startup
    pub demo_accounts: bool,
    /// Shipping and tax rules
    pub checkout: CheckoutPricing,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            storage: StorageBackend::Memory,
            data_dir: PathBuf::from(".enzobay"),
            mock_latency: Duration::from_millis(300),
            demo_accounts: true,
            checkout: CheckoutPricing::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Env(&lookup);

        let latency_ms: u64 = env.parse_or("STOREFRONT_MOCK_LATENCY_MS", 300)?;
        let tax_rate: Decimal = env.parse_or("CHECKOUT_TAX_RATE", defaults.checkout.tax_rate)?;
        if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "CHECKOUT_TAX_RATE".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            host: env.parse_or("STOREFRONT_HOST", defaults.host)?,
            port: env.parse_or("STOREFRONT_PORT", defaults.port)?,
            storage: env.parse_or("STOREFRONT_STORAGE", defaults.storage)?,
            data_dir: env
                .optional("STOREFRONT_DATA_DIR")
                .map_or(defaults.data_dir, PathBuf::from),
            mock_latency: Duration::from_millis(latency_ms),
            demo_accounts: env.parse_or("STOREFRONT_DEMO_ACCOUNTS", defaults.demo_accounts)?,
            checkout: CheckoutPricing {
                shipping_fee: env
                    .parse_or("CHECKOUT_SHIPPING_FEE", defaults.checkout.shipping_fee)?,
                free_shipping_threshold: env.parse_or(
                    "CHECKOUT_FREE_SHIPPING_THRESHOLD",
                    defaults.checkout.free_shipping_threshold,
                )?,
                tax_rate,
            },
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERS_API_URL` - Base URL of the orders backend (users + orders)
//! - `MENU_API_URL` - Base URL of the menu backend (makis)
//! - `INVENTORY_API_URL` - Base URL of the inventory backend (ingredients)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CART_STORE_PATH` - Cart snapshot file (default: data/cart.json)
//! - `DEFAULT_BUYER_ID` - Buyer id used by the checkout fallback (default: 1)
//! - `BUYER_FALLBACK` - Enable the default-buyer fallback on unknown buyer
//!   creation failures (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use makiya_core::UserId;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the orders backend (users + orders resources)
    pub orders_api_url: String,
    /// Base URL of the menu backend (maki catalog)
    pub menu_api_url: String,
    /// Base URL of the inventory backend (ingredient stock)
    pub inventory_api_url: String,
    /// Path of the persisted cart snapshot file
    pub cart_store_path: PathBuf,
    /// Buyer id adopted when buyer creation fails for an unknown reason
    pub default_buyer_id: UserId,
    /// Whether the default-buyer fallback is enabled at all
    pub buyer_fallback: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let orders_api_url = get_base_url("ORDERS_API_URL")?;
        let menu_api_url = get_base_url("MENU_API_URL")?;
        let inventory_api_url = get_base_url("INVENTORY_API_URL")?;

        let cart_store_path =
            PathBuf::from(get_env_or_default("CART_STORE_PATH", "data/cart.json"));

        let default_buyer_id = get_env_or_default("DEFAULT_BUYER_ID", "1")
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DEFAULT_BUYER_ID".to_string(), e.to_string())
            })?;
        let buyer_fallback = get_env_or_default("BUYER_FALLBACK", "true")
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar("BUYER_FALLBACK".to_string(), e.to_string()))?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            orders_api_url,
            menu_api_url,
            inventory_api_url,
            cart_store_path,
            default_buyer_id,
            buyer_fallback,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
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

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required base URL, validated and normalized without a trailing slash.
fn get_base_url(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    normalize_base_url(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
}

/// Validate a base URL and strip any trailing slash so clients can append paths.
fn normalize_base_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", url.scheme()));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8000/api/orders/").unwrap(),
            "http://localhost:8000/api/orders"
        );
    }

    #[test]
    fn test_normalize_base_url_keeps_clean_urls() {
        assert_eq!(
            normalize_base_url("https://orders.internal").unwrap(),
            "https://orders.internal"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://host/path").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            orders_api_url: "http://localhost:8000".to_string(),
            menu_api_url: "http://localhost:8080".to_string(),
            inventory_api_url: "http://localhost:3001".to_string(),
            cart_store_path: PathBuf::from("data/cart.json"),
            default_buyer_id: UserId::new(1),
            buyer_fallback: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}

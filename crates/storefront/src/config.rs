//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `BAKERY_API_URL` - Base URL of the bakery REST API (e.g. `https://api.bakehouse.test/api/`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `BAKERY_API_TIMEOUT_SECS` - Request timeout for the bakery API (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

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
    /// Public base URL for the storefront
    pub base_url: String,
    /// Bakery REST API configuration
    pub api: BakeryApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

/// Bakery REST API configuration.
#[derive(Debug, Clone)]
pub struct BakeryApiConfig {
    /// API root; always ends with `/` so relative paths join beneath it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
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
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;

        Ok(Self {
            host,
            port,
            base_url,
            api: BakeryApiConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BakeryApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("BAKERY_API_URL")?;
        let base_url = parse_api_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("BAKERY_API_URL".to_string(), e))?;
        let timeout_secs = get_env_or_default("BAKERY_API_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BAKERY_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config pointing at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a message if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            base_url: parse_api_url(base_url)?,
            timeout: Duration::from_secs(30),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an API root URL, requiring http(s) and a trailing slash.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_url_gains_trailing_slash() {
        let url = parse_api_url("https://api.bakehouse.test/api").unwrap();
        assert_eq!(url.as_str(), "https://api.bakehouse.test/api/");
        assert_eq!(
            url.join("products/").unwrap().as_str(),
            "https://api.bakehouse.test/api/products/"
        );
    }

    #[test]
    fn api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://api.bakehouse.test/").is_err());
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn secure_cookies_follow_base_url_scheme() {
        let mut config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://shop.bakehouse.test".to_string(),
            api: BakeryApiConfig::new("http://127.0.0.1:8000/api/").unwrap(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        assert!(config.secure_cookies());
        config.base_url = "http://localhost:3000".to_string();
        assert!(!config.secure_cookies());
    }
}

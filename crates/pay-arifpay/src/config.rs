//! # ArifPay Configuration
//!
//! Configuration management for the ArifPay integration.
//! Values come from environment variables (and an optional `.env` file),
//! with documented fallbacks for everything except the API key.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://gateway.arifpay.org/api";
pub const DEFAULT_CHECKOUT_PATH: &str = "/checkout/session";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header used when the gateway-specific key scheme is selected.
pub const API_KEY_HEADER: &str = "x-arifpay-key";

/// Errors raised while loading configuration or building the HTTP client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

/// How the API key is presented to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `x-arifpay-key: <key>`
    ApiKeyHeader,
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "header" | "api-key" | "apikey" => Ok(AuthScheme::ApiKeyHeader),
            other => Err(format!("expected `bearer` or `header`, got `{other}`")),
        }
    }
}

/// ArifPay API configuration
#[derive(Clone)]
pub struct ArifpayConfig {
    /// Gateway API key
    pub api_key: String,

    /// API base URL (override for testing/mocking)
    pub base_url: String,

    /// Path of the checkout session endpoint
    pub checkout_path: String,

    pub auth_scheme: AuthScheme,

    /// Transport timeout
    pub timeout: Duration,
}

impl ArifpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ARIFPAY_API_KEY`
    ///
    /// Optional, with defaults:
    /// - `ARIFPAY_BASE_URL` (`https://gateway.arifpay.org/api`)
    /// - `ARIFPAY_CHECKOUT_PATH` (`/checkout/session`)
    /// - `ARIFPAY_AUTH_SCHEME` (`bearer` | `header`)
    /// - `ARIFPAY_TIMEOUT_SECS` (`30`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("ARIFPAY_API_KEY").ok_or(ConfigError::Missing("ARIFPAY_API_KEY"))?;

        let base_url = var("ARIFPAY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "ARIFPAY_BASE_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let checkout_path =
            var("ARIFPAY_CHECKOUT_PATH").unwrap_or_else(|| DEFAULT_CHECKOUT_PATH.to_string());

        let auth_scheme = match var("ARIFPAY_AUTH_SCHEME") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: "ARIFPAY_AUTH_SCHEME",
                reason,
            })?,
            None => AuthScheme::default(),
        };

        let timeout_secs = match var("ARIFPAY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "ARIFPAY_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            checkout_path,
            auth_scheme,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create config with explicit key and defaults for everything else (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            checkout_path: DEFAULT_CHECKOUT_PATH.to_string(),
            auth_scheme: AuthScheme::Bearer,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Full checkout endpoint: base URL + checkout path
    pub fn checkout_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.checkout_path.trim_start_matches('/')
        )
    }

    /// The authentication header name and value
    pub fn auth_header(&self) -> (&'static str, String) {
        match self.auth_scheme {
            AuthScheme::Bearer => ("Authorization", format!("Bearer {}", self.api_key)),
            AuthScheme::ApiKeyHeader => (API_KEY_HEADER, self.api_key.clone()),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_checkout_path(mut self, path: impl Into<String>) -> Self {
        self.checkout_path = path.into();
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The API key never appears in logs
impl std::fmt::Debug for ArifpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArifpayConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("checkout_path", &self.checkout_path)
            .field("auth_scheme", &self.auth_scheme)
            .field("timeout", &self.timeout)
            .finish()
    }
}

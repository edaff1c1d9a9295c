//! # Application State
//!
//! Shared state for the Axum application: the checkout strategy and the
//! server configuration.

use pay_arifpay::ArifpayCheckoutStrategy;
use pay_core::BoxedCheckoutStrategy;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout strategy
    pub strategy: BoxedCheckoutStrategy,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the ArifPay strategy loaded from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let strategy = ArifpayCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize ArifPay: {}", e))?;

        Ok(Self::with_strategy(Arc::new(strategy), config))
    }

    /// Create with an explicit strategy (tests, alternative gateways)
    pub fn with_strategy(strategy: BoxedCheckoutStrategy, config: AppConfig) -> Self {
        Self { strategy, config }
    }
}

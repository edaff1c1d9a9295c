//! # arifpay-checkout
//!
//! HTTP front end for opening ArifPay hosted checkout sessions.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ARIFPAY_API_KEY=...
//! export ARIFPAY_BASE_URL=https://gateway.arifpay.org/api   # optional
//!
//! # Run the server
//! arifpay-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.strategy.provider_name());

    let app = routes::create_router(state);

    info!("arifpay-checkout v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

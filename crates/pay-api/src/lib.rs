//! # pay-api
//!
//! HTTP API layer for arifpay-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - A REST endpoint that opens hosted checkout sessions
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Create checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};

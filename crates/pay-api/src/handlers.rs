//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::error::REASON_INVALID_FORMAT;
use pay_core::request::BODY_FIELD;
use pay_core::{CheckoutError, CheckoutInput, SessionResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&CheckoutError> for ErrorResponse {
    fn from(err: &CheckoutError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
            code: err.status_code(),
            field: err.field().map(String::from),
        }
    }
}

fn checkout_error_to_response(err: &CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let response = ErrorResponse::from(err);
    (
        StatusCode::from_u16(response.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "arifpay-checkout",
        "provider": state.strategy.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Decode the request body, mapping malformed JSON onto a validation error
fn checkout_input(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<CheckoutInput, CheckoutError> {
    let Json(value) = payload.map_err(|rejection| {
        debug!("Rejected checkout body: {}", rejection.body_text());
        CheckoutError::validation(BODY_FIELD, REASON_INVALID_FORMAT)
    })?;
    CheckoutInput::from_json(value)
}

/// Create a checkout session
#[instrument(skip(state, payload))]
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SessionResult>, (StatusCode, Json<ErrorResponse>)> {
    let input = checkout_input(payload).map_err(|e| {
        warn!(field = e.field().unwrap_or_default(), "Checkout input rejected: {}", e);
        checkout_error_to_response(&e)
    })?;

    // The strategy has already logged the failure
    let session = state
        .strategy
        .create_checkout_session(input)
        .await
        .map_err(|e| {
            debug!("Checkout request failed: {}", e);
            checkout_error_to_response(&e)
        })?;

    debug!("Created checkout session: {}", session.session_id);

    Ok(Json(session))
}

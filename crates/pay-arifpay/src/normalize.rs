//! # Response Normalizer
//!
//! Maps whatever the transport produced onto `SessionResult` or one of the
//! four `CheckoutError` variants. Raw reqwest errors and gateway body shapes
//! stop here.
//!
//! | Outcome | Result |
//! |---------|--------|
//! | no response (connect, timeout, body read) | `Transport` |
//! | request could not be built | `Unknown` |
//! | non-2xx | `Gateway` with the body's message |
//! | 2xx with `"error": true` | `Gateway` |
//! | 2xx that is not JSON or has no `sessionId` | `Gateway` (malformed) |
//! | 2xx with `sessionId` | `SessionResult` |

use crate::transport::{TransportFailure, TransportOutcome, TransportResponse};
use pay_core::{CheckoutError, CheckoutResult, SessionResult};
use serde_json::{Map, Value};

/// Error-body fields consulted for a human-readable message, in order
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "msg"];

/// Normalize a transport outcome
pub fn normalize(outcome: TransportOutcome) -> CheckoutResult<SessionResult> {
    match outcome {
        Ok(response) => normalize_response(&response),
        Err(failure) => Err(normalize_failure(failure)),
    }
}

/// Map a transport failure onto the error taxonomy
pub fn normalize_failure(failure: TransportFailure) -> CheckoutError {
    match failure {
        TransportFailure::Request(_) => CheckoutError::unknown(failure.to_string()),
        TransportFailure::Connect(_)
        | TransportFailure::Timeout(_)
        | TransportFailure::Body(_)
        | TransportFailure::Network(_) => CheckoutError::transport(failure.to_string()),
    }
}

/// Map a received response onto a session or a gateway error
pub fn normalize_response(response: &TransportResponse) -> CheckoutResult<SessionResult> {
    let status = response.status;
    let body: Option<Value> = serde_json::from_slice(&response.body).ok();

    if !response.is_success() {
        let message = body
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        return Err(CheckoutError::gateway(status, message));
    }

    let Some(Value::Object(body)) = body else {
        return Err(malformed(status, "body is not a JSON object"));
    };

    // `{ "error": true, "msg": "..." }` envelope on a 2xx
    if body.get("error").and_then(Value::as_bool) == Some(true) {
        let message = error_message(&Value::Object(body.clone()))
            .unwrap_or_else(|| "gateway reported failure".to_string());
        return Err(CheckoutError::gateway(status, message));
    }

    let mut data = match body.get("data") {
        Some(Value::Object(data)) => data.clone(),
        _ => body,
    };

    let session_id = match data.remove("sessionId") {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        _ => return Err(malformed(status, "missing sessionId")),
    };

    let payment_url = take_string(&mut data, "paymentUrl");

    Ok(SessionResult {
        session_id,
        payment_url,
        metadata: data,
    })
}

/// First non-empty string among `message`, `error`, `msg`
fn error_message(body: &Value) -> Option<String> {
    MESSAGE_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn malformed(status: u16, detail: &str) -> CheckoutError {
    CheckoutError::gateway(status, format!("malformed success response: {detail}"))
}

//! # Checkout Error Types
//!
//! Typed error handling for checkout session creation.
//! Every checkout operation returns `Result<T, CheckoutError>`, and every
//! failure falls into exactly one of four variants.

use thiserror::Error;

/// Reason reported when a required field is absent or blank.
pub const REASON_MISSING: &str = "missing";

/// Reason reported when the phone number has the wrong shape.
pub const REASON_INVALID_FORMAT: &str = "invalid format";

/// Reason reported when the expiration is not after the current time.
pub const REASON_NOT_IN_FUTURE: &str = "not in future";

/// Reason reported when items are empty or carry non-numeric values.
pub const REASON_INVALID_ITEMS: &str = "invalid quantity/price or empty";

/// Error outcome of a checkout session attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Caller input was malformed. Never reaches the network.
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// No response was obtained from the gateway (connect, DNS, timeout)
    #[error("Transport error: {cause}")]
    Transport { cause: String },

    /// The gateway answered but signalled failure or sent a malformed success body
    #[error("Gateway error [{http_status}]: {message}")]
    Gateway { http_status: u16, message: String },

    /// Anything that does not fit the categories above
    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl CheckoutError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckoutError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::validation(field, REASON_MISSING)
    }

    pub fn transport(cause: impl Into<String>) -> Self {
        CheckoutError::Transport {
            cause: cause.into(),
        }
    }

    pub fn gateway(http_status: u16, message: impl Into<String>) -> Self {
        CheckoutError::Gateway {
            http_status,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        CheckoutError::Unknown {
            message: message.into(),
        }
    }

    /// Stable machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::Validation { .. } => "validation_error",
            CheckoutError::Transport { .. } => "transport_error",
            CheckoutError::Gateway { .. } => "gateway_error",
            CheckoutError::Unknown { .. } => "unknown_error",
        }
    }

    /// The offending input field, for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            CheckoutError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Validation { .. } => 400,
            CheckoutError::Transport { .. } => 503,
            CheckoutError::Gateway { .. } => 502,
            CheckoutError::Unknown { .. } => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

//! # Session Result
//!
//! What a successful checkout session creation hands back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A checkout session created by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    /// Gateway session identifier
    pub session_id: String,

    /// Hosted checkout page to redirect the payer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,

    /// Everything else the gateway echoed back (amounts, urls, status, ...)
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl SessionResult {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            payment_url: None,
            metadata: Map::new(),
        }
    }

    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = Some(url.into());
        self
    }

    /// Look up an echoed field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

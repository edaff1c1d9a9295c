//! # ArifPay Checkout Sessions
//!
//! Implementation of the ArifPay hosted checkout session API.
//!
//! One call = build (validate + default) ─▶ one POST ─▶ normalize.
//! Nothing is retried and nothing is kept between calls.

use crate::config::{ArifpayConfig, ConfigError};
use crate::mask::{mask_phone, masked_payload};
use crate::normalize::normalize;
use crate::transport::{HttpTransport, RequestContext, Transport};
use async_trait::async_trait;
use pay_core::request::format_timestamp;
use pay_core::{
    CheckoutError, CheckoutInput, CheckoutRequest, CheckoutResult, CheckoutStrategy,
    SessionBuilder, SessionResult,
};
use tracing::{debug, error, info, instrument, warn};

/// ArifPay hosted checkout strategy
pub struct ArifpayCheckoutStrategy<T = HttpTransport> {
    config: ArifpayConfig,
    transport: T,
    builder: SessionBuilder,
}

impl ArifpayCheckoutStrategy<HttpTransport> {
    /// Create a strategy backed by a reqwest transport
    pub fn new(config: ArifpayConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ArifpayConfig::from_env()?;
        Self::new(config)
    }
}

impl<T: Transport> ArifpayCheckoutStrategy<T> {
    /// Create a strategy over any transport
    pub fn with_transport(config: ArifpayConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            builder: SessionBuilder::default(),
        }
    }

    /// Builder: replace the session builder (custom clock / id generator)
    pub fn with_builder(mut self, builder: SessionBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn config(&self) -> &ArifpayConfig {
        &self.config
    }

    /// Validate, send and normalize one checkout session request.
    ///
    /// # Errors
    /// - `Validation` before any network activity
    /// - `Transport` if no response arrived
    /// - `Gateway` if the gateway refused or answered with a malformed body
    /// - `Unknown` for anything else (e.g. serialization)
    #[instrument(skip(self, input), fields(provider = "arifpay"))]
    pub async fn create_checkout_session(
        &self,
        input: CheckoutInput,
    ) -> CheckoutResult<SessionResult> {
        let request = self.builder.build(input).map_err(|e| {
            warn!(field = e.field().unwrap_or_default(), "Checkout input rejected: {}", e);
            e
        })?;

        info!(
            phone = %mask_phone(request.phone()),
            amount = ?request.first_beneficiary_amount(),
            methods = ?request.payment_methods(),
            expire_at = %format_timestamp(&request.expire_at()),
            "Creating ArifPay checkout session"
        );

        let result = self.send(&request).await;

        match &result {
            Ok(session) => {
                info!(session_id = %session.session_id, "Created ArifPay checkout session");
            }
            Err(e) => {
                error!(
                    kind = e.kind(),
                    payload = %masked_payload(&request),
                    "ArifPay checkout failed: {}",
                    e
                );
            }
        }

        result
    }

    /// The single outbound call. Consumes nothing but the request it is given.
    async fn send(&self, request: &CheckoutRequest) -> CheckoutResult<SessionResult> {
        let body = serde_json::to_vec(request)
            .map_err(|e| CheckoutError::unknown(format!("Failed to serialize payload: {e}")))?;

        let url = self.config.checkout_url();
        let ctx = RequestContext {
            url: &url,
            headers: vec![self.config.auth_header()],
        };

        debug!(
            url = %url,
            transport = self.transport.name(),
            nonce = request.idempotency_token(),
            "Posting checkout session"
        );

        normalize(self.transport.post(ctx, body).await)
    }
}

#[async_trait]
impl<T: Transport> CheckoutStrategy for ArifpayCheckoutStrategy<T> {
    async fn create_checkout_session(
        &self,
        input: CheckoutInput,
    ) -> CheckoutResult<SessionResult> {
        ArifpayCheckoutStrategy::create_checkout_session(self, input).await
    }

    fn provider_name(&self) -> &'static str {
        "arifpay"
    }
}

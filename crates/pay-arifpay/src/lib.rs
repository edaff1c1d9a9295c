//! # pay-arifpay
//!
//! ArifPay hosted checkout integration for arifpay-checkout-rs.
//!
//! `ArifpayCheckoutStrategy::create_checkout_session` runs the whole flow:
//!
//! 1. **SessionBuilder** (pay-core) - presence checks, defaults, validation
//! 2. **Transport** - a single JSON POST to `base_url + checkout_path`
//! 3. **normalize** - `SessionResult` or one of the four `CheckoutError` variants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_arifpay::ArifpayCheckoutStrategy;
//! use pay_core::{Beneficiary, CheckoutInput, ItemInput};
//!
//! // Reads ARIFPAY_API_KEY, ARIFPAY_BASE_URL, ...
//! let strategy = ArifpayCheckoutStrategy::from_env()?;
//!
//! let session = strategy
//!     .create_checkout_session(
//!         CheckoutInput::new()
//!             .with_phone("251911223344")
//!             .with_urls(cancel, success, error, notify)
//!             .with_item(ItemInput::new("Coffee", 2.0, 100.0))
//!             .with_beneficiary(Beneficiary::new(200.0).with_detail("bank", "AWINETAA")),
//!     )
//!     .await?;
//!
//! // Redirect the payer to session.payment_url
//! ```

pub mod checkout;
pub mod config;
pub mod mask;
pub mod normalize;
pub mod transport;

// Re-exports
pub use checkout::ArifpayCheckoutStrategy;
pub use config::{ArifpayConfig, AuthScheme, ConfigError};
pub use normalize::normalize;
pub use transport::{
    HttpTransport, RequestContext, Transport, TransportFailure, TransportOutcome,
    TransportResponse,
};

//! # pay-core
//!
//! Core types for the arifpay-checkout hosted checkout integration.
//!
//! This crate provides:
//! - `CheckoutInput` / `CheckoutRequest` for raw and validated checkout data
//! - Field validators (`is_valid_phone_number`, `is_future_timestamp`, `all_items_numeric`)
//! - `DefaultingPolicy` with injectable `Clock` and `IdGenerator`
//! - `SessionBuilder`, which validates and assembles requests
//! - `CheckoutError` for typed error handling
//! - `CheckoutStrategy` trait for gateway implementations
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Beneficiary, CheckoutInput, ItemInput, SessionBuilder};
//!
//! let input = CheckoutInput::new()
//!     .with_phone("251911223344")
//!     .with_urls(cancel, success, error, notify)
//!     .with_item(ItemInput::new("Coffee", 2.0, 100.0))
//!     .with_beneficiary(Beneficiary::new(200.0));
//!
//! // Defaults: nonce, all payment methods, expiry in one hour, EN
//! let request = SessionBuilder::default().build(input)?;
//! ```

pub mod builder;
pub mod defaults;
pub mod error;
pub mod method;
pub mod request;
pub mod session;
pub mod strategy;
pub mod validate;

// Re-exports for convenience
pub use builder::{SessionBuilder, REQUIRED_FIELDS};
pub use defaults::{
    Clock, DefaultingPolicy, FixedClock, IdGenerator, SequenceGenerator, SystemClock,
    UuidGenerator, DEFAULT_EXPIRY_MINUTES,
};
pub use error::{CheckoutError, CheckoutResult};
pub use method::{Language, PaymentMethod};
pub use request::{Beneficiary, CheckoutInput, CheckoutRequest, ItemInput, LineItem};
pub use session::SessionResult;
pub use strategy::{BoxedCheckoutStrategy, CheckoutStrategy};
pub use validate::{all_items_numeric, is_future_timestamp, is_valid_phone_number};

//! # Checkout Strategy Trait
//!
//! The seam between callers (HTTP surface, CLI, tests) and a concrete
//! gateway integration.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │         CheckoutStrategy (trait)             │
//! │  ├── create_checkout_session()               │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!           ┌───────────┴───────────┐
//!   ┌───────┴────────┐     ┌────────┴───────┐
//!   │ArifpayCheckout │     │  test doubles  │
//!   │   Strategy     │     │                │
//!   └────────────────┘     └────────────────┘
//! ```

use crate::error::CheckoutResult;
use crate::request::CheckoutInput;
use crate::session::SessionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A gateway that can open hosted checkout sessions.
///
/// Implementations must be stateless per call: concurrent invocations share
/// nothing mutable.
#[async_trait]
pub trait CheckoutStrategy: Send + Sync {
    /// Validate `input`, send it to the gateway once, and normalize the outcome.
    ///
    /// # Errors
    /// One of the four `CheckoutError` variants. Validation failures are
    /// returned before any network activity.
    async fn create_checkout_session(&self, input: CheckoutInput)
        -> CheckoutResult<SessionResult>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared checkout strategy (dynamic dispatch)
pub type BoxedCheckoutStrategy = Arc<dyn CheckoutStrategy>;

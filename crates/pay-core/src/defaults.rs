//! # Defaulting Policy
//!
//! Fills in optional checkout fields the caller left unset. Time and
//! identifier generation come from injected collaborators so builds are
//! reproducible under test.

use crate::method::{Language, PaymentMethod};
use crate::request::format_timestamp;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// How long a session stays open when the caller gives no deadline.
pub const DEFAULT_EXPIRY_MINUTES: i64 = 60;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a settable instant, for tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(RwLock::new(at)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Source of idempotency tokens
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier. Never returns the same value twice.
    fn generate(&self) -> String;
}

/// Random version-4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, for tests
#[derive(Debug)]
pub struct SequenceGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequenceGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequenceGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// Computes defaults for optional checkout fields
#[derive(Clone)]
pub struct DefaultingPolicy {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl DefaultingPolicy {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn idempotency_token(&self) -> String {
        self.ids.generate()
    }

    /// `now` + one hour, rendered in the gateway's timestamp format
    pub fn expire_at(&self, now: DateTime<Utc>) -> String {
        format_timestamp(&(now + Duration::minutes(DEFAULT_EXPIRY_MINUTES)))
    }

    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        PaymentMethod::ALL.to_vec()
    }

    pub fn language(&self) -> Language {
        Language::En
    }
}

impl Default for DefaultingPolicy {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for DefaultingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultingPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{is_future_timestamp, is_future_timestamp_at, parse_timestamp};
    use chrono::TimeZone;

    #[test]
    fn test_default_expiry_passes_validator() {
        let policy = DefaultingPolicy::default();
        let now = policy.now();
        let expire = policy.expire_at(now);

        assert!(is_future_timestamp_at(&expire, now));
        assert!(is_future_timestamp(&expire));
    }

    #[test]
    fn test_default_expiry_is_one_hour_ahead_of_injected_clock() {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 15, 0).unwrap();
        let clock = FixedClock::new(at);
        let policy = DefaultingPolicy::new(Arc::new(clock.clone()), Arc::new(UuidGenerator));

        assert_eq!(policy.expire_at(policy.now()), "2026-05-01T09:15:00.000Z");

        // Evaluated per call, not fixed when the policy was created
        clock.advance(Duration::minutes(30));
        let expire = parse_timestamp(&policy.expire_at(policy.now())).unwrap();
        assert_eq!(expire, at + Duration::minutes(90));
    }

    #[test]
    fn test_uuid_tokens_are_unique() {
        let ids = UuidGenerator;
        let a = ids.generate();
        let b = ids.generate();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_sequence_generator() {
        let ids = SequenceGenerator::new("tok");
        assert_eq!(ids.generate(), "tok-1");
        assert_eq!(ids.generate(), "tok-2");
    }

    #[test]
    fn test_static_defaults() {
        let policy = DefaultingPolicy::default();
        assert_eq!(policy.payment_methods(), PaymentMethod::ALL.to_vec());
        assert_eq!(policy.language(), Language::En);
    }
}

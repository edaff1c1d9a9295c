//! # Session Builder
//!
//! Turns a raw `CheckoutInput` into a validated `CheckoutRequest`.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! ```text
//! presence ─▶ defaults ─▶ phone ─▶ expireAt ─▶ items ─▶ CheckoutRequest
//! ```
//!
//! The builder performs no I/O and no logging. The only impure inputs are
//! the clock and id generator held by its `DefaultingPolicy`.

use crate::defaults::DefaultingPolicy;
use crate::error::{
    CheckoutError, CheckoutResult, REASON_INVALID_FORMAT, REASON_INVALID_ITEMS,
    REASON_NOT_IN_FUTURE,
};
use crate::method::{Language, PaymentMethod};
use crate::request::{
    Beneficiary, CallbackUrls, CheckoutInput, CheckoutRequest, ItemInput, LineItem,
};
use crate::validate::{all_items_numeric, finite_number, future_timestamp, is_valid_phone_number};

/// Required fields, in the order they are checked and reported
pub const REQUIRED_FIELDS: [&str; 7] = [
    "phone",
    "cancelUrl",
    "successUrl",
    "errorUrl",
    "notifyUrl",
    "items",
    "beneficiaries",
];

/// Builds validated checkout requests
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    policy: DefaultingPolicy,
}

impl SessionBuilder {
    pub fn new(policy: DefaultingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DefaultingPolicy {
        &self.policy
    }

    /// Validate `input`, fill in defaults, and assemble the request.
    ///
    /// # Errors
    /// `CheckoutError::Validation` naming the first offending field.
    pub fn build(&self, input: CheckoutInput) -> CheckoutResult<CheckoutRequest> {
        let present = check_presence(input)?;
        let now = self.policy.now();

        let nonce = non_blank(present.idempotency_token)
            .unwrap_or_else(|| self.policy.idempotency_token());
        let payment_methods = present
            .payment_methods
            .filter(|methods| !methods.is_empty())
            .unwrap_or_else(|| self.policy.payment_methods());
        let expire_raw = present
            .expire_at
            .unwrap_or_else(|| self.policy.expire_at(now));
        let lang = present.language.unwrap_or_else(|| self.policy.language());

        if !is_valid_phone_number(&present.phone) {
            return Err(CheckoutError::validation("phone", REASON_INVALID_FORMAT));
        }

        let expire_date = future_timestamp(&expire_raw, now)
            .ok_or_else(|| CheckoutError::validation("expireAt", REASON_NOT_IN_FUTURE))?;

        if present.items.is_empty() || !all_items_numeric(&present.items) {
            return Err(CheckoutError::validation("items", REASON_INVALID_ITEMS));
        }
        let items = to_line_items(present.items)
            .ok_or_else(|| CheckoutError::validation("items", REASON_INVALID_ITEMS))?;

        Ok(CheckoutRequest::new(
            nonce,
            present.phone,
            non_blank(present.email),
            present.urls,
            payment_methods,
            expire_date,
            items,
            present.beneficiaries,
            lang,
        ))
    }
}

/// Input that has passed the presence check
struct PresentInput {
    phone: String,
    urls: CallbackUrls,
    items: Vec<ItemInput>,
    beneficiaries: Vec<Beneficiary>,
    email: Option<String>,
    idempotency_token: Option<String>,
    payment_methods: Option<Vec<PaymentMethod>>,
    expire_at: Option<String>,
    language: Option<Language>,
}

fn check_presence(input: CheckoutInput) -> CheckoutResult<PresentInput> {
    let phone = required_text(input.phone, REQUIRED_FIELDS[0])?;
    let cancel = required_text(input.cancel_url, REQUIRED_FIELDS[1])?;
    let success = required_text(input.success_url, REQUIRED_FIELDS[2])?;
    let error = required_text(input.error_url, REQUIRED_FIELDS[3])?;
    let notify = required_text(input.notify_url, REQUIRED_FIELDS[4])?;

    // An empty item list is present; it is rejected later as invalid
    let items = input
        .items
        .ok_or_else(|| CheckoutError::missing(REQUIRED_FIELDS[5]))?;

    let beneficiaries = input
        .beneficiaries
        .filter(|list| !list.is_empty() && list.iter().all(has_amount))
        .ok_or_else(|| CheckoutError::missing(REQUIRED_FIELDS[6]))?;

    Ok(PresentInput {
        phone,
        urls: CallbackUrls {
            cancel,
            success,
            error,
            notify,
        },
        items,
        beneficiaries,
        email: input.email,
        idempotency_token: input.idempotency_token,
        payment_methods: input.payment_methods,
        expire_at: input.expire_at,
        language: input.language,
    })
}

/// Blank strings count as missing
fn required_text(value: Option<String>, field: &str) -> CheckoutResult<String> {
    non_blank(value).ok_or_else(|| CheckoutError::missing(field))
}

fn has_amount(beneficiary: &Beneficiary) -> bool {
    beneficiary.amount.is_some_and(f64::is_finite)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn to_line_items(items: Vec<ItemInput>) -> Option<Vec<LineItem>> {
    items
        .into_iter()
        .map(|item| {
            let quantity = finite_number(item.quantity.as_ref())?.clone();
            let price = finite_number(item.price.as_ref())?.clone();
            Some(LineItem {
                quantity,
                price,
                details: item.details,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{Clock, FixedClock, SequenceGenerator, UuidGenerator};
    use crate::error::REASON_MISSING;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn fixed_builder() -> (SessionBuilder, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());
        let policy = DefaultingPolicy::new(
            Arc::new(clock.clone()),
            Arc::new(SequenceGenerator::new("nonce")),
        );
        (SessionBuilder::new(policy), clock)
    }

    fn minimal_input() -> CheckoutInput {
        CheckoutInput::new()
            .with_phone("251911223344")
            .with_urls(
                "https://shop.example/cancel",
                "https://shop.example/success",
                "https://shop.example/error",
                "https://shop.example/notify",
            )
            .with_item(ItemInput::new("Coffee", 2.0, 100.0))
            .with_beneficiary(
                Beneficiary::new(200.0)
                    .with_detail("accountNumber", "01320811436100")
                    .with_detail("bank", "AWINETAA"),
            )
    }

    fn assert_validation(result: CheckoutResult<CheckoutRequest>, field: &str, reason: &str) {
        match result {
            Err(CheckoutError::Validation { field: f, reason: r }) => {
                assert_eq!(f, field);
                assert_eq!(r, reason);
            }
            other => panic!("expected validation error on {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_notify_url() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        input.notify_url = None;

        assert_validation(builder.build(input), "notifyUrl", REASON_MISSING);
    }

    #[test]
    fn test_first_missing_field_wins_in_fixed_order() {
        let (builder, _) = fixed_builder();

        let result = builder.build(CheckoutInput::new());
        assert_validation(result, "phone", REASON_MISSING);

        let mut input = minimal_input();
        input.success_url = None;
        input.beneficiaries = None;
        assert_validation(builder.build(input), "successUrl", REASON_MISSING);

        let mut input = minimal_input();
        input.items = None;
        input.beneficiaries = None;
        assert_validation(builder.build(input), "items", REASON_MISSING);
    }

    #[test]
    fn test_blank_strings_are_missing() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        input.error_url = Some("   ".to_string());

        assert_validation(builder.build(input), "errorUrl", REASON_MISSING);
    }

    #[test]
    fn test_empty_beneficiaries_are_missing() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        input.beneficiaries = Some(vec![]);

        assert_validation(builder.build(input), "beneficiaries", REASON_MISSING);
    }

    #[test]
    fn test_beneficiary_without_amount_is_missing() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        let without_amount: Beneficiary =
            serde_json::from_value(json!({"bank": "AWINETAA"})).unwrap();
        input.beneficiaries = Some(vec![Beneficiary::new(10.0), without_amount]);

        assert_validation(builder.build(input), "beneficiaries", REASON_MISSING);

        let mut input = minimal_input();
        input.beneficiaries = Some(vec![Beneficiary::new(f64::INFINITY)]);
        assert_validation(builder.build(input), "beneficiaries", REASON_MISSING);
    }

    #[test]
    fn test_zero_amount_beneficiary_is_present() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        input.beneficiaries = Some(vec![Beneficiary::new(0.0)]);

        let request = builder.build(input).unwrap();
        assert_eq!(request.first_beneficiary_amount(), Some(0.0));
    }

    #[test]
    fn test_presence_checked_before_format() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input().with_phone("bad");
        input.notify_url = None;

        assert_validation(builder.build(input), "notifyUrl", REASON_MISSING);
    }

    #[test]
    fn test_minimal_input_gets_defaults() {
        let (builder, clock) = fixed_builder();
        let request = builder.build(minimal_input()).unwrap();

        assert_eq!(request.expire_at(), clock.now() + Duration::hours(1));
        assert_eq!(request.payment_methods(), PaymentMethod::ALL.as_slice());
        assert_eq!(request.language(), Language::En);
        assert_eq!(request.idempotency_token(), "nonce-1");
        assert_eq!(request.email(), None);
    }

    #[test]
    fn test_generated_tokens_differ_across_calls() {
        let builder = SessionBuilder::default();
        let first = builder.build(minimal_input()).unwrap();
        let second = builder.build(minimal_input()).unwrap();

        assert!(!first.idempotency_token().is_empty());
        assert_ne!(first.idempotency_token(), second.idempotency_token());
    }

    #[test]
    fn test_system_clock_default_expiry_is_about_an_hour() {
        let builder = SessionBuilder::new(DefaultingPolicy::new(
            Arc::new(crate::defaults::SystemClock),
            Arc::new(UuidGenerator),
        ));
        let request = builder.build(minimal_input()).unwrap();
        let ahead = request.expire_at() - Utc::now();

        assert!(ahead > Duration::minutes(59));
        assert!(ahead <= Duration::hours(1));
    }

    #[test]
    fn test_fully_specified_input_is_idempotent() {
        let builder = SessionBuilder::default();
        let input = minimal_input()
            .with_idempotency_token("order-42")
            .with_email("buyer@example.com")
            .with_expire_at("2099-01-01T00:00:00Z")
            .with_payment_methods(vec![PaymentMethod::Telebirr, PaymentMethod::Cbe])
            .with_language(Language::Am);

        let first = builder.build(input.clone()).unwrap();
        let second = builder.build(input).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.idempotency_token(), "order-42");
        assert_eq!(first.email(), Some("buyer@example.com"));
        assert_eq!(first.language(), Language::Am);
    }

    #[test]
    fn test_empty_optional_values_fall_back_to_defaults() {
        let (builder, _) = fixed_builder();
        let input = minimal_input()
            .with_idempotency_token("")
            .with_email(" ")
            .with_payment_methods(vec![]);

        let request = builder.build(input).unwrap();
        assert_eq!(request.idempotency_token(), "nonce-1");
        assert_eq!(request.email(), None);
        assert_eq!(request.payment_methods().len(), PaymentMethod::ALL.len());
    }

    #[test]
    fn test_invalid_phone() {
        let (builder, _) = fixed_builder();
        let input = minimal_input().with_phone("0911223344");

        assert_validation(builder.build(input), "phone", REASON_INVALID_FORMAT);
    }

    #[test]
    fn test_phone_checked_before_expiry() {
        let (builder, _) = fixed_builder();
        let input = minimal_input()
            .with_phone("+251911223344")
            .with_expire_at("2000-01-01T00:00:00Z");

        assert_validation(builder.build(input), "phone", REASON_INVALID_FORMAT);
    }

    #[test]
    fn test_expiry_must_be_in_future() {
        let (builder, clock) = fixed_builder();

        let input = minimal_input().with_expire_at("2026-06-01T12:00:00Z");
        assert_validation(builder.build(input), "expireAt", REASON_NOT_IN_FUTURE);

        let input = minimal_input().with_expire_at("not a date");
        assert_validation(builder.build(input), "expireAt", REASON_NOT_IN_FUTURE);

        clock.set(Utc.with_ymd_and_hms(2026, 6, 1, 11, 0, 0).unwrap());
        let input = minimal_input().with_expire_at("2026-06-01T12:00:00Z");
        assert!(builder.build(input).is_ok());
    }

    #[test]
    fn test_items_must_be_numeric_and_non_empty() {
        let (builder, _) = fixed_builder();

        let mut input = minimal_input();
        input.items = Some(vec![]);
        assert_validation(builder.build(input), "items", REASON_INVALID_ITEMS);

        let mut input = minimal_input();
        input.items = Some(vec![ItemInput::raw(json!("2"), json!(100))]);
        assert_validation(builder.build(input), "items", REASON_INVALID_ITEMS);
    }

    #[test]
    fn test_items_keep_details_and_numbers() {
        let (builder, _) = fixed_builder();
        let mut input = minimal_input();
        input.items = Some(vec![
            ItemInput::raw(json!(3), json!(-10.5)).with_detail("name", "Refund line")
        ]);

        let request = builder.build(input).unwrap();
        let item = &request.items()[0];
        assert_eq!(item.quantity.as_i64(), Some(3));
        assert_eq!(item.price.as_f64(), Some(-10.5));
        assert_eq!(item.details.get("name"), Some(&json!("Refund line")));
    }
}

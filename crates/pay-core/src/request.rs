//! # Checkout Request Types
//!
//! `CheckoutInput` is what a caller hands in: every field optional, so the
//! session builder can decide what is missing. `CheckoutRequest` is the
//! validated, immutable payload that goes to the gateway.

use crate::error::{CheckoutError, CheckoutResult, REASON_INVALID_FORMAT};
use crate::method::{Language, PaymentMethod};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// A line item as supplied by the caller
///
/// `quantity` and `price` are kept as raw JSON so that non-numeric input
/// (e.g. a quoted `"2"`) can be detected and rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub quantity: Option<Value>,

    #[serde(default)]
    pub price: Option<Value>,

    /// Name, description, image and anything else the gateway accepts
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ItemInput {
    /// Create an item with a name, quantity and unit price.
    ///
    /// Non-finite numbers cannot be represented in JSON and are stored as absent.
    pub fn new(name: impl Into<String>, quantity: f64, price: f64) -> Self {
        let mut details = Map::new();
        details.insert("name".to_string(), Value::String(name.into()));
        Self {
            quantity: Number::from_f64(quantity).map(Value::Number),
            price: Number::from_f64(price).map(Value::Number),
            details,
        }
    }

    /// Create an item from raw JSON values
    pub fn raw(quantity: Value, price: Value) -> Self {
        Self {
            quantity: Some(quantity),
            price: Some(price),
            details: Map::new(),
        }
    }

    /// Builder: add a pass-through field
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// A validated line item whose quantity and price are finite numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub quantity: Number,
    pub price: Number,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A payout recipient and the amount routed to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Absent or non-finite amounts fail the session builder's presence check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Account number, bank code, etc. Passed through untouched.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Beneficiary {
    pub fn new(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            details: Map::new(),
        }
    }

    /// Builder: add a pass-through field
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Caller-supplied checkout data, before validation and defaulting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    /// Payee phone number, `251` + carrier digit + 8 digits
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub cancel_url: Option<String>,

    #[serde(default)]
    pub success_url: Option<String>,

    #[serde(default)]
    pub error_url: Option<String>,

    #[serde(default)]
    pub notify_url: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Generated when absent
    #[serde(default, alias = "nonce")]
    pub idempotency_token: Option<String>,

    /// Defaults to every supported rail
    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,

    /// Session deadline; defaults to one hour from now
    #[serde(default, alias = "expireDate")]
    pub expire_at: Option<String>,

    #[serde(default)]
    pub items: Option<Vec<ItemInput>>,

    #[serde(default)]
    pub beneficiaries: Option<Vec<Beneficiary>>,

    #[serde(default, alias = "lang")]
    pub language: Option<Language>,
}

impl CheckoutInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode untrusted JSON, reporting a wrongly typed field as a validation error.
    ///
    /// Each field is optional, so a one-key object fails to decode only when that
    /// key's value has the wrong shape. That is how the offending field is found.
    pub fn from_json(value: Value) -> CheckoutResult<Self> {
        let Value::Object(fields) = value else {
            return Err(CheckoutError::validation(BODY_FIELD, REASON_INVALID_FORMAT));
        };

        serde_json::from_value(Value::Object(fields.clone())).map_err(|_| {
            let field = fields
                .into_iter()
                .find(|(key, value)| {
                    let single = Map::from_iter([(key.clone(), value.clone())]);
                    serde_json::from_value::<Self>(Value::Object(single)).is_err()
                })
                .map(|(key, _)| canonical_field(&key).to_string())
                .unwrap_or_else(|| BODY_FIELD.to_string());
            CheckoutError::validation(field, REASON_INVALID_FORMAT)
        })
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Builder: set all four callback URLs at once
    pub fn with_urls(
        mut self,
        cancel_url: impl Into<String>,
        success_url: impl Into<String>,
        error_url: impl Into<String>,
        notify_url: impl Into<String>,
    ) -> Self {
        self.cancel_url = Some(cancel_url.into());
        self.success_url = Some(success_url.into());
        self.error_url = Some(error_url.into());
        self.notify_url = Some(notify_url.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_idempotency_token(mut self, token: impl Into<String>) -> Self {
        self.idempotency_token = Some(token.into());
        self
    }

    pub fn with_payment_methods(mut self, methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods = Some(methods);
        self
    }

    pub fn with_expire_at(mut self, expire_at: impl Into<String>) -> Self {
        self.expire_at = Some(expire_at.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Builder: append a line item
    pub fn with_item(mut self, item: ItemInput) -> Self {
        self.items.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// Builder: append a beneficiary
    pub fn with_beneficiary(mut self, beneficiary: Beneficiary) -> Self {
        self.beneficiaries
            .get_or_insert_with(Vec::new)
            .push(beneficiary);
        self
    }
}

/// Field reported when the request body as a whole cannot be decoded
pub const BODY_FIELD: &str = "body";

/// Map an accepted alias to the field name used in errors
fn canonical_field(key: &str) -> &str {
    match key {
        "nonce" => "idempotencyToken",
        "expireDate" => "expireAt",
        "lang" => "language",
        other => other,
    }
}

/// A validated checkout request, ready for the transport layer.
///
/// Only the session builder constructs one; fields are read-only afterwards.
/// Serializes to the gateway's wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    nonce: String,
    phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    cancel_url: String,
    success_url: String,
    error_url: String,
    notify_url: String,
    payment_methods: Vec<PaymentMethod>,
    #[serde(serialize_with = "serialize_timestamp")]
    expire_date: DateTime<Utc>,
    items: Vec<LineItem>,
    beneficiaries: Vec<Beneficiary>,
    lang: Language,
}

/// Callback URLs carried by a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallbackUrls {
    pub cancel: String,
    pub success: String,
    pub error: String,
    pub notify: String,
}

impl CheckoutRequest {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        nonce: String,
        phone: String,
        email: Option<String>,
        urls: CallbackUrls,
        payment_methods: Vec<PaymentMethod>,
        expire_date: DateTime<Utc>,
        items: Vec<LineItem>,
        beneficiaries: Vec<Beneficiary>,
        lang: Language,
    ) -> Self {
        Self {
            nonce,
            phone,
            email,
            cancel_url: urls.cancel,
            success_url: urls.success,
            error_url: urls.error,
            notify_url: urls.notify,
            payment_methods,
            expire_date,
            items,
            beneficiaries,
            lang,
        }
    }

    /// Idempotency token sent as `nonce`
    pub fn idempotency_token(&self) -> &str {
        &self.nonce
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn cancel_url(&self) -> &str {
        &self.cancel_url
    }

    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    pub fn error_url(&self) -> &str {
        &self.error_url
    }

    pub fn notify_url(&self) -> &str {
        &self.notify_url
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn expire_at(&self) -> DateTime<Utc> {
        self.expire_date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn beneficiaries(&self) -> &[Beneficiary] {
        &self.beneficiaries
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// Amount routed to the first beneficiary, if any
    pub fn first_beneficiary_amount(&self) -> Option<f64> {
        self.beneficiaries.first().and_then(|b| b.amount)
    }
}

/// Render a timestamp the way the gateway expects: RFC 3339, UTC, milliseconds
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_input_accepts_wire_aliases() {
        let input: CheckoutInput = serde_json::from_value(json!({
            "phone": "251911223344",
            "nonce": "abc",
            "expireDate": "2030-01-01T00:00:00.000Z",
            "lang": "AM",
            "items": [{"name": "Book", "quantity": 2, "price": 100}],
            "beneficiaries": [{"accountNumber": "01320811436100", "bank": "AWINETAA", "amount": 200.0}]
        }))
        .unwrap();

        assert_eq!(input.idempotency_token.as_deref(), Some("abc"));
        assert_eq!(input.expire_at.as_deref(), Some("2030-01-01T00:00:00.000Z"));
        assert_eq!(input.language, Some(Language::Am));

        let items = input.items.unwrap();
        assert_eq!(items[0].quantity, Some(json!(2)));
        assert_eq!(items[0].details.get("name"), Some(&json!("Book")));

        let beneficiaries = input.beneficiaries.unwrap();
        assert_eq!(beneficiaries[0].amount, Some(200.0));
        assert_eq!(beneficiaries[0].details.get("bank"), Some(&json!("AWINETAA")));
    }

    #[test]
    fn test_input_accepts_camel_case_names() {
        let input: CheckoutInput = serde_json::from_value(json!({
            "notifyUrl": "https://example.com/notify",
            "idempotencyToken": "tok",
            "expireAt": "2030-01-01T00:00:00Z",
            "paymentMethods": ["TELEBIRR", "CBE"]
        }))
        .unwrap();

        assert_eq!(input.notify_url.as_deref(), Some("https://example.com/notify"));
        assert_eq!(input.idempotency_token.as_deref(), Some("tok"));
        assert_eq!(
            input.payment_methods,
            Some(vec![PaymentMethod::Telebirr, PaymentMethod::Cbe])
        );
    }

    #[test]
    fn test_from_json_names_the_malformed_field() {
        let err = CheckoutInput::from_json(json!({
            "phone": "251911223344",
            "lang": "FR"
        }))
        .unwrap_err();
        assert_eq!(err, CheckoutError::validation("language", REASON_INVALID_FORMAT));

        let err = CheckoutInput::from_json(json!({"paymentMethods": ["TELEBIRR", "VISA"]}))
            .unwrap_err();
        assert_eq!(err.field(), Some("paymentMethods"));

        let err = CheckoutInput::from_json(json!({"phone": 251911223344u64})).unwrap_err();
        assert_eq!(err.field(), Some("phone"));

        let err = CheckoutInput::from_json(json!({"beneficiaries": [{"amount": "ten"}]}))
            .unwrap_err();
        assert_eq!(err.field(), Some("beneficiaries"));
    }

    #[test]
    fn test_from_json_rejects_non_object_body() {
        let err = CheckoutInput::from_json(json!(["phone"])).unwrap_err();
        assert_eq!(err, CheckoutError::validation(BODY_FIELD, REASON_INVALID_FORMAT));
    }

    #[test]
    fn test_from_json_keeps_missing_amount_for_the_builder() {
        let input = CheckoutInput::from_json(json!({
            "beneficiaries": [{"bank": "AWINETAA"}]
        }))
        .unwrap();

        let beneficiaries = input.beneficiaries.unwrap();
        assert_eq!(beneficiaries[0].amount, None);
        assert_eq!(beneficiaries[0].details.get("bank"), Some(&json!("AWINETAA")));
    }

    #[test]
    fn test_item_new_drops_non_finite_numbers() {
        let item = ItemInput::new("x", f64::NAN, 10.0);
        assert!(item.quantity.is_none());
        assert!(item.price.is_some());
    }

    #[test]
    fn test_request_wire_format() {
        let request = CheckoutRequest::new(
            "nonce-1".to_string(),
            "251911223344".to_string(),
            None,
            CallbackUrls {
                cancel: "https://e.com/c".to_string(),
                success: "https://e.com/s".to_string(),
                error: "https://e.com/e".to_string(),
                notify: "https://e.com/n".to_string(),
            },
            vec![PaymentMethod::Telebirr],
            Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap(),
            vec![LineItem {
                quantity: Number::from(1),
                price: Number::from(50),
                details: Map::new(),
            }],
            vec![Beneficiary::new(50.0)],
            Language::En,
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nonce"], "nonce-1");
        assert_eq!(value["expireDate"], "2030-01-01T12:00:00.000Z");
        assert_eq!(value["lang"], "EN");
        assert_eq!(value["paymentMethods"], json!(["TELEBIRR"]));
        assert_eq!(value["items"][0]["quantity"], 1);
        assert_eq!(value["notifyUrl"], "https://e.com/n");
        assert!(value.get("email").is_none());
        assert_eq!(request.first_beneficiary_amount(), Some(50.0));
    }
}

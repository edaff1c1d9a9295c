//! # Field Validators
//!
//! Pure predicates over individual checkout fields. None of these panic or
//! error: malformed input simply fails the predicate.

use crate::request::ItemInput;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

/// `251` country code, carrier digit 7 or 9, then eight subscriber digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^251[79][0-9]{8}$").expect("phone pattern is a valid regex")
});

/// Naive layouts accepted in addition to RFC 3339; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Check that `phone` is a 12-digit number in `2519XXXXXXXX` / `2517XXXXXXXX` form.
///
/// No `+` prefix and no separators are accepted.
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Parse a timestamp string, returning `None` if it has no recognised layout
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse `ts` and keep it only if it lies strictly after `now`
pub fn future_timestamp(ts: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    parse_timestamp(ts).filter(|parsed| *parsed > now)
}

/// True if `ts` parses and is strictly after `now`
pub fn is_future_timestamp_at(ts: &str, now: DateTime<Utc>) -> bool {
    future_timestamp(ts, now).is_some()
}

/// True if `ts` parses and is strictly after the current wall-clock time
pub fn is_future_timestamp(ts: &str) -> bool {
    is_future_timestamp_at(ts, Utc::now())
}

/// Returns the number held by `value` if it is a finite JSON number
pub fn finite_number(value: Option<&Value>) -> Option<&Number> {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => Some(n),
        _ => None,
    }
}

/// True iff every item has a numeric, finite `quantity` and `price`.
///
/// An empty slice passes; non-emptiness is checked by the session builder.
pub fn all_items_numeric(items: &[ItemInput]) -> bool {
    items.iter().all(|item| {
        finite_number(item.quantity.as_ref()).is_some()
            && finite_number(item.price.as_ref()).is_some()
    })
}

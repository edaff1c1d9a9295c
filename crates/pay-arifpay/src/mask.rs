//! Masking of personal data before it reaches the logs.

use pay_core::CheckoutRequest;
use serde_json::Value;

/// Keep the country code and last four digits: `251911223344` -> `251*****3344`
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 7))
}

/// Keep the first character of the local part: `buyer@example.com` -> `b***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// The outbound payload with phone and email masked, for failure logs
pub fn masked_payload(request: &CheckoutRequest) -> Value {
    let mut payload = serde_json::to_value(request).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut payload {
        map.insert("phone".to_string(), Value::String(mask_phone(request.phone())));
        if let Some(email) = request.email() {
            map.insert("email".to_string(), Value::String(mask_email(email)));
        }
    }
    payload
}

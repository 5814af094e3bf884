//! Parsing of untrusted request input for the pet handlers.
//!
//! Both rules are loose: `/pets/2abc` resolves to pet 2, and a create with
//! `"name": 0` is rejected the same way as a missing name.

use serde_json::Value;

use super::model::{NewPet, PetId};
use crate::error::ApiError;

/// Parse an identifier path token leniently.
///
/// Mirrors integer-prefix parsing without a radix: leading whitespace is
/// skipped, an optional sign is accepted, `0x`/`0X` selects hexadecimal, and
/// the longest run of digits that follows is used. Anything after the digits
/// is ignored.
///
/// Returns `None` when there is no numeric prefix, and also for negative or
/// overflowing values since those can never equal an assigned id.
#[must_use]
pub fn parse_lenient_id(token: &str) -> Option<PetId> {
    let s = token.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };
    let end = s.find(|c: char| !c.is_digit(radix)).unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() || negative {
        return None;
    }
    PetId::from_str_radix(digits, radix).ok()
}

/// Truthiness of a JSON value: `null`, `false`, `0` and `""` are falsy,
/// everything else (including empty arrays and objects) is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extract `name` and `type` from a create request body.
///
/// A missing body, a non-object body, or a missing/falsy field all yield
/// [`ApiError::InvalidInput`]. Any truthy value is kept as sent.
pub fn parse_new_pet(body: Option<&Value>) -> Result<NewPet, ApiError> {
    let fields = body.and_then(Value::as_object);
    let field = |key: &str| fields.and_then(|f| f.get(key)).filter(|v| is_truthy(v));
    match (field("name"), field("type")) {
        (Some(name), Some(kind)) => Ok(NewPet::new(name.clone(), kind.clone())),
        _ => Err(ApiError::InvalidInput),
    }
}

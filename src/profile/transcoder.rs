// src/profile/transcoder.rs
//! Conversion between the wire profile (comma-joined strings) and the
//! domain-shaped form seed (sequences).
//!
//! Both directions are total: malformed input is coerced, never rejected.
//! Fields the schema does not know about are copied through unchanged.

use serde_json::{Number, Value};
use tracing::debug;

use crate::types::profile::{EmploymentType, FieldKind, ProfileField, ProfileRecord};

const VALUE_SEPARATOR: char = ',';
const JOIN_SEPARATOR: &str = ", ";

/// Split a comma-separated input, trimming elements and dropping empty ones
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}

/// Wire record -> form seed. `fallback_email` is the authenticated
/// user's email, used when the backend has none.
pub fn decode_for_display(wire: &ProfileRecord, fallback_email: &str) -> ProfileRecord {
    let mut seed = wire.clone();

    for field in ProfileField::ALL {
        let current = wire.field(field);
        // Optional: stays absent when the backend has none
        if field == ProfileField::ResumeLink && current.is_none() {
            continue;
        }
        let decoded = match field {
            ProfileField::Email => decode_email(current, fallback_email),
            ProfileField::EmploymentType => decode_employment_type(current),
            _ => match field.kind() {
                FieldKind::MultiValue => decode_multi_value(current),
                FieldKind::Number => coerce_number(current),
                FieldKind::Boolean => Value::Bool(is_truthy(current)),
                FieldKind::Text | FieldKind::Choice => coerce_text(current),
            },
        };
        seed.set(field, decoded);
    }

    debug!(
        "Decoded profile record for display ({} extra fields kept)",
        seed.extra_fields().len()
    );
    seed
}

/// Form values -> wire record: sequences are joined with ", ",
/// everything else (already-joined strings included) passes through.
pub fn encode_for_submission(domain: &ProfileRecord) -> ProfileRecord {
    let mut wire = domain.clone();

    for field in ProfileField::MULTI_VALUE {
        if let Some(Value::Array(items)) = domain.field(field) {
            let joined = join_values(&items.iter().map(value_text).collect::<Vec<_>>());
            wire.set(field, Value::String(joined));
        }
    }

    wire
}

fn decode_multi_value(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(raw)) => Value::from(split_values(raw)),
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(Value::Number(n)) => Value::from(split_values(&n.to_string())),
        Some(Value::Bool(b)) => Value::from(vec![b.to_string()]),
        Some(Value::Null) | Some(Value::Object(_)) | None => Value::Array(Vec::new()),
    }
}

fn decode_email(value: Option<&Value>, fallback_email: &str) -> Value {
    match value {
        Some(Value::String(email)) if !email.is_empty() => Value::String(email.clone()),
        _ => Value::String(fallback_email.to_string()),
    }
}

fn decode_employment_type(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(kind)) if !kind.is_empty() => Value::String(kind.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            Value::from(EmploymentType::default().as_str())
        }
        Some(other) => other.clone(),
    }
}

fn coerce_text(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(Value::Number(n)) => Value::String(n.to_string()),
        Some(Value::Bool(b)) => Value::String(b.to_string()),
        Some(other) => other.clone(),
    }
}

/// Numeric parse with a zero fallback for anything non-numeric.
///
/// Only decimal integers and finite decimal floats are recognised: hex
/// (`"0x10"`), `"Infinity"` and out-of-range values such as `"1e400"`
/// all fall back to 0.
pub(crate) fn coerce_number(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Number(n)) => Value::Number(n.clone()),
        Some(Value::String(raw)) => parse_number(raw),
        Some(Value::Bool(b)) => Value::from(u8::from(*b)),
        _ => Value::from(0),
    }
}

fn parse_number(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

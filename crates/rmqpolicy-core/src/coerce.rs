//! Loose argument coercion for keyword-style policy construction.
//!
//! Policy entries come from hand-written configuration, so a priority of
//! `0` and `"0"` or a ttl of `3600` and `"3600"` must mean the same thing.

use serde_json::Value;

use crate::error::{PolicyError, Result};

/// Strings pass through; numbers and booleans render as text.
pub fn string(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(mismatch(field, other, "string")),
    }
}

/// Like `string`, with `null` meaning "not given".
pub fn optional_string(field: &'static str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        other => string(field, other).map(Some),
    }
}

/// Integral numbers, integral-truncated floats, numeric strings, booleans as 0/1.
pub fn integer(field: &'static str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(mismatch(field, value, "integer")),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| mismatch(field, value, "integer")),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(mismatch(field, other, "integer")),
    }
}

/// Truthiness: `false`, `null`, zero and empty containers are false.
pub fn boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A definition may be given as JSON text or as a structured document.
pub fn definition(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Object(_) => Ok(Some(value.to_string())),
        other => Err(mismatch("definition", other, "JSON document")),
    }
}

fn mismatch(field: &'static str, value: &Value, expected: &'static str) -> PolicyError {
    PolicyError::Coercion {
        field,
        value: value.to_string(),
        expected,
    }
}

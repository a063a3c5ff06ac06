//! Validation of user-entered set counts
//!
//! Set counts come from the CLI and from HTTP bodies. Both go through these
//! functions so that only `1..=MAX_SETS` ever reaches the engine.

use std::num::NonZeroU32;
use serde_json::Value;

use crate::error::SetCountError;

/// Largest set count accepted from users
pub const MAX_SETS: u32 = 99;

/// Check an integer set count against the accepted range
pub fn validate_set_count(value: i64) -> Result<NonZeroU32, SetCountError> {
    u32::try_from(value)
        .ok()
        .filter(|n| *n <= MAX_SETS)
        .and_then(NonZeroU32::new)
        .ok_or(SetCountError::OutOfRange { value, max: MAX_SETS })
}

/// Parse a set count typed as text, e.g. a CLI argument or a form field
pub fn parse_set_count_str(raw: &str) -> Result<NonZeroU32, SetCountError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return validate_set_count(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Err(SetCountError::NotWhole(f)),
        _ => Err(SetCountError::NotANumber),
    }
}

/// Parse a set count from a JSON value; numeric strings are accepted
pub fn parse_set_count(value: &Value) -> Result<NonZeroU32, SetCountError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                validate_set_count(i)
            } else if let Some(u) = n.as_u64() {
                Err(SetCountError::OutOfRange {
                    value: i64::try_from(u).unwrap_or(i64::MAX),
                    max: MAX_SETS,
                })
            } else {
                Err(SetCountError::NotWhole(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::String(s) => parse_set_count_str(s),
        _ => Err(SetCountError::NotANumber),
    }
}

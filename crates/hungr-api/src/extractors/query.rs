//! Query-parameter helpers.
//!
//! Parameters arrive as optional strings so each endpoint can answer with
//! its own message instead of a generic deserialization rejection.

use uuid::Uuid;

use crate::error::ApiError;

/// A present, non-blank parameter, or 400 "`<name>` is required".
pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation(format!("{name} is required")))
}

/// Parse a required UUID parameter, answering "invalid `<name>`" on bad input.
pub fn parse_uuid(value: &Option<String>, name: &str) -> Result<Uuid, ApiError> {
    let raw = require(value, name)?;
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("invalid {name}")))
}

/// Boolean flag in the forms `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

//! Conversion between the wire DTOs in `shared` and the domain models.
//!
//! Request mappers are where shape validation happens: required fields,
//! value types, formats and length limits are checked here and reported per
//! field, so the domain only ever sees well-formed values.

pub mod child_mapper;
pub mod journal_mapper;

use serde_json::Value;

use crate::domain::errors::{FieldErrors, REQUIRED};

/// How much of a resource a request body describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// POST and PUT: required fields must be present
    Full,
    /// PATCH: any subset of fields
    Partial,
}

/// Parse a field that must be present in `Full` mode.
/// Records an error and returns `None` when it is missing or invalid.
fn parse_required<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    mode: RequestMode,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match value {
        Some(raw) => parse_value(errors, field, &raw, parse),
        None => {
            if mode == RequestMode::Full {
                errors.add(field, REQUIRED);
            }
            None
        }
    }
}

/// Parse a field that may be omitted but never needs to be present
fn parse_optional<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    value.and_then(|raw| parse_value(errors, field, &raw, parse))
}

/// Parse a nullable field, keeping the omitted / null / value distinction
fn parse_nullable<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Option<Value>>,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<Option<T>> {
    match value {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => parse_value(errors, field, &raw, parse).map(Some),
    }
}

fn parse_value<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Value,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match parse(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Strings pass through and numbers are taken in their decimal form
fn text_value(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err("Not a valid string.".to_string()),
    }
}

/// Integers, or strings holding one
fn integer_value(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| "A valid integer is required.".to_string())
}

fn boolean_value(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| "Must be a valid boolean.".to_string())
}

//! Typed access to fields of untyped OpenLABEL records.
//!
//! Every accessor takes the wire field name and the uid of the enclosing
//! entity so that a [`SchemaError`] always names what went wrong and where.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::SchemaError;

/// A JSON object as found in an OpenLABEL file.
pub type Record = Map<String, Value>;

/// Interprets `value` as a record.
pub fn as_record<'a>(
    value: &'a Value,
    field: &str,
    uid: Option<&str>,
) -> Result<&'a Record, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::invalid(field, uid, "expected an object"))
}

/// Interprets `value` as a sequence.
pub fn as_array<'a>(
    value: &'a Value,
    field: &str,
    uid: Option<&str>,
) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::invalid(field, uid, "expected an array"))
}

/// Returns a required field or fails naming it.
pub fn required<'a>(
    record: &'a Record,
    field: &str,
    uid: Option<&str>,
) -> Result<&'a Value, SchemaError> {
    record
        .get(field)
        .ok_or_else(|| SchemaError::missing(field, uid))
}

/// Best-effort read of a record's `uid`, used only for error context.
pub fn record_uid(record: &Record) -> Option<String> {
    record.get("uid").and_then(scalar_to_string)
}

/// Reads a required identifier-like field. Strings are taken as-is,
/// integers are rendered in decimal.
pub fn required_string(
    record: &Record,
    field: &str,
    uid: Option<&str>,
) -> Result<String, SchemaError> {
    let value = required(record, field, uid)?;
    scalar_to_string(value)
        .ok_or_else(|| SchemaError::invalid(field, uid, "expected a string"))
}

/// Reads an optional string field. Present-but-mistyped is still an error.
pub fn optional_string(
    record: &Record,
    field: &str,
    uid: Option<&str>,
) -> Result<Option<String>, SchemaError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(SchemaError::invalid(field, uid, "expected a string")),
    }
}

/// Reads a required flag, coercing numbers (non-zero is `true`).
pub fn required_bool(record: &Record, field: &str, uid: Option<&str>) -> Result<bool, SchemaError> {
    match required(record, field, uid)? {
        Value::Bool(flag) => Ok(*flag),
        Value::Number(number) => Ok(number.as_f64().is_some_and(|v| v != 0.0)),
        _ => Err(SchemaError::invalid(field, uid, "expected a boolean")),
    }
}

/// Reads a required numeric field.
pub fn required_f64(record: &Record, field: &str, uid: Option<&str>) -> Result<f64, SchemaError> {
    required(record, field, uid)?
        .as_f64()
        .ok_or_else(|| SchemaError::invalid(field, uid, "expected a number"))
}

/// Reads a flat sequence of numbers.
pub fn f64_array(value: &Value, field: &str, uid: Option<&str>) -> Result<Vec<f64>, SchemaError> {
    as_array(value, field, uid)?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_f64().ok_or_else(|| {
                SchemaError::invalid(field, uid, format!("element {idx} is not a number"))
            })
        })
        .collect()
}

/// Parses a timestamp given either as decimal text or as a JSON number,
/// keeping every digit of sub-second precision. Numbers rely on serde_json's
/// `arbitrary_precision` feature to reach this point unrounded.
pub fn decimal(value: &Value, field: &str, uid: Option<&str>) -> Result<Decimal, SchemaError> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return Err(SchemaError::invalid(field, uid, "expected a decimal number")),
    };

    Decimal::from_str_exact(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .or_else(|_| Decimal::from_str(text.trim()))
        .map_err(|err| SchemaError::invalid(field, uid, format!("invalid decimal '{text}': {err}")))
}

/// Encodes a finite number. NaN and infinities have no JSON form.
pub fn number(value: f64, field: &str, uid: Option<&str>) -> Result<Value, SchemaError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| SchemaError::invalid(field, uid, format!("{value} is not a finite number")))
}

/// Encodes a flat sequence of finite numbers.
pub fn numbers(
    values: impl IntoIterator<Item = f64>,
    field: &str,
    uid: Option<&str>,
) -> Result<Value, SchemaError> {
    values
        .into_iter()
        .map(|value| number(value, field, uid))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Deserializes a serde-shaped section entry, e.g. one coordinate system.
pub fn deserialize<T: DeserializeOwned>(
    value: &Value,
    field: &str,
    uid: Option<&str>,
) -> Result<T, SchemaError> {
    T::deserialize(value).map_err(|err| SchemaError::invalid(field, uid, err.to_string()))
}

/// Serializes a serde-shaped section entry.
pub fn serialize<T: Serialize>(value: &T, field: &str, uid: Option<&str>) -> Result<Value, SchemaError> {
    serde_json::to_value(value).map_err(|err| SchemaError::invalid(field, uid, err.to_string()))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Some(number.to_string()),
        _ => None,
    }
}

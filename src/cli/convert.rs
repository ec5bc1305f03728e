//! JSON <-> options-record Value conversion utilities

use crate::{Object, Value};

use super::CliError;

/// Convert serde_json::Value to a Value
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(|v| Some(json_to_value(v))).collect())
        }
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Convert a Value to serde_json::Value
///
/// JSON has no holes, `undefined`, functions or global objects; all of
/// them become `null`.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Undefined | Value::Null | Value::Function(_) | Value::Global(_) => {
            serde_json::Value::Null
        }
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Number(n) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(
            arr.into_iter()
                .map(|v| v.map(value_to_json).unwrap_or(serde_json::Value::Null))
                .collect(),
        ),
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Parse a JSON object into a scope
pub fn scope_from_json(json: &str) -> Result<Object, CliError> {
    match json_to_value(serde_json::from_str(json)?) {
        Value::Object(obj) => Ok(obj),
        other => Err(CliError::InvalidScope(other.type_name().to_string())),
    }
}

//! Host JSON values ↔ transport `Value`.

use serde_json::{Number, Value as JsonValue};

use sqlbridge_core::Value;

/// Map a host argument to a transport value.
///
/// Booleans become the text `"true"`/`"false"`; arrays and objects become
/// their JSON text. Integers that do not fit `i64` fall back to `Float`.
pub fn value_from_json(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Text(b.to_string()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Text(json.to_string()),
    }
}

/// Map a result value back to JSON. Non-finite floats have no JSON form and
/// encode as null.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Integer(i) => JsonValue::from(*i),
        Value::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(s) => JsonValue::String(s.clone()),
    }
}

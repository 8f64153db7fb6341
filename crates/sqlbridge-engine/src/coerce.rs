//! Value coercion between transport values and SQLite.
//!
//! Inbound: every bind parameter is bound as text, whatever its transport
//! type. `Integer(42)` and `Text("42")` bind identically. `Null` binds SQL
//! NULL.
//!
//! Outbound: result cells map by runtime storage class. BLOBs are decoded
//! as UTF-8 text (invalid sequences become U+FFFD), never base64 or hex.

use rusqlite::types::ValueRef;
use rusqlite::Statement;

use sqlbridge_core::Value;

/// Text form a parameter is bound with. `None` binds NULL.
pub fn bind_text(value: &Value) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Bind `params` positionally (1-based) as text.
///
/// Fewer parameters than placeholders leaves the rest NULL; more is an
/// engine error for this statement.
pub fn bind_params(stmt: &mut Statement<'_>, params: &[Value]) -> rusqlite::Result<()> {
    for (i, value) in params.iter().enumerate() {
        stmt.raw_bind_parameter(i + 1, bind_text(value))?;
    }
    Ok(())
}

/// Convert one result cell into a transport value.
pub fn column_value(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Text(blob_to_text(bytes)),
    }
}

/// Reinterpret raw bytes as text. Lossy for non-UTF-8 input.
pub fn blob_to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

//! Batch results → host JSON.
//!
//! Two shapes exist. `exec` returns one positional entry per statement:
//! `[errorOrNull, insertId|null, rowsAffected, columns, rows]`. The
//! single-statement actions return `{insertId, rowsAffected, rows}` with
//! each row keyed by column name, and report a failure as an error string
//! instead.

use serde_json::{json, Map, Value as JsonValue};

use sqlbridge_core::{BatchResult, StatementOutcome, Value};

use super::values::value_to_json;

/// Encode every outcome of a batch, in statement order.
pub fn encode_batch(result: &BatchResult) -> JsonValue {
    JsonValue::Array(result.iter().map(encode_entry).collect())
}

/// Positional entry for one outcome.
pub fn encode_entry(outcome: &StatementOutcome) -> JsonValue {
    match outcome {
        StatementOutcome::Rows { columns, rows } => {
            json!([null, null, 0, columns, encode_rows(rows)])
        }
        StatementOutcome::Mutation {
            rows_affected,
            insert_id,
        } => json!([null, insert_id, rows_affected, [], []]),
        StatementOutcome::Failed { message } => json!([message, null, 0, [], []]),
    }
}

/// Object form for the single-statement actions. `Err` carries the
/// statement's failure message.
pub fn encode_legacy(outcome: &StatementOutcome) -> Result<JsonValue, String> {
    match outcome {
        StatementOutcome::Rows { columns, rows } => Ok(json!({
            "insertId": null,
            "rowsAffected": 0,
            "rows": rows.iter().map(|row| row_object(columns, row)).collect::<Vec<_>>(),
        })),
        StatementOutcome::Mutation {
            rows_affected,
            insert_id,
        } => Ok(json!({
            "insertId": insert_id,
            "rowsAffected": rows_affected,
            "rows": [],
        })),
        StatementOutcome::Failed { message } => Err(message.clone()),
    }
}

fn encode_rows(rows: &[Vec<Value>]) -> JsonValue {
    rows.iter()
        .map(|row| row.iter().map(value_to_json).collect::<JsonValue>())
        .collect()
}

// A repeated column name keeps the last value.
fn row_object(columns: &[String], row: &[Value]) -> JsonValue {
    let mut object = Map::with_capacity(columns.len());
    for (name, value) in columns.iter().zip(row) {
        object.insert(name.clone(), value_to_json(value));
    }
    JsonValue::Object(object)
}

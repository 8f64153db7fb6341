//! Host argument arrays → `BatchRequest`.
//!
//! Any shape mismatch is an `ArgumentError` for the whole request; nothing
//! reaches the queue.

use serde_json::Value as JsonValue;

use sqlbridge_core::{BatchRequest, BridgeError, BridgeResult, Statement, Value};

use super::values::value_from_json;
use crate::action::Action;

/// Decode the argument array of `action` into a request for the queue.
pub fn decode_request(action: Action, args: &JsonValue) -> BridgeResult<BatchRequest> {
    let args = args
        .as_array()
        .ok_or_else(|| BridgeError::argument(format!("{action}: arguments must be an array")))?;

    let request = match action {
        Action::Exec => decode_exec(args)?,
        Action::Run | Action::All => decode_single(args)?,
    };
    Ok(request.with_dispatch(action.dispatch()))
}

// ---- exec: [dbName, [[sql, bindArgs], ...], readOnly] ----

fn decode_exec(args: &[JsonValue]) -> BridgeResult<BatchRequest> {
    let database = database_name(args)?;

    let queries = arg(args, 1, "queries")?
        .as_array()
        .ok_or_else(|| BridgeError::argument("queries must be an array"))?;
    let statements = queries
        .iter()
        .enumerate()
        .map(|(i, q)| decode_query(i, q))
        .collect::<BridgeResult<Vec<_>>>()?;

    let read_only = match arg(args, 2, "readOnly")? {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        other => {
            return Err(BridgeError::argument(format!(
                "readOnly must be a boolean, got {other}"
            )))
        }
    };

    Ok(BatchRequest::new(database, statements, read_only))
}

fn decode_query(index: usize, query: &JsonValue) -> BridgeResult<Statement> {
    let pair = match query.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        _ => {
            return Err(BridgeError::argument(format!(
                "query {index} must be a [sql, bindArgs] pair"
            )))
        }
    };
    let sql = pair[0]
        .as_str()
        .ok_or_else(|| BridgeError::argument(format!("query {index}: sql must be a string")))?;
    let params = bind_args(&pair[1], index)?;
    Ok(Statement::new(sql, params))
}

// ---- run / all: [dbName, sql, bindArgs|null] ----

fn decode_single(args: &[JsonValue]) -> BridgeResult<BatchRequest> {
    let database = database_name(args)?;
    let sql = arg(args, 1, "sql")?
        .as_str()
        .ok_or_else(|| BridgeError::argument("sql must be a string"))?;
    let params = match args.get(2) {
        Some(v) => bind_args(v, 0)?,
        None => Vec::new(),
    };
    Ok(BatchRequest::new(
        database,
        vec![Statement::new(sql, params)],
        false,
    ))
}

// ---- shared ----

fn arg<'a>(args: &'a [JsonValue], index: usize, what: &str) -> BridgeResult<&'a JsonValue> {
    args.get(index)
        .ok_or_else(|| BridgeError::argument(format!("missing argument {index} ({what})")))
}

fn database_name(args: &[JsonValue]) -> BridgeResult<&str> {
    arg(args, 0, "dbName")?
        .as_str()
        .ok_or_else(|| BridgeError::argument("dbName must be a string"))
}

fn bind_args(json: &JsonValue, index: usize) -> BridgeResult<Vec<Value>> {
    match json {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Array(items) => Ok(items.iter().map(value_from_json).collect()),
        _ => Err(BridgeError::argument(format!(
            "query {index}: bindArgs must be an array or null"
        ))),
    }
}

//! Runs one classified statement against one handle.
//!
//! Never fails: every engine error becomes `StatementOutcome::Failed` with
//! SQLite's message text.

use rusqlite::Connection;
use tracing::debug;

use sqlbridge_core::{Category, Statement, StatementOutcome};

use crate::coerce;

/// Run `statement` as `category` and capture its outcome.
pub fn run_statement(conn: &Connection, statement: &Statement, category: Category) -> StatementOutcome {
    debug!(%category, sql = statement.sql(), params = statement.params().len(), "running statement");

    let result = match category {
        Category::Select => query_rows(conn, statement),
        Category::Insert => execute_insert(conn, statement),
        Category::Mutation => execute_mutation(conn, statement),
        Category::BeginTxn => begin_transaction(conn),
        Category::EndTxn => end_transaction(conn),
    };

    result.unwrap_or_else(|e| {
        debug!(%category, error = %e, "statement failed");
        StatementOutcome::failed(e.to_string())
    })
}

fn query_rows(conn: &Connection, statement: &Statement) -> rusqlite::Result<StatementOutcome> {
    let mut stmt = conn.prepare(statement.sql())?;
    coerce::bind_params(&mut stmt, statement.params())?;

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.raw_query();
    while let Some(row) = cursor.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(coerce::column_value(row.get_ref(i)?));
        }
        rows.push(cells);
    }

    Ok(StatementOutcome::Rows { columns, rows })
}

/// rows_affected is 1 when a row id was produced, else 0.
fn execute_insert(conn: &Connection, statement: &Statement) -> rusqlite::Result<StatementOutcome> {
    if execute_counted(conn, statement)? > 0 {
        Ok(StatementOutcome::Mutation {
            rows_affected: 1,
            insert_id: Some(conn.last_insert_rowid()),
        })
    } else {
        Ok(StatementOutcome::empty_mutation())
    }
}

fn execute_mutation(conn: &Connection, statement: &Statement) -> rusqlite::Result<StatementOutcome> {
    Ok(StatementOutcome::Mutation {
        rows_affected: execute_counted(conn, statement)?,
        insert_id: None,
    })
}

/// Step a write and return the rows it changed. `sqlite3_changes()` keeps
/// the count of the last INSERT/UPDATE/DELETE, so a statement that leaves
/// `total_changes()` where it was (DDL, transaction control, a DML that
/// matched nothing) reports 0.
fn execute_counted(conn: &Connection, statement: &Statement) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare(statement.sql())?;
    coerce::bind_params(&mut stmt, statement.params())?;

    let before = conn.total_changes();
    let changed = stmt.raw_execute()?;
    if conn.total_changes() == before {
        Ok(0)
    } else {
        Ok(changed)
    }
}

// Legacy protocol: the statement text is not compiled, the handle's
// transaction is driven directly.

fn begin_transaction(conn: &Connection) -> rusqlite::Result<StatementOutcome> {
    conn.execute_batch("BEGIN")?;
    Ok(StatementOutcome::empty_mutation())
}

fn end_transaction(conn: &Connection) -> rusqlite::Result<StatementOutcome> {
    conn.execute_batch("COMMIT")?;
    Ok(StatementOutcome::empty_mutation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbridge_core::Value;

    fn conn_with_table() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, x TEXT)")
            .unwrap();
        conn
    }

    #[test]
    fn insert_reports_row_id() {
        let conn = conn_with_table();
        let outcome = run_statement(
            &conn,
            &Statement::new("INSERT INTO t (x) VALUES (?)", vec![Value::from("a")]),
            Category::Insert,
        );
        assert_eq!(
            outcome,
            StatementOutcome::Mutation {
                rows_affected: 1,
                insert_id: Some(1),
            }
        );
    }

    #[test]
    fn ignored_insert_reports_nothing() {
        let conn = conn_with_table();
        conn.execute_batch("INSERT INTO t (id, x) VALUES (1, 'a')").unwrap();
        let outcome = run_statement(
            &conn,
            &Statement::bare("INSERT OR IGNORE INTO t (id, x) VALUES (1, 'b')"),
            Category::Insert,
        );
        assert_eq!(outcome, StatementOutcome::empty_mutation());
    }

    #[test]
    fn update_reports_changes_without_insert_id() {
        let conn = conn_with_table();
        conn.execute_batch("INSERT INTO t (x) VALUES ('a'), ('b'), ('c')").unwrap();
        let outcome = run_statement(
            &conn,
            &Statement::new(
                "UPDATE t SET x = ? WHERE id > ?",
                vec![Value::from("z"), Value::Integer(1)],
            ),
            Category::Mutation,
        );
        assert_eq!(
            outcome,
            StatementOutcome::Mutation {
                rows_affected: 2,
                insert_id: None,
            }
        );
    }

    #[test]
    fn statements_that_change_no_rows_report_zero_after_inserts() {
        let conn = conn_with_table();
        let insert = run_statement(
            &conn,
            &Statement::bare("INSERT INTO t (x) VALUES ('a'), ('b')"),
            Category::Insert,
        );
        assert_eq!(insert.insert_id(), Some(2));

        for sql in [
            "DROP TABLE t",
            "CREATE TABLE t2 (y)",
            "BEGIN",
            "COMMIT",
            "DELETE FROM t2",
        ] {
            assert_eq!(
                run_statement(&conn, &Statement::bare(sql), Category::Mutation),
                StatementOutcome::Mutation {
                    rows_affected: 0,
                    insert_id: None,
                },
                "{sql}"
            );
        }
    }

    #[test]
    fn ignored_insert_after_write_reports_nothing() {
        let conn = conn_with_table();
        let first = Statement::bare("INSERT INTO t (id, x) VALUES (5, 'a')");
        assert_eq!(run_statement(&conn, &first, Category::Insert).insert_id(), Some(5));
        let outcome = run_statement(
            &conn,
            &Statement::bare("INSERT OR IGNORE INTO t (id, x) VALUES (5, 'b')"),
            Category::Insert,
        );
        assert_eq!(outcome, StatementOutcome::empty_mutation());
    }

    #[test]
    fn select_preserves_column_and_row_order() {
        let conn = conn_with_table();
        conn.execute_batch("INSERT INTO t (x) VALUES ('first'), ('second')").unwrap();
        let outcome = run_statement(
            &conn,
            &Statement::bare("SELECT x, id, NULL AS n, 1.5 AS f FROM t ORDER BY id"),
            Category::Select,
        );
        assert_eq!(outcome.columns(), ["x", "id", "n", "f"]);
        assert_eq!(
            outcome.rows(),
            [
                vec![Value::from("first"), Value::Integer(1), Value::Null, Value::Float(1.5)],
                vec![Value::from("second"), Value::Integer(2), Value::Null, Value::Float(1.5)],
            ]
        );
    }

    #[test]
    fn select_on_empty_table_keeps_columns() {
        let conn = conn_with_table();
        let outcome = run_statement(&conn, &Statement::bare("SELECT * FROM t"), Category::Select);
        assert_eq!(outcome.columns(), ["id", "x"]);
        assert!(outcome.rows().is_empty());
    }

    #[test]
    fn engine_errors_become_failed_outcomes() {
        let conn = conn_with_table();
        let outcome = run_statement(&conn, &Statement::bare("SELECT * FROM missing"), Category::Select);
        let message = outcome.error_message().unwrap();
        assert!(message.contains("no such table: missing"), "{message}");

        let outcome = run_statement(&conn, &Statement::bare("UPDAT t SET x = 1"), Category::Mutation);
        assert!(outcome.error_message().unwrap().contains("syntax error"));
    }

    #[test]
    fn constraint_violation_is_failed() {
        let conn = conn_with_table();
        conn.execute_batch("INSERT INTO t (id, x) VALUES (1, 'a')").unwrap();
        let outcome = run_statement(
            &conn,
            &Statement::bare("INSERT INTO t (id, x) VALUES (1, 'dup')"),
            Category::Insert,
        );
        assert!(outcome.error_message().unwrap().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn nested_begin_is_rejected_by_engine() {
        let conn = conn_with_table();
        assert_eq!(
            run_statement(&conn, &Statement::bare("BEGIN"), Category::BeginTxn),
            StatementOutcome::empty_mutation()
        );
        assert!(!conn.is_autocommit());

        let nested = run_statement(&conn, &Statement::bare("BEGIN"), Category::BeginTxn);
        assert!(nested.is_failed());

        assert!(!run_statement(&conn, &Statement::bare("END"), Category::EndTxn).is_failed());
        assert!(conn.is_autocommit());
    }

    #[test]
    fn end_without_begin_fails() {
        let conn = conn_with_table();
        let outcome = run_statement(&conn, &Statement::bare("END"), Category::EndTxn);
        assert!(outcome.is_failed());
    }
}

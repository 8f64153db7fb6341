//! Runs an ordered list of statements against one handle.
//!
//! One outcome per statement, in order, whatever happens to its siblings.
//! Statements are not wrapped in an implicit transaction: each one sees the
//! writes of the statements before it.

use rusqlite::Connection;
use tracing::debug;

use sqlbridge_core::{BatchResult, Category, Dispatch, Statement, StatementOutcome};

use super::runner::run_statement;
use crate::classify::Classifier;

/// Classifies, enforces read-only policy, and delegates to the runner.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    classifier: Classifier,
}

impl BatchExecutor {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Execute `statements` in order.
    ///
    /// Under `read_only`, any statement whose leading keyword is not SELECT
    /// is rejected with a read-only outcome before it reaches SQLite, for
    /// either dispatch. `Dispatch::Query` only picks the query path for
    /// statements that pass that check.
    pub fn execute(
        &self,
        conn: &Connection,
        statements: &[Statement],
        read_only: bool,
        dispatch: Dispatch,
    ) -> BatchResult {
        let outcomes = statements
            .iter()
            .map(|statement| {
                let category = self.classifier.classify(statement.sql());
                if read_only && !category.is_read() {
                    debug!(%category, sql = statement.sql(), "rejected write in read-only batch");
                    return StatementOutcome::read_only_violation();
                }
                let path = match dispatch {
                    Dispatch::Classified => category,
                    Dispatch::Query => Category::Select,
                };
                run_statement(conn, statement, path)
            })
            .collect();

        BatchResult::new(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbridge_core::{TransactionMode, Value};

    fn setup() -> (Connection, BatchExecutor) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, x TEXT);
             INSERT INTO t (x) VALUES ('a');",
        )
        .unwrap();
        (conn, BatchExecutor::default())
    }

    #[test]
    fn outcomes_align_with_statements() {
        let (conn, executor) = setup();
        let statements = vec![
            Statement::bare("SELECT x FROM t"),
            Statement::bare("INSERT INTO t (x) VALUES ('b')"),
            Statement::bare("DELETE FROM t WHERE x = 'zzz'"),
            Statement::bare("SELECT COUNT(*) AS n FROM t"),
        ];
        let result = executor.execute(&conn, &statements, false, Dispatch::Classified);

        assert_eq!(result.len(), statements.len());
        assert_eq!(result.get(0).unwrap().rows(), [vec![Value::from("a")]]);
        assert_eq!(result.get(1).unwrap().insert_id(), Some(2));
        assert_eq!(result.get(2).unwrap().rows_affected(), 0);
        assert_eq!(result.get(3).unwrap().rows(), [vec![Value::Integer(2)]]);
    }

    #[test]
    fn failure_does_not_stop_later_statements() {
        let (conn, executor) = setup();
        let statements = vec![
            Statement::bare("UPDATE t SET x = 'b'"),
            Statement::bare("THIS IS NOT SQL"),
            Statement::bare("UPDATE t SET x = 'c'"),
        ];
        let result = executor.execute(&conn, &statements, false, Dispatch::Classified);

        assert!(matches!(result.get(0), Some(StatementOutcome::Mutation { .. })));
        assert!(result.get(1).unwrap().is_failed());
        assert!(matches!(result.get(2), Some(StatementOutcome::Mutation { .. })));

        let x: String = conn.query_row("SELECT x FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(x, "c");
    }

    #[test]
    fn read_only_rejects_writes_without_touching_engine() {
        let (conn, executor) = setup();
        let statements = vec![
            Statement::bare("UPDATE t SET x = 'changed'"),
            Statement::bare("SELECT x FROM t"),
            Statement::bare("THIS IS NOT SQL"),
        ];
        let result = executor.execute(&conn, &statements, true, Dispatch::Classified);

        assert!(result.get(0).unwrap().is_read_only_violation());
        assert_eq!(result.get(1).unwrap().rows(), [vec![Value::from("a")]]);
        // Rejected by policy, not by a syntax error.
        assert!(result.get(2).unwrap().is_read_only_violation());

        let x: String = conn.query_row("SELECT x FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(x, "a");
    }

    #[test]
    fn query_dispatch_runs_everything_as_query() {
        let (conn, executor) = setup();
        let statements = vec![Statement::bare("PRAGMA table_info(t)")];

        let classified = executor.execute(&conn, &statements, false, Dispatch::Classified);
        assert!(classified.get(0).unwrap().is_failed());

        let queried = executor.execute(&conn, &statements, false, Dispatch::Query);
        let outcome = queried.get(0).unwrap();
        assert!(outcome.columns().contains(&"name".to_string()));
        assert_eq!(outcome.rows().len(), 2);
    }

    #[test]
    fn query_dispatch_does_not_bypass_read_only() {
        let (conn, executor) = setup();
        let result = executor.execute(
            &conn,
            &[Statement::bare("DELETE FROM t"), Statement::bare("SELECT COUNT(*) FROM t")],
            true,
            Dispatch::Query,
        );

        assert!(result.get(0).unwrap().is_read_only_violation());
        assert_eq!(result.get(1).unwrap().rows(), [vec![Value::Integer(1)]]);
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn legacy_transaction_spans_statements() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x TEXT)").unwrap();
        let executor = BatchExecutor::new(Classifier::new(TransactionMode::LegacyExplicit));

        let result = executor.execute(
            &conn,
            &[
                Statement::bare("BEGIN"),
                Statement::bare("INSERT INTO t VALUES ('a')"),
            ],
            false,
            Dispatch::Classified,
        );
        assert_eq!(result.failed_count(), 0);
        assert!(!conn.is_autocommit());

        let result = executor.execute(&conn, &[Statement::bare("END")], false, Dispatch::Classified);
        assert_eq!(result.failed_count(), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn empty_batch_yields_empty_result() {
        let (conn, executor) = setup();
        assert!(executor.execute(&conn, &[], true, Dispatch::Classified).is_empty());
    }
}

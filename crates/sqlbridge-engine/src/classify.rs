//! Statement classification by leading keyword.
//!
//! Only the first keyword is inspected, case-insensitively and after
//! leading whitespace. The rest of the text is opaque and reaches SQLite
//! verbatim. Rules apply in order: BEGIN, END/COMMIT (legacy transaction
//! mode only), INSERT, SELECT, then everything else is a mutation.

use std::sync::LazyLock;

use regex::Regex;

use sqlbridge_core::{Category, TransactionMode};

static BEGIN_TXN: LazyLock<Regex> = LazyLock::new(|| leading_keyword("BEGIN"));
static END_TXN: LazyLock<Regex> = LazyLock::new(|| leading_keyword("(END|COMMIT)"));
static INSERT: LazyLock<Regex> = LazyLock::new(|| leading_keyword("INSERT"));
static SELECT: LazyLock<Regex> = LazyLock::new(|| leading_keyword("SELECT"));

fn leading_keyword(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)^\s*{keyword}\b")).expect("valid keyword pattern")
}

/// Classifies SQL text into a `Category`.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    mode: TransactionMode,
}

impl Classifier {
    pub fn new(mode: TransactionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TransactionMode {
        self.mode
    }

    pub fn classify(&self, sql: &str) -> Category {
        if self.mode == TransactionMode::LegacyExplicit {
            if BEGIN_TXN.is_match(sql) {
                return Category::BeginTxn;
            }
            if END_TXN.is_match(sql) {
                return Category::EndTxn;
            }
        }
        if INSERT.is_match(sql) {
            Category::Insert
        } else if SELECT.is_match(sql) {
            Category::Select
        } else {
            Category::Mutation
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(TransactionMode::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_keyword_decides() {
        let c = Classifier::default();
        assert_eq!(c.classify("SELECT * FROM t"), Category::Select);
        assert_eq!(c.classify("  \n\tselect 1"), Category::Select);
        assert_eq!(c.classify("Insert into t values (1)"), Category::Insert);
        assert_eq!(c.classify("INSERT OR REPLACE INTO t VALUES (1)"), Category::Insert);
        assert_eq!(c.classify("UPDATE t SET x = 1"), Category::Mutation);
        assert_eq!(c.classify("DELETE FROM t"), Category::Mutation);
        assert_eq!(c.classify("CREATE TABLE t (x)"), Category::Mutation);
    }

    #[test]
    fn keyword_must_end_at_word_boundary() {
        let c = Classifier::default();
        assert_eq!(c.classify("SELECTED"), Category::Mutation);
        assert_eq!(c.classify("INSERTS"), Category::Mutation);
        assert_eq!(c.classify("SELECT(1)"), Category::Select);
    }

    #[test]
    fn keyword_elsewhere_does_not_count() {
        let c = Classifier::default();
        assert_eq!(
            c.classify("WITH x AS (SELECT 1) SELECT * FROM x"),
            Category::Mutation
        );
        assert_eq!(
            c.classify("UPDATE t SET x = (SELECT 1)"),
            Category::Mutation
        );
    }

    #[test]
    fn transaction_keywords_are_plain_mutations_without_legacy_mode() {
        let c = Classifier::new(TransactionMode::None);
        assert_eq!(c.classify("BEGIN"), Category::Mutation);
        assert_eq!(c.classify("END"), Category::Mutation);
        assert_eq!(c.classify("COMMIT"), Category::Mutation);
    }

    #[test]
    fn legacy_mode_recognizes_transaction_boundaries() {
        let c = Classifier::new(TransactionMode::LegacyExplicit);
        assert_eq!(c.classify("BEGIN TRANSACTION"), Category::BeginTxn);
        assert_eq!(c.classify(" begin"), Category::BeginTxn);
        assert_eq!(c.classify("END"), Category::EndTxn);
        assert_eq!(c.classify("commit;"), Category::EndTxn);
        assert_eq!(c.classify("ENDING"), Category::Mutation);
        assert_eq!(c.classify("SELECT 1"), Category::Select);
    }
}

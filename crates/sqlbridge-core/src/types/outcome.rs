//! Per-statement outcomes and batch results.

use super::value::Value;

/// Message carried by a statement rejected under a read-only batch.
pub const READ_ONLY_MESSAGE: &str = "read-only";

/// The result of running one statement. Never an error type: failures are data.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Mutation {
        rows_affected: usize,
        /// Present only for statements classified as inserts.
        insert_id: Option<i64>,
    },
    Failed {
        message: String,
    },
}

impl StatementOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn read_only_violation() -> Self {
        Self::failed(READ_ONLY_MESSAGE)
    }

    /// Outcome for statements that succeed without producing rows or changes.
    pub fn empty_mutation() -> Self {
        Self::Mutation {
            rows_affected: 0,
            insert_id: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_read_only_violation(&self) -> bool {
        matches!(self, Self::Failed { message } if message == READ_ONLY_MESSAGE)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn insert_id(&self) -> Option<i64> {
        match self {
            Self::Mutation { insert_id, .. } => *insert_id,
            _ => None,
        }
    }

    pub fn rows_affected(&self) -> usize {
        match self {
            Self::Mutation { rows_affected, .. } => *rows_affected,
            _ => 0,
        }
    }

    pub fn columns(&self) -> &[String] {
        match self {
            Self::Rows { columns, .. } => columns,
            _ => &[],
        }
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        match self {
            Self::Rows { rows, .. } => rows,
            _ => &[],
        }
    }
}

/// Outcomes of a batch, positionally aligned with its statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    outcomes: Vec<StatementOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<StatementOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StatementOutcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatementOutcome> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[StatementOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<StatementOutcome> {
        self.outcomes
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

impl IntoIterator for BatchResult {
    type Item = StatementOutcome;
    type IntoIter = std::vec::IntoIter<StatementOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a StatementOutcome;
    type IntoIter = std::slice::Iter<'a, StatementOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

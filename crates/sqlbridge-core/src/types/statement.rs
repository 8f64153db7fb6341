//! Statements, categories, and batch requests.

use std::fmt;

use super::value::Value;
use crate::errors::{BridgeError, BridgeResult};

/// One SQL statement and its positional bind parameters.
///
/// The SQL text is opaque: only its leading keyword is ever inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// A statement with no bind parameters.
    pub fn bare(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// What a statement does, derived from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Select,
    Insert,
    /// UPDATE, DELETE, DDL, and anything else not recognized.
    Mutation,
    BeginTxn,
    EndTxn,
}

impl Category {
    /// Only `Select` may run inside a read-only batch.
    pub fn is_read(self) -> bool {
        matches!(self, Self::Select)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Mutation => "mutation",
            Self::BeginTxn => "begin",
            Self::EndTxn => "end",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How statements of a request are routed to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Classify each statement by its leading keyword.
    #[default]
    Classified,
    /// Run every statement as a query, whatever it starts with. A read-only
    /// request still rejects anything not led by SELECT.
    Query,
}

/// A batch of statements against one named database.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    database: String,
    statements: Vec<Statement>,
    read_only: bool,
    dispatch: Dispatch,
}

impl BatchRequest {
    pub fn new(database: impl Into<String>, statements: Vec<Statement>, read_only: bool) -> Self {
        Self {
            database: database.into(),
            statements,
            read_only,
            dispatch: Dispatch::Classified,
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Reject requests that cannot be executed at all.
    pub fn validate(&self) -> BridgeResult<()> {
        if self.database.trim().is_empty() {
            return Err(BridgeError::argument("database name must not be empty"));
        }
        Ok(())
    }
}

//! Actions a host may invoke.

use std::fmt;

use sqlbridge_core::Dispatch;

/// A recognized host action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `[dbName, [[sql, bindArgs], ...], readOnly]`, one result entry per
    /// statement.
    Exec,
    /// `[dbName, sql, bindArgs]`, classified by leading keyword.
    Run,
    /// `[dbName, sql, bindArgs]`, always run as a query.
    All,
}

impl Action {
    /// `None` for any name the plugin does not handle.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "exec" => Some(Self::Exec),
            "run" => Some(Self::Run),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exec => "exec",
            Self::Run => "run",
            Self::All => "all",
        }
    }

    pub fn dispatch(self) -> Dispatch {
        match self {
            Self::All => Dispatch::Query,
            Self::Exec | Self::Run => Dispatch::Classified,
        }
    }

    /// Whether results use the single-statement object shape.
    pub fn is_legacy(self) -> bool {
        !matches!(self, Self::Exec)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

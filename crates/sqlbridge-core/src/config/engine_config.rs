//! Engine configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};

/// How `BEGIN` / `END` statement text is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMode {
    /// No transaction sniffing. BEGIN/END text reaches SQLite as an
    /// ordinary statement.
    #[default]
    None,
    /// BEGIN and END/COMMIT drive the handle's transaction directly.
    LegacyExplicit,
}

/// Configuration for the execution engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Application-private directory holding file-backed databases.
    /// Default: `./databases`.
    pub storage_root: Option<PathBuf>,
    /// Reserved database name for an ephemeral in-memory instance.
    /// Default: `:memory:`.
    pub memory_name: Option<String>,
    pub transaction_mode: TransactionMode,
    /// Bound of the submission queue. Submitters block when it is full.
    /// Default: 1024.
    pub queue_capacity: Option<usize>,
    /// Name of the dedicated worker thread. Default: `sqlbridge-worker`.
    pub worker_name: Option<String>,
    /// `PRAGMA busy_timeout` for every opened handle. Default: 5000.
    pub busy_timeout_ms: Option<u32>,
    /// `PRAGMA foreign_keys` for every opened handle. Default: false.
    pub foreign_keys: Option<bool>,
    /// Fallback tracing filter when `SQLBRIDGE_LOG` is unset.
    pub log_filter: Option<String>,
}

impl EngineConfig {
    pub const DEFAULT_MEMORY_NAME: &'static str = ":memory:";
    pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
    pub const DEFAULT_WORKER_NAME: &'static str = "sqlbridge-worker";
    pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

    /// Parse a TOML document. Unknown keys are rejected.
    pub fn from_toml(source: &str) -> BridgeResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| BridgeError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file from disk.
    pub fn load(path: &Path) -> BridgeResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| BridgeError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.queue_capacity == Some(0) {
            return Err(BridgeError::Config {
                message: "queue_capacity must be at least 1".to_string(),
            });
        }
        if matches!(self.memory_name.as_deref(), Some(name) if name.is_empty()) {
            return Err(BridgeError::Config {
                message: "memory_name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn effective_storage_root(&self) -> PathBuf {
        self.storage_root.clone().unwrap_or_else(|| PathBuf::from("databases"))
    }

    pub fn effective_memory_name(&self) -> &str {
        self.memory_name.as_deref().unwrap_or(Self::DEFAULT_MEMORY_NAME)
    }

    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(Self::DEFAULT_QUEUE_CAPACITY)
    }

    pub fn effective_worker_name(&self) -> &str {
        self.worker_name.as_deref().unwrap_or(Self::DEFAULT_WORKER_NAME)
    }

    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms.unwrap_or(Self::DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn effective_foreign_keys(&self) -> bool {
        self.foreign_keys.unwrap_or(false)
    }

    pub fn legacy_transactions(&self) -> bool {
        self.transaction_mode == TransactionMode::LegacyExplicit
    }
}

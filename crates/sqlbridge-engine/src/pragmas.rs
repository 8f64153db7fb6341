//! Connection setup applied to every newly opened handle.

use std::time::Duration;

use rusqlite::Connection;
use sqlbridge_core::EngineConfig;

/// Per-connection settings taken from `EngineConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub busy_timeout_ms: u32,
    pub foreign_keys: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: EngineConfig::DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: false,
        }
    }
}

impl From<&EngineConfig> for ConnectionSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            busy_timeout_ms: config.effective_busy_timeout_ms(),
            foreign_keys: config.effective_foreign_keys(),
        }
    }
}

/// Apply settings, then read the schema version so an unreadable or
/// corrupt file fails here instead of on its first statement.
pub fn configure_connection(
    conn: &Connection,
    settings: &ConnectionSettings,
) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(u64::from(settings.busy_timeout_ms)))?;
    conn.pragma_update(None, "foreign_keys", settings.foreign_keys)?;
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

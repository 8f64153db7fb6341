//! Database name → storage location.
//!
//! The engine never decides where a database lives. A `StorageResolver`
//! maps each name either to the ephemeral in-memory instance or to a file.

use std::path::{Component, Path, PathBuf};

use sqlbridge_core::{BridgeError, BridgeResult, EngineConfig};

/// Where a named database is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Non-persistent, lives as long as its handle.
    Ephemeral,
    File(PathBuf),
}

/// Resolves database names to storage locations.
pub trait StorageResolver: Send {
    fn locate(&self, name: &str) -> BridgeResult<Location>;
}

/// Resolves names relative to one application-private directory.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
    memory_name: String,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            memory_name: EngineConfig::DEFAULT_MEMORY_NAME.to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            root: config.effective_storage_root(),
            memory_name: config.effective_memory_name().to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageResolver for DirectoryResolver {
    fn locate(&self, name: &str) -> BridgeResult<Location> {
        if name == self.memory_name {
            return Ok(Location::Ephemeral);
        }
        if name.trim().is_empty() {
            return Err(BridgeError::argument("database name must not be empty"));
        }

        // Names come from an untrusted caller: keep them inside the root.
        let relative = Path::new(name);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(BridgeError::argument(format!(
                "database name '{name}' must be a relative path inside the storage root"
            )));
        }

        Ok(Location::File(self.root.join(relative)))
    }
}

//! Database registry: name → lazily-opened handle.
//!
//! The registry exclusively owns every `rusqlite::Connection`. It is not
//! synchronized: it is moved into the execution worker at construction and
//! only that thread ever touches it. Handles are never evicted; they are
//! closed when the registry is dropped at worker shutdown.

use std::collections::hash_map::Entry;

use rusqlite::Connection;
use tracing::{debug, info};

use sqlbridge_core::{BridgeError, BridgeResult, EngineConfig, FxHashMap};

use crate::location::{DirectoryResolver, Location, StorageResolver};
use crate::pragmas::{configure_connection, ConnectionSettings};

/// Owns one handle per database name for the lifetime of the worker.
pub struct DatabaseRegistry {
    resolver: Box<dyn StorageResolver>,
    settings: ConnectionSettings,
    handles: FxHashMap<String, Connection>,
    opened: usize,
}

impl DatabaseRegistry {
    pub fn new(resolver: impl StorageResolver + 'static, settings: ConnectionSettings) -> Self {
        Self {
            resolver: Box::new(resolver),
            settings,
            handles: FxHashMap::default(),
            opened: 0,
        }
    }

    /// Registry backed by a `DirectoryResolver` rooted at the configured
    /// storage root.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(DirectoryResolver::from_config(config), ConnectionSettings::from(config))
    }

    /// Return the handle for `name`, opening (and creating) the database on
    /// first reference.
    pub fn resolve(&mut self, name: &str) -> BridgeResult<&Connection> {
        match self.handles.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let conn = open_handle(self.resolver.as_ref(), &self.settings, name)?;
                self.opened += 1;
                Ok(entry.insert(conn))
            }
        }
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Number of handles currently held.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Total handles opened over the registry's lifetime.
    pub fn opened_count(&self) -> usize {
        self.opened
    }

    /// Drop every handle. Only called at worker teardown.
    pub(crate) fn close_all(&mut self) {
        for (name, conn) in self.handles.drain() {
            if let Err((_, e)) = conn.close() {
                debug!(database = %name, error = %e, "handle did not close cleanly");
            }
        }
    }
}

fn open_handle(
    resolver: &dyn StorageResolver,
    settings: &ConnectionSettings,
    name: &str,
) -> BridgeResult<Connection> {
    let location = resolver.locate(name)?;

    let conn = match &location {
        Location::Ephemeral => Connection::open_in_memory(),
        Location::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BridgeError::engine_open(
                        name,
                        format!("failed to create {}: {e}", parent.display()),
                    )
                })?;
            }
            Connection::open(path)
        }
    }
    .map_err(|e| BridgeError::engine_open(name, e))?;

    configure_connection(&conn, settings).map_err(|e| BridgeError::engine_open(name, e))?;

    match &location {
        Location::Ephemeral => info!(database = %name, "opened ephemeral database"),
        Location::File(path) => {
            info!(database = %name, path = %path.display(), "opened database file")
        }
    }
    Ok(conn)
}

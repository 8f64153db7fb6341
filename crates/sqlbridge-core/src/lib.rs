//! # sqlbridge-core
//!
//! Foundation crate for the sqlbridge execution engine.
//! Defines the transport value model, statements and outcomes, the error
//! taxonomy, configuration, and tracing setup. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{EngineConfig, TransactionMode};
pub use errors::error_code::ErrorCode;
pub use errors::{BridgeError, BridgeResult};
pub use types::collections::FxHashMap;
pub use types::outcome::{BatchResult, StatementOutcome, READ_ONLY_MESSAGE};
pub use types::statement::{BatchRequest, Category, Dispatch, Statement};
pub use types::value::Value;

//! Engine configuration.

pub mod engine_config;

pub use engine_config::{EngineConfig, TransactionMode};

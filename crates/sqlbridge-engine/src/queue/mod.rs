//! The single-writer serialization boundary.

pub mod commands;
pub mod worker;

pub use commands::{Completion, QueueCommand};
pub use worker::{ExecutionQueue, PendingBatch, QueueStats};

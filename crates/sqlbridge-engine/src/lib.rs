//! # sqlbridge-engine
//!
//! Serialized SQLite execution engine.
//! One dedicated worker owns every database handle; callers on any thread
//! submit batches through the execution queue and receive one outcome per
//! statement. Statement failures are isolated; only a failure to open the
//! database (or a malformed request) aborts a whole batch.

pub mod batch;
pub mod classify;
pub mod coerce;
pub mod location;
pub mod pragmas;
pub mod queue;
pub mod registry;

pub use batch::BatchExecutor;
pub use classify::Classifier;
pub use location::{DirectoryResolver, Location, StorageResolver};
pub use queue::{ExecutionQueue, PendingBatch, QueueStats};
pub use registry::DatabaseRegistry;

//! Commands accepted by the execution worker.

use sqlbridge_core::{BatchRequest, BatchResult, BridgeResult};

/// Completion callback for one batch. Invoked on the worker thread, so it
/// must hand the result off rather than block or wait on the queue.
pub type Completion = Box<dyn FnOnce(BridgeResult<BatchResult>) + Send + 'static>;

/// A command sent to the execution worker.
pub enum QueueCommand {
    /// Run one batch and deliver its result.
    Execute {
        request: BatchRequest,
        completion: Completion,
    },
    /// Stop after every command queued before this one has run.
    Shutdown,
}

impl std::fmt::Debug for QueueCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Execute { request, .. } => f
                .debug_struct("Execute")
                .field("request", request)
                .finish_non_exhaustive(),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

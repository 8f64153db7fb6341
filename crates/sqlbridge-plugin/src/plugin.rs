//! The plugin object a host bridge calls into.

use serde_json::Value as JsonValue;
use tracing::debug;

use sqlbridge_core::tracing::init_tracing;
use sqlbridge_core::{BatchResult, BridgeResult, EngineConfig, ErrorCode, StatementOutcome};
use sqlbridge_engine::{ExecutionQueue, QueueStats};

use crate::action::Action;
use crate::conversions::{decode_request, encode_batch, encode_legacy};
use crate::sink::CompletionSink;

/// Routes host actions onto one execution queue.
pub struct SqlitePlugin {
    queue: ExecutionQueue,
}

impl SqlitePlugin {
    /// Install tracing and start the execution worker.
    pub fn new(config: &EngineConfig) -> BridgeResult<Self> {
        init_tracing(config.log_filter.as_deref());
        Ok(Self::with_queue(ExecutionQueue::new(config)?))
    }

    pub fn with_queue(queue: ExecutionQueue) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &ExecutionQueue {
        &self.queue
    }

    /// Handle one host call. Returns `false` for an action this plugin does
    /// not know, in which case `sink` is never invoked. Otherwise `sink`
    /// receives exactly one completion.
    pub fn execute<S: CompletionSink>(&self, action: &str, args: &JsonValue, sink: S) -> bool {
        let Some(action) = Action::parse(action) else {
            debug!(action, "unhandled action");
            return false;
        };
        let sink: Box<dyn CompletionSink> = Box::new(sink);

        match decode_request(action, args) {
            Ok(request) => {
                self.queue
                    .submit(request, move |result| deliver(action, result, sink));
            }
            Err(e) => {
                debug!(%action, error = %e, "rejected host arguments");
                sink.error(e.host_message());
            }
        }
        true
    }

    /// Drain queued requests and stop the worker.
    pub fn shutdown(self) -> BridgeResult<QueueStats> {
        self.queue.shutdown()
    }
}

fn deliver(action: Action, result: BridgeResult<BatchResult>, sink: Box<dyn CompletionSink>) {
    let batch = match result {
        Ok(batch) => batch,
        Err(e) => return sink.error(e.host_message()),
    };

    if !action.is_legacy() {
        return sink.success(encode_batch(&batch));
    }

    let outcome = batch
        .into_outcomes()
        .into_iter()
        .next()
        .unwrap_or_else(StatementOutcome::empty_mutation);
    match encode_legacy(&outcome) {
        Ok(payload) => sink.success(payload),
        Err(message) => sink.error(message),
    }
}

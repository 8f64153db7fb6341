//! Dedicated execution worker fed by a crossbeam-channel FIFO.
//!
//! Exactly one thread runs batches, one at a time, in submission order.
//! That thread is the only one that ever touches the registry or a
//! database handle, so no lock guards them.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, SendError, Sender};
use tracing::{debug, warn};

use sqlbridge_core::{BatchRequest, BatchResult, BridgeError, BridgeResult, EngineConfig};

use super::commands::QueueCommand;
use crate::batch::BatchExecutor;
use crate::classify::Classifier;
use crate::registry::DatabaseRegistry;

/// Counters kept by the worker, returned from `shutdown()`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueueStats {
    pub batches_run: usize,
    /// Batches that never started (open failure or malformed request).
    pub batches_aborted: usize,
    pub statements_run: usize,
    pub statements_failed: usize,
    pub read_only_rejections: usize,
    pub handles_opened: usize,
}

/// Accepts batch requests from any thread and runs them on one worker.
pub struct ExecutionQueue {
    tx: Sender<QueueCommand>,
    handle: Option<JoinHandle<QueueStats>>,
}

impl ExecutionQueue {
    /// Build a queue over a registry rooted at the configured storage root.
    pub fn new(config: &EngineConfig) -> BridgeResult<Self> {
        config.validate()?;
        Ok(Self::with_registry(DatabaseRegistry::from_config(config), config))
    }

    /// Build a queue over an explicit registry. The registry moves to the
    /// worker thread and is dropped there.
    pub fn with_registry(registry: DatabaseRegistry, config: &EngineConfig) -> Self {
        let (tx, rx) = bounded(config.effective_queue_capacity());
        let executor = BatchExecutor::new(Classifier::new(config.transaction_mode));

        let handle = thread::Builder::new()
            .name(config.effective_worker_name().to_string())
            .spawn(move || worker_loop(registry, executor, rx))
            .expect("failed to spawn execution worker thread");

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Enqueue a batch; `completion` receives its result on the worker
    /// thread. Blocks only while the queue is full.
    ///
    /// `completion` is always invoked exactly once: with `QueueClosed`, on
    /// the calling thread, if the worker has already stopped.
    pub fn submit<F>(&self, request: BatchRequest, completion: F)
    where
        F: FnOnce(BridgeResult<BatchResult>) + Send + 'static,
    {
        let command = QueueCommand::Execute {
            request,
            completion: Box::new(completion),
        };
        if let Err(SendError(QueueCommand::Execute { completion, .. })) = self.tx.send(command) {
            warn!("submission after execution worker stopped");
            completion(Err(BridgeError::QueueClosed));
        }
    }

    /// Enqueue a batch and return a handle to wait on its result.
    pub fn execute(&self, request: BatchRequest) -> PendingBatch {
        let (done_tx, done_rx) = bounded(1);
        self.submit(request, move |result| {
            let _ = done_tx.send(result);
        });
        PendingBatch { rx: done_rx }
    }

    /// Enqueue a batch and block until it has run.
    pub fn execute_sync(&self, request: BatchRequest) -> BridgeResult<BatchResult> {
        self.execute(request).wait()
    }

    /// Number of commands waiting behind the one currently running.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    /// Run everything already queued, stop the worker, close all handles.
    pub fn shutdown(mut self) -> BridgeResult<QueueStats> {
        let _ = self.tx.send(QueueCommand::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| BridgeError::QueueClosed),
            None => Ok(QueueStats::default()),
        }
    }
}

impl Drop for ExecutionQueue {
    fn drop(&mut self) {
        // A full queue still drains: the worker also stops once every
        // sender is gone.
        let _ = self.tx.try_send(QueueCommand::Shutdown);
    }
}

/// Result of a batch that has been submitted but may not have run yet.
#[derive(Debug)]
pub struct PendingBatch {
    rx: Receiver<BridgeResult<BatchResult>>,
}

impl PendingBatch {
    /// Block until the batch has run. `QueueClosed` if the worker stopped
    /// before reaching it.
    pub fn wait(self) -> BridgeResult<BatchResult> {
        self.rx.recv().map_err(|_| BridgeError::QueueClosed)?
    }

    /// The result, if the batch has already run.
    pub fn try_wait(&self) -> Option<BridgeResult<BatchResult>> {
        self.rx.try_recv().ok()
    }
}

fn worker_loop(
    mut registry: DatabaseRegistry,
    executor: BatchExecutor,
    rx: Receiver<QueueCommand>,
) -> QueueStats {
    let mut stats = QueueStats::default();

    while let Ok(command) = rx.recv() {
        match command {
            QueueCommand::Execute {
                request,
                completion,
            } => {
                let result = run_request(&mut registry, &executor, &request, &mut stats);
                completion(result);
            }
            QueueCommand::Shutdown => break,
        }
    }

    stats.handles_opened = registry.opened_count();
    debug!(?stats, "execution worker stopping");
    registry.close_all();
    stats
}

fn run_request(
    registry: &mut DatabaseRegistry,
    executor: &BatchExecutor,
    request: &BatchRequest,
    stats: &mut QueueStats,
) -> BridgeResult<BatchResult> {
    let conn = match request.validate().and_then(|()| registry.resolve(request.database())) {
        Ok(conn) => conn,
        Err(e) => {
            warn!(database = request.database(), error = %e, "batch aborted before start");
            stats.batches_aborted += 1;
            return Err(e);
        }
    };

    debug!(
        database = request.database(),
        statements = request.statements().len(),
        read_only = request.read_only(),
        "running batch"
    );
    let result = executor.execute(
        conn,
        request.statements(),
        request.read_only(),
        request.dispatch(),
    );

    stats.batches_run += 1;
    stats.statements_run += result.len();
    stats.statements_failed += result.failed_count();
    stats.read_only_rejections += result
        .iter()
        .filter(|o| o.is_read_only_violation())
        .count();

    Ok(result)
}

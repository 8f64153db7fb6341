//! Completion sinks: where a finished request's payload goes.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde_json::Value as JsonValue;
use tracing::warn;

/// Receives exactly one completion per handled request, on the worker
/// thread (or the caller's, for requests rejected before queueing).
pub trait CompletionSink: Send + 'static {
    fn success(self: Box<Self>, payload: JsonValue);
    fn error(self: Box<Self>, message: String);
}

impl<F> CompletionSink for F
where
    F: FnOnce(Result<JsonValue, String>) + Send + 'static,
{
    fn success(self: Box<Self>, payload: JsonValue) {
        (*self)(Ok(payload))
    }

    fn error(self: Box<Self>, message: String) {
        (*self)(Err(message))
    }
}

/// What a `ChannelSink` forwards.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Success(JsonValue),
    Error(String),
}

impl SinkEvent {
    pub fn into_result(self) -> Result<JsonValue, String> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Error(message) => Err(message),
        }
    }
}

/// Forwards the completion over a channel, for hosts that poll.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<SinkEvent>,
}

/// A sink and the receiver its completion arrives on.
pub fn channel_sink() -> (ChannelSink, Receiver<SinkEvent>) {
    let (tx, rx) = bounded(1);
    (ChannelSink { tx }, rx)
}

impl ChannelSink {
    fn deliver(&self, event: SinkEvent) {
        if self.tx.send(event).is_err() {
            warn!("completion receiver dropped before delivery");
        }
    }
}

impl CompletionSink for ChannelSink {
    fn success(self: Box<Self>, payload: JsonValue) {
        self.deliver(SinkEvent::Success(payload));
    }

    fn error(self: Box<Self>, message: String) {
        self.deliver(SinkEvent::Error(message));
    }
}

//! # sqlbridge-plugin
//!
//! Host-facing surface of the sqlbridge engine. A host bridge hands over an
//! action name, a JSON argument array and a completion sink; this crate
//! decodes the arguments into a batch request, submits it to the execution
//! queue, and encodes the result back into the transport shape the action
//! expects.

pub mod action;
pub mod conversions;
pub mod plugin;
pub mod sink;

pub use action::Action;
pub use plugin::SqlitePlugin;
pub use sink::{channel_sink, ChannelSink, CompletionSink, SinkEvent};

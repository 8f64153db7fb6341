//! Stable error codes surfaced across the host boundary.

pub const ENGINE_OPEN_ERROR: &str = "ENGINE_OPEN_ERROR";
pub const ARGUMENT_ERROR: &str = "ARGUMENT_ERROR";
pub const QUEUE_CLOSED: &str = "QUEUE_CLOSED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable, machine-matchable code.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// `[CODE] message`, the form handed to a host completion sink.
    fn host_message(&self) -> String {
        format!("[{}] {self}", self.error_code())
    }
}

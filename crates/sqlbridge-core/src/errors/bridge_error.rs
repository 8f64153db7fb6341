//! Top-level failures: anything that prevents a batch from starting.

use super::error_code::{self, ErrorCode};

/// Errors that abort a whole request before any statement runs.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("cannot open database '{name}': {message}")]
    EngineOpen { name: String, message: String },

    #[error("invalid arguments: {message}")]
    Argument { message: String },

    #[error("execution queue is closed")]
    QueueClosed,

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl BridgeError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    pub fn engine_open(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::EngineOpen {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

impl ErrorCode for BridgeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EngineOpen { .. } => error_code::ENGINE_OPEN_ERROR,
            Self::Argument { .. } => error_code::ARGUMENT_ERROR,
            Self::QueueClosed => error_code::QUEUE_CLOSED,
            Self::Config { .. } => error_code::CONFIG_ERROR,
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

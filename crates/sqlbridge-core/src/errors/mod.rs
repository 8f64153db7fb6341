//! Error taxonomy for sqlbridge.
//!
//! Only top-level failures are errors. Statement-level failures (engine
//! errors, read-only rejections) are data inside `StatementOutcome::Failed`
//! and never travel through this module.

pub mod bridge_error;
pub mod error_code;

pub use bridge_error::{BridgeError, BridgeResult};

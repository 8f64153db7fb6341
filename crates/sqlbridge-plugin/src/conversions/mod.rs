//! JSON ↔ engine type conversions at the host boundary.

pub mod args;
pub mod results;
pub mod values;

pub use args::decode_request;
pub use results::{encode_batch, encode_entry, encode_legacy};
pub use values::{value_from_json, value_to_json};

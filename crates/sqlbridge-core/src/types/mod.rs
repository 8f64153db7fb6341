//! Shared data model: transport values, statements, requests, and outcomes.

pub mod collections;
pub mod outcome;
pub mod statement;
pub mod value;

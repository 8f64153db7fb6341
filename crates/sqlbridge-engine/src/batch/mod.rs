//! Statement runner and batch executor.

pub mod executor;
pub mod runner;

pub use executor::BatchExecutor;
pub use runner::run_statement;

//! Library half of the ingestion binary: CLI parsing and the lifecycle
//! coordinator, split out of `main.rs` so integration tests can drive
//! `lifecycle::run` directly.

pub mod cli;
pub mod lifecycle;

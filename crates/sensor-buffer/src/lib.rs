//! Shared-buffer multi-reader handoff engine for the sensor ingestion
//! pipeline.
//!
//! This crate is the core: a single-producer / fixed-multi-consumer FIFO
//! where every record is observed by each consumer exactly once and then
//! reclaimed. It knows nothing about TCP, sensor maps, or databases — those
//! live in `sensor-net`, `sensor-data`, and `sensor-store` respectively,
//! wired together by the `sensor-ingest` binary.

mod buffer;
mod driver;
mod invariants;
mod record;

pub use buffer::{Buffer, Counters, CONSUMER_COUNT, DATA_CONSUMER, STORAGE_CONSUMER};
pub use driver::run_consumer;
pub use record::Record;

//! TCP connection manager: the external collaborator that accepts sensor
//! connections, decodes the fixed wire-format records, and feeds them into
//! the shared buffer ([`sensor_buffer::Buffer::insert`]).
//!
//! This crate owns no retry/backoff policy toward the buffer — `insert`
//! never fails under contention. The backoff here is purely about waiting
//! out a partially-read record before giving up on one connection.

mod backoff;
mod config;
mod error;
mod server;
mod wire;

pub use config::ConnectionManagerConfig;
pub use error::ConnectionError;
pub use server::ConnectionManager;
pub use wire::{decode, encode, RECORD_LEN};

//! Errors local to the storage manager. A failed `insert_row` is logged and
//! skipped by the caller rather than propagated into the core — crashing
//! the storage consumer mid-stream would stall the whole pipeline via
//! unbounded buffer growth with no recourse.

use thiserror::Error;

/// Failure opening, writing to, or closing the on-disk store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening, writing, or flushing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a row with `bincode` failed (should not happen for the
    /// fixed, owned `StoredRow` shape, but the fallible API is kept honest).
    #[error("encoding a row failed: {0}")]
    Encode(#[from] bincode::Error),
}

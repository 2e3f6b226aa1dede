//! The storage manager: consumer 1's collaborator. Appends each record to
//! an on-disk store, matching the core's `open_connection` /
//! `insert_row` / `close_connection` contract.

use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::frame::{write_row, StoredRow};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

/// An open handle to the append-only store, held for the lifetime of one
/// consumer thread.
pub struct StorageHandle {
    writer: BufWriter<File>,
}

/// Opens (creating if necessary) the store file at `config.path` for
/// appending. Called once at consumer-thread startup.
pub fn open_connection(config: &StorageConfig) -> Result<StorageHandle, StoreError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)?;
    Ok(StorageHandle {
        writer: BufWriter::new(file),
    })
}

/// Appends one record. A failed single insert is the caller's problem to
/// log and skip — it must not abort the consumer loop.
pub fn insert_row(
    handle: &mut StorageHandle,
    id: u16,
    value: f64,
    timestamp: i64,
) -> Result<(), StoreError> {
    write_row(&mut handle.writer, StoredRow { id, value, timestamp })
}

/// Flushes and closes the store. Called once at consumer-thread teardown.
pub fn close_connection(mut handle: StorageHandle) -> Result<(), StoreError> {
    handle.writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::read_row;
    use std::io::BufReader;

    #[test]
    fn appends_rows_and_they_are_readable_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig {
            path: dir.path().join("readings.store"),
        };

        let mut handle = open_connection(&config).expect("open");
        insert_row(&mut handle, 1, 20.5, 1_700_000_000).expect("insert 1");
        insert_row(&mut handle, 2, 21.0, 1_700_000_001).expect("insert 2");
        close_connection(handle).expect("close");

        let file = File::open(&config.path).expect("reopen store");
        let mut reader = BufReader::new(file);
        let first = read_row(&mut reader).expect("read").expect("row 1");
        let second = read_row(&mut reader).expect("read").expect("row 2");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(read_row(&mut reader).expect("read eof"), None);
    }

    #[test]
    fn reopening_appends_rather_than_truncating() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig {
            path: dir.path().join("readings.store"),
        };

        let mut first_session = open_connection(&config).expect("open");
        insert_row(&mut first_session, 1, 1.0, 0).expect("insert");
        close_connection(first_session).expect("close");

        let mut second_session = open_connection(&config).expect("reopen");
        insert_row(&mut second_session, 2, 2.0, 1).expect("insert");
        close_connection(second_session).expect("close");

        let file = File::open(&config.path).expect("reopen store");
        let mut reader = BufReader::new(file);
        let ids: Vec<u16> = std::iter::from_fn(|| read_row(&mut reader).expect("read").map(|r| r.id))
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}

//! On-disk row encoding: `bincode`-serialized payload prefixed with its
//! length and a `crc32fast` checksum, so a truncated or corrupted tail
//! (e.g. from a crash mid-write) is detectable on replay.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// One persisted reading. Decoupled from `sensor_buffer::Record` so this
/// crate's on-disk shape can evolve independently of the core's in-memory
/// record type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredRow {
    pub id: u16,
    pub value: f64,
    pub timestamp: i64,
}

/// Encodes `row` as `[len: u32 LE][crc32: u32 LE][bincode payload]`.
pub fn encode_frame(row: StoredRow) -> Result<Vec<u8>, StoreError> {
    let payload = bincode::serialize(&row)?;
    let checksum = crc32fast::hash(&payload);

    let mut frame = Vec::with_capacity(8 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&checksum.to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Writes one encoded row to `writer`.
pub fn write_row(writer: &mut impl Write, row: StoredRow) -> Result<(), StoreError> {
    let frame = encode_frame(row)?;
    writer.write_all(&frame)?;
    Ok(())
}

/// Reads the next row from `reader`, or `None` at a clean end-of-file.
/// Returns an error if the checksum doesn't match the payload, which would
/// indicate a corrupted or torn write.
pub fn read_row(reader: &mut impl Read) -> Result<Option<StoredRow>, StoreError> {
    let mut header = [0u8; 8];
    match reader.read_exact(&mut header) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err.into()),
    }

    let len = u32::from_le_bytes(header[0..4].try_into().expect("4 bytes")) as usize;
    let expected_crc = u32::from_le_bytes(header[4..8].try_into().expect("4 bytes"));

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;

    let actual_crc = crc32fast::hash(&payload);
    if actual_crc != expected_crc {
        return Err(StoreError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("checksum mismatch: expected {expected_crc:#x}, got {actual_crc:#x}"),
        )));
    }

    let row = bincode::deserialize(&payload)?;
    Ok(Some(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_row() {
        let row = StoredRow {
            id: 7,
            value: 21.5,
            timestamp: 1_700_000_000,
        };
        let frame = encode_frame(row).expect("encode");

        let mut cursor = Cursor::new(frame);
        let read_back = read_row(&mut cursor).expect("read").expect("row present");
        assert_eq!(read_back, row);
        assert_eq!(read_row(&mut cursor).expect("read eof"), None);
    }

    #[test]
    fn detects_a_corrupted_payload() {
        let row = StoredRow {
            id: 1,
            value: 1.0,
            timestamp: 0,
        };
        let mut frame = encode_frame(row).expect("encode");
        let last = frame.len() - 1;
        frame[last] ^= 0xFF;

        let mut cursor = Cursor::new(frame);
        let err = read_row(&mut cursor).expect_err("checksum mismatch detected");
        assert!(matches!(err, StoreError::Io(_)));
    }
}

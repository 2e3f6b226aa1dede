//! On-the-wire record format: `{ id: u16, value: f64, ts: i64 }`, all
//! little-endian, 18 bytes, no framing or length prefix. Records are sent
//! back-to-back on the stream.

use sensor_buffer::Record;

/// Byte length of one wire-format record.
pub const RECORD_LEN: usize = 18;

/// Decodes one `RECORD_LEN`-byte frame into a [`Record`].
#[must_use]
pub fn decode(bytes: &[u8; RECORD_LEN]) -> Record {
    let id = u16::from_le_bytes([bytes[0], bytes[1]]);
    let value = f64::from_le_bytes(bytes[2..10].try_into().expect("8-byte slice"));
    let timestamp = i64::from_le_bytes(bytes[10..18].try_into().expect("8-byte slice"));
    Record::new(id, value, timestamp)
}

/// Encodes a [`Record`] into its wire representation. Used by tests and by
/// anything emulating a sensor node end-to-end.
#[must_use]
pub fn encode(record: Record) -> [u8; RECORD_LEN] {
    let mut buf = [0u8; RECORD_LEN];
    buf[0..2].copy_from_slice(&record.id.to_le_bytes());
    buf[2..10].copy_from_slice(&record.value.to_le_bytes());
    buf[10..18].copy_from_slice(&record.timestamp.to_le_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_wire_format() {
        let record = Record::new(42, -12.75, 1_700_000_123);
        let encoded = encode(record);
        assert_eq!(encoded.len(), RECORD_LEN);
        assert_eq!(decode(&encoded), record);
    }

    #[test]
    fn field_offsets_are_little_endian() {
        let record = Record::new(1, 0.0, 0);
        let encoded = encode(record);
        assert_eq!(&encoded[0..2], &1u16.to_le_bytes());
    }
}

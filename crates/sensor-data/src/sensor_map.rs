//! Loader for the on-disk sensor-id → room-id map.

use crate::error::DataError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Sensor-id → room-id lookup table, loaded once at startup.
#[derive(Debug, Default)]
pub struct SensorMap {
    rooms: HashMap<u16, u32>,
}

impl SensorMap {
    /// Parses a two-column `<sensor id> <room id>` text file, one entry per
    /// line. Blank lines and lines starting with `#` are ignored.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut rooms = HashMap::new();
        for (number, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let parsed = fields
                .next()
                .and_then(|s| s.parse::<u16>().ok())
                .zip(fields.next().and_then(|s| s.parse::<u32>().ok()));

            match (parsed, fields.next()) {
                (Some((sensor_id, room_id)), None) => {
                    rooms.insert(sensor_id, room_id);
                }
                _ => {
                    return Err(DataError::MalformedLine {
                        path: path.display().to_string(),
                        line: number + 1,
                        text: raw_line.to_string(),
                    });
                }
            }
        }

        Ok(Self { rooms })
    }

    /// Looks up the room a sensor reports into, if the sensor is known.
    #[must_use]
    pub fn room_for(&self, sensor_id: u16) -> Option<u32> {
        self.rooms.get(&sensor_id).copied()
    }

    /// Number of sensors in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

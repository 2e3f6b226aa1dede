//! The data manager: consumer 0's collaborator. Looks up each record's
//! room, tracks a trailing per-room average, and logs rooms drifting out
//! of the configured comfort range. Unknown sensor ids are logged and
//! otherwise ignored — the core never observes the outcome.

use crate::config::DataManagerConfig;
use crate::error::DataError;
use crate::room_state::{DriftStatus, RoomState};
use crate::sensor_map::SensorMap;
use sensor_buffer::Record;
use std::collections::HashMap;

/// Owns the sensor map and per-room running state for the lifetime of one
/// consumer thread.
pub struct DataManager {
    config: DataManagerConfig,
    map: SensorMap,
    rooms: HashMap<u32, RoomState>,
}

impl DataManager {
    /// Loads the sensor map from `config.sensor_map_path`. Called once at
    /// consumer-thread startup.
    pub fn init(config: DataManagerConfig) -> Result<Self, DataError> {
        let map = SensorMap::load(&config.sensor_map_path)?;
        Ok(Self {
            config,
            map,
            rooms: HashMap::new(),
        })
    }

    /// Processes one record: updates the owning room's trailing average
    /// and logs a drift warning if it has moved outside the comfort range.
    /// Records from unmapped sensor ids are logged as a validation error
    /// and otherwise dropped.
    pub fn process_reading(&mut self, record: Record) {
        let Some(room_id) = self.map.room_for(record.id) else {
            eprintln!(
                "sensor-data: unknown sensor id {} (ts={}); dropping reading",
                record.id, record.timestamp
            );
            return;
        };

        let window = self.config.trailing_window;
        let state = self
            .rooms
            .entry(room_id)
            .or_insert_with(|| RoomState::new(window));
        match state.push(record.value, self.config.comfort_range) {
            DriftStatus::Ok => {}
            DriftStatus::TooCold => {
                eprintln!(
                    "sensor-data: room {room_id} drifting too cold (trailing avg {:.2})",
                    state.average()
                );
            }
            DriftStatus::TooHot => {
                eprintln!(
                    "sensor-data: room {room_id} drifting too hot (trailing avg {:.2})",
                    state.average()
                );
            }
        }
    }

    /// Releases the in-memory map and per-room state. The data manager
    /// owns no persistent store, so there is nothing further to flush.
    pub fn free(self) {
        drop(self);
    }
}

//! Configuration for the storage manager.

use std::path::PathBuf;

/// Tunables for [`crate::open_connection`].
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the append-only store file. Created if it does not exist.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sensor_readings.store"),
        }
    }
}

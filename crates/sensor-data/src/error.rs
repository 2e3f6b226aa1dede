//! Errors local to the data manager. None of these reach the core buffer —
//! a failed `init` is the binary crate's problem to surface before any
//! consumer thread starts.

use thiserror::Error;

/// Failure loading or parsing the sensor-to-room map file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The map file could not be opened or read.
    #[error("reading sensor map {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A line in the map file was not `<sensor id> <room id>`.
    #[error("sensor map {path}:{line}: malformed entry {text:?}")]
    MalformedLine {
        path: String,
        line: usize,
        text: String,
    },
}

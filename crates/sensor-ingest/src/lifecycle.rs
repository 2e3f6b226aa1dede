//! The lifecycle coordinator: creates the buffer, spawns the two consumer
//! threads, runs the connection manager synchronously, closes the buffer,
//! and joins the consumers. This is the only place that wires the four
//! crates together.

use sensor_buffer::{run_consumer, Buffer, Counters, DATA_CONSUMER, STORAGE_CONSUMER};
use sensor_data::{DataManager, DataManagerConfig};
use sensor_net::{ConnectionManager, ConnectionManagerConfig};
use sensor_store::{close_connection, insert_row, open_connection, StorageConfig};

/// Everything the coordinator needs beyond the listening port. Supplied by
/// `main` with defaults; the CLI surface itself stays fixed to the port.
#[derive(Default)]
pub struct PipelineConfig {
    pub data: DataManagerConfig,
    pub storage: StorageConfig,
    pub connection: ConnectionManagerConfig,
}

/// Runs one full ingestion epoch on `port` and returns the final counters.
///
/// Blocks for as long as the connection manager's listening epoch lasts
/// (see [`ConnectionManagerConfig::max_connections`]); returns once both
/// consumer threads have drained and exited.
pub fn run(port: u16, config: PipelineConfig) -> Counters {
    let buffer = Buffer::new();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            run_consumer(
                &buffer,
                DATA_CONSUMER,
                || {
                    DataManager::init(config.data.clone()).unwrap_or_else(|err| {
                        eprintln!("sensor-ingest: data manager init failed: {err}");
                        std::process::exit(1);
                    })
                },
                |manager, record| manager.process_reading(record),
                DataManager::free,
            );
            eprintln!("sensor-ingest: data consumer stopped");
        });

        scope.spawn(|| {
            run_consumer(
                &buffer,
                STORAGE_CONSUMER,
                || {
                    open_connection(&config.storage).unwrap_or_else(|err| {
                        eprintln!("sensor-ingest: storage manager init failed: {err}");
                        std::process::exit(1);
                    })
                },
                |handle, record| {
                    if let Err(err) = insert_row(handle, record.id, record.value, record.timestamp)
                    {
                        eprintln!("sensor-ingest: storage insert failed, skipping row: {err}");
                    }
                },
                |handle| {
                    if let Err(err) = close_connection(handle) {
                        eprintln!("sensor-ingest: storage close failed: {err}");
                    }
                },
            );
            eprintln!("sensor-ingest: storage consumer stopped");
        });

        let addr = ("0.0.0.0", port);
        if let Err(err) = ConnectionManager::run(addr, &config.connection, &buffer) {
            eprintln!("sensor-ingest: connection manager failed to bind: {err}");
        }

        eprintln!("sensor-ingest: listening epoch ended; closing buffer");
        buffer.close();
    });

    buffer.counters()
}

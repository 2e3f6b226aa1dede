//! Sensor-reading ingestion server: accepts TCP connections from sensor
//! nodes, decodes fixed-format measurement records, and fans them out to a
//! data-processing consumer and a storage consumer via the shared-buffer
//! handoff engine in `sensor-buffer`.

use sensor_ingest::{cli, lifecycle::PipelineConfig};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let port = match cli::parse_port(&args) {
        Ok(port) => port,
        Err(cli::UsageError) => {
            eprintln!("{}", cli::USAGE);
            std::process::exit(255);
        }
    };

    eprintln!("sensor-ingest: listening on port {port}");
    let counters = sensor_ingest::lifecycle::run(port, PipelineConfig::default());
    eprintln!(
        "sensor-ingest: shutdown complete (added={}, calculated={}, stored={})",
        counters.added, counters.calculated, counters.stored
    );
}

//! Thread-per-connection TCP listener: accepts sensor connections, decodes
//! the fixed 18-byte wire records, and inserts each one into the shared
//! buffer.

use crate::backoff::Backoff;
use crate::config::ConnectionManagerConfig;
use crate::error::ConnectionError;
use crate::wire::{decode, RECORD_LEN};
use sensor_buffer::Buffer;
use std::io::{self, ErrorKind, Read};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// How long a connection's read can stall before the adaptive backoff gives
/// up waiting for the rest of a partially-received record.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Accepts connections and feeds decoded records into `buffer` until the
/// listening epoch ends.
pub struct ConnectionManager;

impl ConnectionManager {
    /// Binds `addr` and runs the accept loop, spawning one reader thread
    /// per connection. Returns once the epoch ends: either
    /// `config.max_connections` connections have been accepted and every
    /// reader thread has been joined, or the process is killed (unbounded
    /// mode never returns on its own, matching a long-running server).
    ///
    /// # Errors
    ///
    /// Returns an error only if the listener fails to bind. Per-connection
    /// failures are logged and isolated; they never propagate here.
    pub fn run(
        addr: impl ToSocketAddrs,
        config: &ConnectionManagerConfig,
        buffer: &Buffer,
    ) -> io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        if config.max_connections == Some(0) {
            return Ok(());
        }
        let mut accepted = 0usize;

        std::thread::scope(|scope| {
            for incoming in listener.incoming() {
                let stream = match incoming {
                    Ok(stream) => stream,
                    Err(err) => {
                        eprintln!("sensor-net: accept failed: {err}");
                        continue;
                    }
                };

                accepted += 1;
                let peer = stream.peer_addr().ok();
                eprintln!("sensor-net: connection accepted from {peer:?}");
                scope.spawn(move || handle_connection(stream, buffer));

                if config.max_connections.is_some_and(|max| accepted >= max) {
                    break;
                }
            }
        });

        Ok(())
    }
}

/// Reads records from one connection until the peer closes the stream or a
/// malformed/stalled record forces the connection to be dropped. Either way
/// this only ends the one connection; other connections and the buffer are
/// unaffected.
fn handle_connection(stream: TcpStream, buffer: &Buffer) {
    let peer = stream.peer_addr().ok();
    if let Err(err) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        eprintln!("sensor-net: connection {peer:?} could not set read timeout: {err}; dropping");
        return;
    }

    let mut stream = stream;
    loop {
        match read_record(&mut stream) {
            Ok(Some(record)) => buffer.insert(record),
            Ok(None) => break,
            Err(err) => {
                eprintln!("sensor-net: connection {peer:?} dropped: {err}");
                break;
            }
        }
    }
    eprintln!("sensor-net: connection {peer:?} closed");
}

/// Reads one wire-format record, retrying short reads with an adaptive
/// backoff before giving up on the connection. Returns `Ok(None)` only for
/// a clean close at a record boundary (zero bytes read so far).
fn read_record(stream: &mut TcpStream) -> Result<Option<sensor_buffer::Record>, ConnectionError> {
    let mut buf = [0u8; RECORD_LEN];
    let mut filled = 0usize;
    let mut backoff = Backoff::new();

    while filled < RECORD_LEN {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ConnectionError::PartialRecord {
                    got: filled,
                    expected: RECORD_LEN,
                });
            }
            Ok(n) => {
                filled += n;
                backoff.reset();
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock || err.kind() == ErrorKind::TimedOut => {
                if backoff.is_exhausted() {
                    return Err(ConnectionError::PartialRecord {
                        got: filled,
                        expected: RECORD_LEN,
                    });
                }
                backoff.snooze();
            }
            Err(err) => return Err(ConnectionError::Io(err)),
        }
    }

    Ok(Some(decode(&buf)))
}

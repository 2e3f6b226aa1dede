//! Argv parsing for the single positional port argument.
//!
//! `std::env::args()` directly, no argument-parsing crate — the CLI surface
//! is exactly one required integer, which a parser crate would be overkill
//! for.

/// Parses `args` (excluding argv[0]) into a TCP port.
///
/// Zero arguments or a non-integer first argument is a usage error.
pub fn parse_port(args: &[String]) -> Result<u16, UsageError> {
    match args.first() {
        Some(raw) => raw.parse::<u16>().map_err(|_| UsageError).and_then(|port| {
            if port == 0 {
                Err(UsageError)
            } else {
                Ok(port)
            }
        }),
        None => Err(UsageError),
    }
}

/// Marker error for a bad invocation; the caller prints the usage message
/// and exits with status 255 (`-1` as a shell exit code).
#[derive(Debug, PartialEq, Eq)]
pub struct UsageError;

pub const USAGE: &str = "usage: sensor-ingest <port>";

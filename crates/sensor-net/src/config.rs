//! Configuration for the connection manager.

/// Tunables for [`crate::ConnectionManager`].
#[derive(Debug, Clone)]
pub struct ConnectionManagerConfig {
    /// Stop accepting new connections once this many have been accepted,
    /// then join every reader thread and return. `None` means run until the
    /// listener is closed externally (the long-running-server case).
    ///
    /// Bounded-epoch mode exists purely to make end-to-end tests
    /// deterministic; production deployments leave this `None`.
    pub max_connections: Option<usize>,
}

impl Default for ConnectionManagerConfig {
    fn default() -> Self {
        Self {
            max_connections: None,
        }
    }
}

impl ConnectionManagerConfig {
    /// Convenience constructor for bounded test epochs.
    #[must_use]
    pub fn with_max_connections(max_connections: usize) -> Self {
        Self {
            max_connections: Some(max_connections),
        }
    }
}

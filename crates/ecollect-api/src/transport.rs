// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

use crate::error::Error;

/// Transport tuning for the admin backend connection.
///
/// The backend enforces no timeout of its own; everything this layer ever
/// sees as a timeout comes from the client-side limit configured here.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("ecollect-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)
    }
}

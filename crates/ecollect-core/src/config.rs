// ── Runtime console configuration ──
//
// Describes *how* to reach the admin backend. Built by the CLI from file
// and flag values -- core never touches disk.

use std::sync::Arc;
use std::time::Duration;

use ecollect_api::{AdminClient, SessionGate, TransportConfig};

use crate::error::CoreError;

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL (e.g. `http://localhost:5080`).
    pub server: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Dashboard poll cadence.
    pub poll_interval: Duration,
    /// Default page size for list views.
    pub page_limit: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:5080".into(),
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(10),
            page_limit: 10,
        }
    }
}

impl ConsoleConfig {
    /// Build an [`AdminClient`] bound to the given session gate.
    pub fn build_client(&self, session: SessionGate) -> Result<Arc<AdminClient>, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        let client = AdminClient::new(&self.server, session, &transport)?;
        Ok(Arc::new(client))
    }
}

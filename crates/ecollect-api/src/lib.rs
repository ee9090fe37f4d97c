// ecollect-api: Async HTTP client for the E-Collect kiosk admin backend.

pub mod client;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

pub use client::AdminClient;
pub use error::{Error, ErrorKind};
pub use session::{MemoryTokenStore, SessionEvent, SessionGate, SessionState, TokenStore};
pub use transport::TransportConfig;

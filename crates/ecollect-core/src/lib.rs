// ecollect-core: Domain layer between ecollect-api and console surfaces.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fleet;
pub mod geo;
pub mod ledgers;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConsoleConfig;
pub use dashboard::{DashboardPoller, DashboardState};
pub use error::{CoreError, Violation};
pub use fleet::{FleetController, FleetPage, KioskView};
pub use geo::{Coordinates, distance_km, validate_coordinates};
pub use ledgers::LedgerController;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Capacity, CategorySummary, DashboardStats, EwasteEntry, Kiosk, KioskDraft, KioskStatus,
    OperatingHours, StatusPresentation, StatusTier, User,
};

// Transport-facing types consumers compose queries and sessions with.
pub use ecollect_api::types::{ListQuery, StatusFilter};
pub use ecollect_api::{
    AdminClient, MemoryTokenStore, SessionEvent, SessionGate, SessionState, TokenStore,
    TransportConfig,
};

// ── Domain model ──

pub mod dashboard;
pub mod kiosk;
pub mod ledger;

pub use dashboard::{CategorySummary, DashboardStats};
pub use kiosk::{
    Capacity, Kiosk, KioskDraft, KioskStatus, OperatingHours, StatusPresentation, StatusTier,
    toggled,
};
pub use ledger::{EwasteEntry, User};

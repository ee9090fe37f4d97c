// ── Dashboard aggregates ──
//
// Ephemeral: recomputed by the backend on every poll, never cached
// beyond the current view state.

use serde::Serialize;

use ecollect_api::types::{CategoryCount, StatsResponse};

/// Aggregate fleet counts plus the derived status banner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub users: u64,
    pub kiosks: u64,
    pub ewaste: u64,
    /// Backend-derived banner, e.g. "FULL" when aggregate capacity
    /// crosses the collection threshold.
    pub kiosk_status: String,
}

impl DashboardStats {
    /// The banner state that warrants the collect-now hint.
    pub fn needs_collection(&self) -> bool {
        self.kiosk_status.eq_ignore_ascii_case("full")
    }
}

impl From<StatsResponse> for DashboardStats {
    fn from(resp: StatsResponse) -> Self {
        Self {
            users: resp.users,
            kiosks: resp.kiosks,
            ewaste: resp.ewaste,
            kiosk_status: resp.kiosk_status,
        }
    }
}

/// One slice of the e-waste category distribution.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: u64,
}

impl From<CategoryCount> for CategorySummary {
    fn from(row: CategoryCount) -> Self {
        Self {
            category: row.category,
            count: row.count,
        }
    }
}

// Wire types for the admin backend.
//
// The backend is a Mongo-backed REST service: entity ids arrive as `_id`,
// field names are camelCase, and most payloads are wrapped in a
// `{"data": ...}` envelope. Read DTOs are deliberately loose (optional /
// defaulted fields) -- ecollect-core owns normalization for display.
// Write DTOs are strict and only produced by validated form input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Kiosk status vocabulary ──────────────────────────────────────────

/// Kiosk lifecycle status. Always stored upper-case by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum KioskStatus {
    Active,
    Inactive,
    Maintenance,
}

impl Default for KioskStatus {
    /// New kiosks default to ACTIVE.
    fn default() -> Self {
        Self::Active
    }
}

/// Status filter for list endpoints.
///
/// The sentinel `All` never reaches the wire -- the client omits the
/// parameter entirely instead of sending "all" literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(KioskStatus),
}

impl FromStr for StatusFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.trim().parse().map(Self::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

// ── List query composition ───────────────────────────────────────────

/// Composed parameter set for the paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search; empty means unfiltered.
    pub search: String,
    pub status: StatusFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            status: StatusFilter::default(),
        }
    }
}

impl ListQuery {
    /// Render the outgoing query string pairs.
    ///
    /// Empty search and the `all` status sentinel are omitted; a concrete
    /// status is sent upper-cased.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_owned()));
        }
        if let StatusFilter::Only(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

// ── Envelopes ────────────────────────────────────────────────────────

/// The `{"data": ...}` wrapper most endpoints use.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Backend pagination metadata for the kiosk list.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_kiosks: u64,
    pub total_pages: u32,
}

/// One page of kiosks plus pagination metadata.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskPage {
    pub data: Vec<KioskRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

// ── Kiosk ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Capacity as reported by the backend. Signed on read: the invariants
/// (`current >= 0`, `current <= max`) are enforced on our writes, not on
/// what the backend may hand back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CapacityDto {
    pub current: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHoursDto {
    /// "HH:MM"
    pub open: String,
    /// "HH:MM"
    pub close: String,
}

/// A kiosk as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub kiosk_number: String,
    #[serde(default)]
    pub location: String,
    pub coordinates: Option<CoordinatesDto>,
    /// Raw status string; unrecognized values are kept for display and
    /// classified into the neutral presentation tier downstream.
    pub status: Option<String>,
    pub capacity: Option<CapacityDto>,
    pub operating_hours: Option<OperatingHoursDto>,
    pub description: Option<String>,
}

/// Validated capacity for a write. Produced by `normalize_for_write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityWrite {
    pub current: u32,
    pub max: u32,
}

/// Validated write payload for kiosk create/update.
///
/// Only `ecollect-core`'s normalization constructs one of these; by the
/// time a `KioskWrite` exists every §3 invariant already holds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskWrite {
    pub kiosk_number: String,
    pub location: String,
    pub coordinates: CoordinatesDto,
    pub status: KioskStatus,
    pub capacity: CapacityWrite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<OperatingHoursDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Ledger entities (read-only) ──────────────────────────────────────

/// A registered end user of the kiosk network.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub points: i64,
}

/// Populated user reference embedded in an e-waste record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
}

/// A single item scan event. Never mutated by the console.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EwasteRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// `None` when the scanning account has since been removed.
    #[serde(rename = "userId")]
    pub user: Option<UserRef>,
    pub scanned_date: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
    /// Monetary value in PHP.
    #[serde(default)]
    pub php_value: f64,
    /// Incentive points awarded for the scan.
    #[serde(default)]
    pub points: i64,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Aggregate fleet statistics, recomputed by the backend on every poll.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub kiosks: u64,
    #[serde(default)]
    pub ewaste: u64,
    /// Aggregate fleet banner, e.g. "FULL" once capacity crosses the
    /// backend's collection threshold.
    #[serde(default)]
    pub kiosk_status: String,
}

/// One row of the e-waste category distribution.
///
/// The backend emits Mongo aggregation rows keyed `_id`; the `category`
/// alias keeps a saner backend shape parseable too.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "_id", alias = "category")]
    pub category: String,
    pub count: u64,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login succeeds with a bare `{"token": ...}` body (no envelope).
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively_and_displays_upper() {
        assert_eq!("active".parse::<KioskStatus>(), Ok(KioskStatus::Active));
        assert_eq!(
            "Maintenance".parse::<KioskStatus>(),
            Ok(KioskStatus::Maintenance)
        );
        assert_eq!(KioskStatus::Inactive.to_string(), "INACTIVE");
        assert!("retired".parse::<KioskStatus>().is_err());
    }

    #[test]
    fn all_filter_is_omitted_from_params() {
        let query = ListQuery::default();
        let params = query.to_params();
        assert!(params.iter().all(|(k, _)| *k != "status"));
        assert!(params.iter().all(|(k, _)| *k != "search"));
    }

    #[test]
    fn concrete_filter_is_sent_upper_cased() {
        let query = ListQuery {
            status: StatusFilter::Only(KioskStatus::Maintenance),
            search: "  makati  ".into(),
            ..ListQuery::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("status", "MAINTENANCE".to_owned())));
        // Search is trimmed before composing.
        assert!(params.contains(&("search", "makati".to_owned())));
    }

    #[test]
    fn category_summary_accepts_both_wire_shapes() {
        let mongo: CategoryCount = serde_json::from_str(r#"{"_id":"Phone","count":4}"#)
            .expect("mongo shape should parse");
        assert_eq!(mongo.category, "Phone");

        let plain: CategoryCount = serde_json::from_str(r#"{"category":"Laptop","count":2}"#)
            .expect("plain shape should parse");
        assert_eq!(plain.category, "Laptop");
    }

    #[test]
    fn kiosk_record_tolerates_sparse_payloads() {
        let record: KioskRecord = serde_json::from_str(r#"{"_id":"k1"}"#)
            .expect("minimal record should parse");
        assert_eq!(record.id, "k1");
        assert!(record.coordinates.is_none());
        assert!(record.status.is_none());
    }
}

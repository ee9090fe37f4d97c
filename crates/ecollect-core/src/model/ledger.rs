// ── Read-only ledger entities ──
//
// Users and e-waste scans are listed by the console but never mutated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ecollect_api::types::{EwasteRecord, UserRecord};

/// A registered end user of the kiosk network, with accumulated
/// incentive points.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub points: i64,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name.trim().to_owned(),
            username: record.username.trim().to_owned(),
            points: record.points,
        }
    }
}

/// One item scan event in the e-waste ledger.
#[derive(Debug, Clone, Serialize)]
pub struct EwasteEntry {
    pub id: String,
    /// Scanner's display name; `None` when the account was removed.
    pub user_name: Option<String>,
    pub scanned_date: DateTime<Utc>,
    pub category: String,
    /// Monetary value in PHP.
    pub php_value: f64,
    /// Incentive points awarded.
    pub points: i64,
}

impl From<EwasteRecord> for EwasteEntry {
    fn from(record: EwasteRecord) -> Self {
        Self {
            id: record.id,
            user_name: record.user.map(|u| u.full_name),
            scanned_date: record.scanned_date,
            category: record.category,
            php_value: record.php_value,
            points: record.points,
        }
    }
}

// ── Kiosk domain type ──
//
// Normalization, validation, and derived computations over the raw kiosk
// record. Read paths are lenient (the backend may hand back data older or
// newer than this console); write paths are strict and go through
// `KioskDraft::normalize_for_write`, which enforces every invariant
// before a payload can exist.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub use ecollect_api::types::KioskStatus;
use ecollect_api::types::{CapacityWrite, KioskRecord, KioskWrite, OperatingHoursDto};

use crate::error::Violation;
use crate::geo::{self, Coordinates};

// ── Value types ──────────────────────────────────────────────────────

/// Fill state of a kiosk bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub current: u32,
    pub max: u32,
}

/// Daily service window, "HH:MM" local times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
}

impl OperatingHours {
    /// Whether the window covers `now`.
    ///
    /// Plain minute comparison, inherited as-is from the original console:
    /// a window whose close precedes its open (crossing midnight, e.g.
    /// 22:00-06:00) never evaluates open. Unparseable times fail open,
    /// like absent hours -- bad data must not hide a kiosk from an
    /// operator.
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        let (Some(open), Some(close)) = (minutes(&self.open), minutes(&self.close)) else {
            return true;
        };
        let now = now.hour() * 60 + now.minute();
        open <= now && now <= close
    }
}

/// "HH:MM" to minutes-since-midnight.
fn minutes(value: &str) -> Option<u32> {
    let (hours, mins) = value.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let mins: u32 = mins.parse().ok()?;
    if hours > 23 || mins > 59 {
        return None;
    }
    Some(hours * 60 + mins)
}

// ── Status presentation ──────────────────────────────────────────────

/// Display classification tier. Purely presentational -- no business
/// logic branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Positive,
    Warning,
    Neutral,
}

/// Human label + tier for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub label: &'static str,
    pub tier: StatusTier,
}

impl StatusPresentation {
    /// Classify a raw status string. Unrecognized values land in the
    /// neutral tier alongside INACTIVE.
    pub fn for_status(raw: &str) -> Self {
        match raw.trim().parse::<KioskStatus>() {
            Ok(KioskStatus::Active) => Self {
                label: "Active",
                tier: StatusTier::Positive,
            },
            Ok(KioskStatus::Maintenance) => Self {
                label: "Maintenance",
                tier: StatusTier::Warning,
            },
            Ok(KioskStatus::Inactive) => Self {
                label: "Inactive",
                tier: StatusTier::Neutral,
            },
            Err(_) => Self {
                label: "Unknown",
                tier: StatusTier::Neutral,
            },
        }
    }
}

/// The quick-toggle transition: ACTIVE goes inactive, everything else
/// (including MAINTENANCE) goes active.
pub fn toggled(status: Option<KioskStatus>) -> KioskStatus {
    match status {
        Some(KioskStatus::Active) => KioskStatus::Inactive,
        _ => KioskStatus::Active,
    }
}

// ── Kiosk ────────────────────────────────────────────────────────────

/// A kiosk normalized for display.
#[derive(Debug, Clone, Serialize)]
pub struct Kiosk {
    pub id: String,
    pub kiosk_number: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    /// Upper-cased raw status; may carry values newer than this console
    /// understands. Presentation handles the unknown case.
    pub status: String,
    pub capacity: Option<Capacity>,
    pub operating_hours: Option<OperatingHours>,
    pub description: Option<String>,
}

impl From<KioskRecord> for Kiosk {
    fn from(record: KioskRecord) -> Self {
        Self {
            id: record.id,
            kiosk_number: record.kiosk_number.trim().to_uppercase(),
            location: record.location.trim().to_owned(),
            coordinates: record.coordinates.map(Coordinates::from),
            status: record
                .status
                .map_or_else(String::new, |s| s.trim().to_uppercase()),
            capacity: record.capacity.map(|c| Capacity {
                // Clamp instead of reject: read data is display-only.
                current: u32::try_from(c.current.max(0)).unwrap_or(u32::MAX),
                max: u32::try_from(c.max.max(0)).unwrap_or(u32::MAX),
            }),
            operating_hours: record.operating_hours.map(|h| OperatingHours {
                open: h.open,
                close: h.close,
            }),
            description: record.description,
        }
    }
}

impl Kiosk {
    /// Fill percentage, rounded. 0 when capacity is absent or max is 0 --
    /// never divides by zero. Can exceed 100 if the backend reports an
    /// overfull bin.
    pub fn capacity_percentage(&self) -> u32 {
        let Some(capacity) = self.capacity else {
            return 0;
        };
        if capacity.max == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (100.0 * f64::from(capacity.current) / f64::from(capacity.max)).round() as u32
        }
    }

    /// Whether the kiosk is open at `now`. Absent operating hours mean
    /// always open (fails open, not closed).
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        self.operating_hours
            .as_ref()
            .is_none_or(|hours| hours.is_open_at(now))
    }

    /// Typed status, when the raw value is one the console recognizes.
    pub fn status(&self) -> Option<KioskStatus> {
        self.status.parse().ok()
    }

    pub fn presentation(&self) -> StatusPresentation {
        StatusPresentation::for_status(&self.status)
    }
}

// ── Write-side draft ─────────────────────────────────────────────────

/// Raw operator form input for a kiosk create or update.
///
/// Fields hold what was typed; nothing is trusted until
/// [`normalize_for_write`](Self::normalize_for_write) runs.
#[derive(Debug, Clone)]
pub struct KioskDraft {
    pub kiosk_number: String,
    pub location: String,
    /// Textual coordinate input, exactly as typed.
    pub latitude: String,
    pub longitude: String,
    /// Status as typed; empty defaults to ACTIVE.
    pub status: String,
    pub capacity_current: i64,
    pub capacity_max: i64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub description: Option<String>,
}

impl KioskDraft {
    /// Trim, case-normalize, and validate this draft into a wire-ready
    /// write payload.
    ///
    /// All violated rules are aggregated -- a draft with an empty
    /// location AND a bad latitude AND an overfull capacity reports all
    /// three at once.
    pub fn normalize_for_write(&self) -> Result<KioskWrite, Vec<Violation>> {
        let mut violations = Vec::new();

        let kiosk_number = self.kiosk_number.trim().to_uppercase();
        if kiosk_number.is_empty() {
            violations.push(Violation::new(
                "kioskNumber",
                "kiosk number must not be empty",
            ));
        }

        let location = self.location.trim().to_owned();
        if location.is_empty() {
            violations.push(Violation::new("location", "location must not be empty"));
        }

        let coordinates = match geo::validate_coordinates(&self.latitude, &self.longitude) {
            Ok(c) => Some(c),
            Err(mut coord_violations) => {
                violations.append(&mut coord_violations);
                None
            }
        };

        let status = self.status.trim();
        let status = if status.is_empty() {
            KioskStatus::default()
        } else {
            status.parse().unwrap_or_else(|_| {
                violations.push(Violation::new(
                    "status",
                    format!("unrecognized status {status:?} (expected ACTIVE, INACTIVE, or MAINTENANCE)"),
                ));
                KioskStatus::default()
            })
        };

        if self.capacity_max < 1 {
            violations.push(Violation::new(
                "capacity.max",
                "capacity max must be at least 1",
            ));
        } else if self.capacity_max > i64::from(u32::MAX) {
            violations.push(Violation::new("capacity.max", "capacity max is too large"));
        }
        if self.capacity_current < 0 {
            violations.push(Violation::new(
                "capacity.current",
                "capacity current must not be negative",
            ));
        }
        if self.capacity_current > self.capacity_max {
            violations.push(Violation::new(
                "capacity",
                "capacity current exceeds capacity max",
            ));
        }

        let operating_hours = match (&self.open_time, &self.close_time) {
            (Some(open), Some(close)) => Some(OperatingHoursDto {
                open: open.trim().to_owned(),
                close: close.trim().to_owned(),
            }),
            (None, None) => None,
            _ => {
                violations.push(Violation::new(
                    "operatingHours",
                    "operating hours need both an open and a close time",
                ));
                None
            }
        };

        match (coordinates, violations.is_empty()) {
            (Some(coordinates), true) => Ok(KioskWrite {
                kiosk_number,
                location,
                coordinates: coordinates.into(),
                status,
                capacity: CapacityWrite {
                    current: u32::try_from(self.capacity_current).unwrap_or(0),
                    max: u32::try_from(self.capacity_max).unwrap_or(1),
                },
                operating_hours,
                description: self
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(ToOwned::to_owned),
            }),
            _ => Err(violations),
        }
    }
}

// ── Geodesic helpers ──
//
// Pure functions; no dependencies on the rest of the crate beyond the
// violation type. `validate_coordinates` is the single required gate
// before any coordinate is persisted -- `distance_km` assumes its inputs
// already passed it.

use serde::{Deserialize, Serialize};

use crate::error::Violation;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A validated latitude/longitude pair (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<ecollect_api::types::CoordinatesDto> for Coordinates {
    fn from(dto: ecollect_api::types::CoordinatesDto) -> Self {
        Self {
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

impl From<Coordinates> for ecollect_api::types::CoordinatesDto {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// Great-circle (haversine) distance between two points, in kilometers.
///
/// Inputs must already be valid coordinates; this performs no validation.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

/// Validate textual coordinate input.
///
/// Both values must parse as numbers and lie within [-90, 90] /
/// [-180, 180]. Failures are aggregated -- a form with two bad fields
/// reports both.
pub fn validate_coordinates(latitude: &str, longitude: &str) -> Result<Coordinates, Vec<Violation>> {
    let mut violations = Vec::new();

    let lat = parse_axis(
        latitude,
        "coordinates.latitude",
        90.0,
        &mut violations,
    );
    let lng = parse_axis(
        longitude,
        "coordinates.longitude",
        180.0,
        &mut violations,
    );

    match (lat, lng) {
        (Some(latitude), Some(longitude)) if violations.is_empty() => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(violations),
    }
}

fn parse_axis(
    raw: &str,
    field: &'static str,
    bound: f64,
    violations: &mut Vec<Violation>,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        violations.push(Violation::new(field, "coordinate is required"));
        return None;
    }
    let Ok(value) = raw.parse::<f64>() else {
        violations.push(Violation::new(field, format!("{raw:?} is not a number")));
        return None;
    };
    if !value.is_finite() || value.abs() > bound {
        violations.push(Violation::new(
            field,
            format!("{value} is outside [-{bound}, {bound}]"),
        ));
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANILA: Coordinates = Coordinates {
        latitude: 14.5995,
        longitude: 120.9842,
    };

    #[test]
    fn zero_distance_for_same_point() {
        assert!(distance_km(MANILA, MANILA) < 1e-9);
    }

    #[test]
    fn manila_to_baguio_is_around_205_km() {
        let baguio = Coordinates {
            latitude: 16.4023,
            longitude: 120.5960,
        };
        let distance = distance_km(MANILA, baguio);
        assert!((distance - 205.0).abs() < 5.0, "got {distance}");
    }

    #[test]
    fn valid_coordinates_parse() {
        let c = validate_coordinates("14.5995", "120.9842").expect("valid");
        assert!((c.latitude - 14.5995).abs() < f64::EPSILON);
        assert!((c.longitude - 120.9842).abs() < f64::EPSILON);
    }

    #[test]
    fn latitude_out_of_range_fails() {
        let err = validate_coordinates("91", "0").expect_err("91 is out of range");
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "coordinates.latitude");
    }

    #[test]
    fn longitude_out_of_range_fails() {
        let err = validate_coordinates("0", "-200").expect_err("-200 is out of range");
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "coordinates.longitude");
    }

    #[test]
    fn non_numeric_input_fails() {
        let err = validate_coordinates("abc", "0").expect_err("abc is not a number");
        assert_eq!(err.len(), 1);
        assert!(err[0].message.contains("not a number"));
    }

    #[test]
    fn both_axes_report_together() {
        let err = validate_coordinates("abc", "999").expect_err("both invalid");
        assert_eq!(err.len(), 2);
    }
}

//! Device location snapshots and distance helpers.
//!
//! Points follow the `geo` convention: `x` is longitude, `y` is latitude.

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};

/// Metres per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A read-only fix reported by the platform location service.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserLocation {
    pub position: Point,
    /// Radius of uncertainty in metres.
    pub horizontal_accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl UserLocation {
    pub fn new(position: Point, horizontal_accuracy: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            position,
            horizontal_accuracy,
            timestamp,
        }
    }
}

/// Great-circle distance between two points in metres.
pub fn distance_meters(a: Point, b: Point) -> f64 {
    Haversine.distance(a, b)
}

/// Degrees of latitude covering `meters`.
pub fn meters_to_latitude_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Degrees of longitude covering `meters` at the given latitude.
///
/// Near the poles a degree of longitude shrinks towards zero, so the result
/// is capped at a full turn.
pub fn meters_to_longitude_degrees(meters: f64, latitude: f64) -> f64 {
    let scale = latitude.to_radians().cos().abs();
    if scale < f64::EPSILON {
        return 360.0;
    }

    (meters / (METERS_PER_DEGREE * scale)).min(360.0)
}

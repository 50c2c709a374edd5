pub mod overlay;
pub mod presenter;

use geo::{Point, Rect};

use crate::location::{meters_to_latitude_degrees, meters_to_longitude_degrees};

/// Geometric centre of the visible map.
pub type MapCenter = Point;

/// The visible part of the map: a centre and the degrees it spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub center: Point,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn new(center: Point, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            center,
            latitude_delta,
            longitude_delta,
        }
    }

    /// A region `span_meters` tall and wide around `center`.
    pub fn square(center: Point, span_meters: f64) -> Self {
        Self {
            center,
            latitude_delta: meters_to_latitude_degrees(span_meters).min(180.0),
            longitude_delta: meters_to_longitude_degrees(span_meters, center.y()),
        }
    }

    /// The smallest region showing all of `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            center: rect.center().into(),
            latitude_delta: rect.height(),
            longitude_delta: rect.width(),
        }
    }
}

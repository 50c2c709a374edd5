//! Street address of the map centre.

use geo::Point;

use crate::{
    error::ScreenError,
    location::distance_meters,
    service::{RequestId, ReverseGeocoder},
};

/// One reverse-geocode result. Any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placemark {
    pub name: Option<String>,
    /// Street number, e.g. "221B".
    pub sub_thoroughfare: Option<String>,
    /// Street name, e.g. "Baker St".
    pub thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Placemark {
    pub fn street(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sub_thoroughfare: Some(number.into()),
            thoroughfare: Some(name.into()),
            ..Self::default()
        }
    }

    /// `"{number} {street}"`, empty when both are missing. A lone street
    /// name keeps its leading space.
    pub fn street_address(&self) -> String {
        match (self.sub_thoroughfare.as_deref(), self.thoroughfare.as_deref()) {
            (None, None) => String::new(),
            (number, street) => format!("{} {}", number.unwrap_or(""), street.unwrap_or("")),
        }
    }
}

/// Outcome of a viewport-settled check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeocodeDecision {
    /// No baseline yet; this settle becomes nothing.
    NoBaseline,
    WithinThreshold { distance_meters: f64 },
    Issued { request: RequestId, cancelled: Option<RequestId> },
}

#[derive(Debug)]
pub struct AddressResolver {
    threshold_meters: f64,
    previous_center: Option<Point>,
    in_flight: Option<RequestId>,
}

impl AddressResolver {
    pub fn new(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            previous_center: None,
            in_flight: None,
        }
    }

    pub fn previous_center(&self) -> Option<Point> {
        self.previous_center
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Record where the map is when tracking begins.
    pub fn set_baseline(&mut self, center: Point) {
        self.previous_center = Some(center);
    }

    pub fn viewport_settled(
        &mut self,
        center: Point,
        request: RequestId,
        geocoder: &dyn ReverseGeocoder,
    ) -> GeocodeDecision {
        let Some(previous) = self.previous_center else {
            return GeocodeDecision::NoBaseline;
        };

        let distance = distance_meters(center, previous);
        if distance <= self.threshold_meters {
            tracing::debug!("map moved {distance:.1}m, below geocode threshold");
            return GeocodeDecision::WithinThreshold {
                distance_meters: distance,
            };
        }

        let cancelled = self.in_flight.take();
        if let Some(stale) = cancelled {
            geocoder.cancel(stale);
        }

        self.previous_center = Some(center);
        self.in_flight = Some(request);
        tracing::debug!(
            "map moved {distance:.1}m, reverse geocoding ({:.5}, {:.5}) as {request}",
            center.y(),
            center.x()
        );
        geocoder.reverse_geocode(request, center);

        GeocodeDecision::Issued { request, cancelled }
    }

    /// Settle `request`. `None` when it was superseded; otherwise the street
    /// address of the first placemark.
    pub fn complete(
        &mut self,
        request: RequestId,
        result: Result<Vec<Placemark>, String>,
    ) -> Option<Result<String, ScreenError>> {
        if self.in_flight != Some(request) {
            return None;
        }
        self.in_flight = None;

        Some(match result {
            Err(message) => Err(ScreenError::GeocodeFailed(message)),
            Ok(placemarks) => placemarks
                .first()
                .map(Placemark::street_address)
                .ok_or(ScreenError::GeocodeEmpty),
        })
    }
}

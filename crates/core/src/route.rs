//! Directions from the user to the map centre.

use std::time::Duration;

use geo::{BoundingRect, LineString, Point, Rect};
use serde::Deserialize;

use crate::{
    location::UserLocation,
    service::{DirectionsService, RequestId},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportType {
    #[default]
    Automobile,
    Walking,
    Transit,
    Any,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub origin: Point,
    pub destination: Point,
    pub transport: TransportType,
}

/// One candidate route returned by the directions service.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub name: Option<String>,
    pub polyline: LineString,
    pub distance_meters: f64,
    pub expected_travel_time: Duration,
}

impl Route {
    pub fn new(polyline: LineString, distance_meters: f64, expected_travel_time: Duration) -> Self {
        Self {
            name: None,
            polyline,
            distance_meters,
            expected_travel_time,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.polyline.bounding_rect()
    }
}

/// Issues route calculations, keeping at most one alive.
#[derive(Debug)]
pub struct RouteRequester {
    transport: TransportType,
    pending: Vec<RequestId>,
}

impl RouteRequester {
    pub fn new(transport: TransportType) -> Self {
        Self {
            transport,
            pending: Vec::new(),
        }
    }

    pub fn build_request(&self, origin: &UserLocation, destination: Point) -> RouteRequest {
        RouteRequest {
            origin: origin.position,
            destination,
            transport: self.transport,
        }
    }

    /// Cancel everything pending, then register and start `request`.
    ///
    /// Returns how many earlier requests were cancelled. The new request is
    /// registered only after the sweep, so it never cancels itself.
    pub fn issue(
        &mut self,
        id: RequestId,
        request: &RouteRequest,
        directions: &dyn DirectionsService,
    ) -> usize {
        let cancelled = self.pending.len();
        for stale in self.pending.drain(..) {
            directions.cancel(stale);
        }

        self.pending.push(id);
        tracing::info!(
            "requesting {} route {id} from ({:.5}, {:.5}) to ({:.5}, {:.5})",
            request.transport,
            request.origin.y(),
            request.origin.x(),
            request.destination.y(),
            request.destination.x(),
        );
        directions.calculate(id, request);

        cancelled
    }

    /// Settle `id`. Returns `false` when it was superseded and its result
    /// should be dropped.
    pub fn complete(&mut self, id: RequestId) -> bool {
        match self.pending.iter().position(|pending| *pending == id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> &[RequestId] {
        &self.pending
    }
}

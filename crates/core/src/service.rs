//! Platform collaborators.
//!
//! The host implements these around its location manager, geocoder and
//! directions engine. Calls are fire-and-forget: results come back later as
//! [`ScreenEvent`](crate::event::ScreenEvent)s tagged with the [`RequestId`]
//! they were issued under, on whatever thread the platform likes.

use std::fmt;

use geo::Point;

use crate::{
    location::UserLocation,
    permission::{AuthorizationState, TrackingPermit},
    route::RouteRequest,
};

/// Identifies one geocode or route request issued by the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing request ids.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn next(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

pub trait LocationService: Send + Sync {
    /// Whether location services are switched on for the whole device.
    fn services_enabled(&self) -> bool;

    fn authorization_state(&self) -> AuthorizationState;

    fn request_when_in_use_authorization(&self);

    /// Begin continuous updates. Only callable with proof of authorisation.
    fn start_updating_location(&self, permit: &TrackingPermit);

    /// One-shot read of the most recent fix, if the platform has one.
    fn current_location(&self) -> Option<UserLocation>;
}

pub trait ReverseGeocoder: Send + Sync {
    fn reverse_geocode(&self, request: RequestId, at: Point);

    /// Cancel a request if it is still in flight. Unknown ids are ignored.
    fn cancel(&self, request: RequestId);
}

pub trait DirectionsService: Send + Sync {
    fn calculate(&self, request: RequestId, route: &RouteRequest);

    /// Cancel a request if it is still in flight. Unknown ids are ignored.
    fn cancel(&self, request: RequestId);
}

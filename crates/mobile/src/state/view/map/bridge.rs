//! Platform services implemented in Swift/Kotlin, adapted to the core traits.
//!
//! Geocode and route results are not returned from these calls; the host
//! reports them later through [`MapState`](super::MapState) using the
//! request id it was handed. A provider that keeps the `MapState` for that
//! purpose is only released after `MapState::shutdown`.

use std::sync::Arc;

use geo::Point;
use map_app_core::{
    location::UserLocation,
    permission::{AuthorizationState, TrackingPermit},
    route::RouteRequest,
    service::{DirectionsService, LocationService, RequestId, ReverseGeocoder},
};

use super::records::{AuthorizationStatus, Coordinate, LocationFix, RouteQuery};

#[uniffi::export(with_foreign)]
pub trait LocationProvider: Send + Sync {
    fn services_enabled(&self) -> bool;
    fn authorization_status(&self) -> AuthorizationStatus;
    fn request_when_in_use_authorization(&self);
    fn start_updating_location(&self);
    fn current_location(&self) -> Option<LocationFix>;
}

#[uniffi::export(with_foreign)]
pub trait Geocoder: Send + Sync {
    fn reverse_geocode(&self, request: u64, coordinate: Coordinate);
    fn cancel(&self, request: u64);
}

#[uniffi::export(with_foreign)]
pub trait DirectionsProvider: Send + Sync {
    fn calculate(&self, request: u64, query: RouteQuery);
    fn cancel(&self, request: u64);
}

pub(crate) struct PlatformLocation(pub Arc<dyn LocationProvider>);

impl LocationService for PlatformLocation {
    fn services_enabled(&self) -> bool {
        self.0.services_enabled()
    }

    fn authorization_state(&self) -> AuthorizationState {
        self.0.authorization_status().into()
    }

    fn request_when_in_use_authorization(&self) {
        self.0.request_when_in_use_authorization()
    }

    fn start_updating_location(&self, permit: &TrackingPermit) {
        tracing::debug!("starting location updates ({})", permit.granted());
        self.0.start_updating_location()
    }

    fn current_location(&self) -> Option<UserLocation> {
        self.0.current_location().map(UserLocation::from)
    }
}

pub(crate) struct PlatformGeocoder(pub Arc<dyn Geocoder>);

impl ReverseGeocoder for PlatformGeocoder {
    fn reverse_geocode(&self, request: RequestId, at: Point) {
        self.0.reverse_geocode(request.get(), at.into())
    }

    fn cancel(&self, request: RequestId) {
        self.0.cancel(request.get())
    }
}

pub(crate) struct PlatformDirections(pub Arc<dyn DirectionsProvider>);

impl DirectionsService for PlatformDirections {
    fn calculate(&self, request: RequestId, route: &RouteRequest) {
        self.0.calculate(request.get(), RouteQuery::from(route))
    }

    fn cancel(&self, request: RequestId) {
        self.0.cancel(request.get())
    }
}

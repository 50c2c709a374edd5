use std::sync::Mutex;

use geo::Point;

use crate::{
    location::UserLocation,
    permission::{AuthorizationState, TrackingPermit},
    route::RouteRequest,
    service::{DirectionsService, LocationService, RequestId, ReverseGeocoder},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ServiceCall {
    RequestAuthorization,
    StartUpdating(AuthorizationState),
    ReverseGeocode(RequestId, Point),
    CancelGeocode(RequestId),
    Calculate(RequestId, RouteRequest),
    CancelRoute(RequestId),
}

/// Stands in for every platform service and records what it was asked.
pub(crate) struct RecordingServices {
    enabled: bool,
    state: Mutex<AuthorizationState>,
    location: Mutex<Option<UserLocation>>,
    calls: Mutex<Vec<ServiceCall>>,
}

impl Default for RecordingServices {
    fn default() -> Self {
        Self {
            enabled: true,
            state: Mutex::new(AuthorizationState::Undetermined),
            location: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingServices {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_location(&self, location: Option<UserLocation>) {
        *self.location.lock().unwrap() = location;
    }

    pub fn set_state(&self, state: AuthorizationState) {
        *self.state.lock().unwrap() = state;
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl LocationService for RecordingServices {
    fn services_enabled(&self) -> bool {
        self.enabled
    }

    fn authorization_state(&self) -> AuthorizationState {
        *self.state.lock().unwrap()
    }

    fn request_when_in_use_authorization(&self) {
        self.record(ServiceCall::RequestAuthorization);
    }

    fn start_updating_location(&self, permit: &TrackingPermit) {
        self.record(ServiceCall::StartUpdating(permit.granted()));
    }

    fn current_location(&self) -> Option<UserLocation> {
        *self.location.lock().unwrap()
    }
}

impl ReverseGeocoder for RecordingServices {
    fn reverse_geocode(&self, request: RequestId, at: Point) {
        self.record(ServiceCall::ReverseGeocode(request, at));
    }

    fn cancel(&self, request: RequestId) {
        self.record(ServiceCall::CancelGeocode(request));
    }
}

impl DirectionsService for RecordingServices {
    fn calculate(&self, request: RequestId, route: &RouteRequest) {
        self.record(ServiceCall::Calculate(request, route.clone()));
    }

    fn cancel(&self, request: RequestId) {
        self.record(ServiceCall::CancelRoute(request));
    }
}

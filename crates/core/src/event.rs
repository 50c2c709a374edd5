//! Events consumed by the screen coordinator.
//!
//! ```text
//! location manager --AuthorizationChanged/LocationUpdated--+
//! map view --------ViewportSettled-------------------------+--> MapScreen
//! start button ----StartPressed----------------------------+
//! geocoder/router -GeocodeCompleted/RouteCompleted---------+
//! ```

use tokio::sync::mpsc;

use crate::{
    address::Placemark,
    location::UserLocation,
    map::Region,
    permission::AuthorizationState,
    route::Route,
    service::RequestId,
};

#[derive(Clone, Debug, PartialEq)]
pub enum ScreenEvent {
    /// The screen finished loading; check services and authorisation.
    Loaded,
    AuthorizationChanged(AuthorizationState),
    LocationUpdated(UserLocation),
    /// A pan or zoom finished and the map shows `Region`.
    ViewportSettled(Region),
    /// The user asked for directions to the map centre.
    StartPressed,
    GeocodeCompleted {
        request: RequestId,
        result: Result<Vec<Placemark>, String>,
    },
    RouteCompleted {
        request: RequestId,
        result: Result<Vec<Route>, String>,
    },
    Shutdown,
}

pub fn event_queue() -> (ScreenHandle, mpsc::UnboundedReceiver<ScreenEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ScreenHandle(sender), receiver)
}

/// Cloneable entry point for platform callbacks. Safe to use from any thread.
#[derive(Clone, Debug)]
pub struct ScreenHandle(mpsc::UnboundedSender<ScreenEvent>);

impl ScreenHandle {
    /// Returns `false` once the screen has shut down.
    pub fn post(&self, event: ScreenEvent) -> bool {
        match self.0.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::debug!("screen stopped, dropping {event:?}");
                false
            }
        }
    }
}

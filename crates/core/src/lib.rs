//! # map-app-core
//!
//! Platform-neutral coordinator for a single location-centred map screen.
//!
//! The screen asks for location permission, centres the map on the user,
//! reverse-geocodes the map centre as the user pans and draws a route from
//! the user to the chosen centre. The platform's location service, geocoder,
//! routing engine and map view are reached through the traits in
//! [`service`]; everything user-visible goes out as a [`ui::UiCommand`].
//!
//! ```text
//! platform shims --ScreenEvent--> MapScreen --UiCommand--> main thread
//!                                     |
//!                                     +--> LocationService / ReverseGeocoder / DirectionsService
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod event;
pub mod location;
pub mod map;
pub mod permission;
pub mod route;
pub mod screen;
pub mod service;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
    pub use crate::address::{AddressResolver, GeocodeDecision, Placemark};
    pub use crate::config::{AlertConfig, ConfigError, ScreenConfig};
    pub use crate::error::{ScreenError, Severity};
    pub use crate::event::{ScreenEvent, ScreenHandle};
    pub use crate::location::UserLocation;
    pub use crate::map::{MapCenter, Region, overlay::OverlayStyle, overlay::RouteOverlay};
    pub use crate::permission::{AuthorizationState, PermissionAction, TrackingPermit};
    pub use crate::route::{Route, RouteRequest, RouteRequester, TransportType};
    pub use crate::screen::{MapScreen, Services};
    pub use crate::service::{DirectionsService, LocationService, RequestId, ReverseGeocoder};
    pub use crate::ui::{Alert, UiCommand, UiQueue, UiReceiver};
}

pub use prelude::*;

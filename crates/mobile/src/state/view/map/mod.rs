pub mod bridge;
pub mod records;

use std::sync::Arc;

use map_app_core::{
    address::Placemark,
    config::ScreenConfig,
    event::{ScreenEvent, ScreenHandle, event_queue},
    map::Region,
    route::Route,
    screen::{MapScreen, Services},
    service::RequestId,
    ui::{UiReceiver, ui_queue},
};
use tokio::sync::Mutex;

use crate::{
    runtime::ScreenRuntime,
    state::view::{
        MapError,
        map::{
            bridge::{
                DirectionsProvider, Geocoder, LocationProvider, PlatformDirections,
                PlatformGeocoder, PlatformLocation,
            },
            records::{
                AuthorizationStatus, LocationFix, MapRegion, PlacemarkRecord, RouteCandidate,
                ScreenSettings, UiUpdate,
            },
        },
    },
};

/// A running map screen. Platform callbacks feed it events from any thread;
/// the host's main thread pulls [`UiUpdate`]s with `next_ui_update`.
#[derive(uniffi::Object)]
pub struct MapState {
    events: ScreenHandle,
    ui: Mutex<UiReceiver>,
    settings: ScreenSettings,
    runtime: ScreenRuntime,
}

impl MapState {
    pub(crate) fn start(
        config: ScreenConfig,
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
        viewport: Region,
    ) -> Result<Self, MapError> {
        let services = Services {
            location: Arc::new(PlatformLocation(location)),
            geocoder: Arc::new(PlatformGeocoder(geocoder)),
            directions: Arc::new(PlatformDirections(directions)),
        };
        let settings = ScreenSettings {
            geocode_threshold_meters: config.geocode_threshold_meters,
            initial_span_meters: config.initial_span_meters,
            address_label_corner_radius: config.address_label_corner_radius,
            route_stroke_color: config.route_stroke_color.clone(),
            route_line_width: config.route_line_width,
            transport: config.transport.into(),
        };

        let (ui, ui_receiver) = ui_queue();
        let screen = MapScreen::new(config, services, ui, viewport)
            .map_err(|e| MapError::Config(e.to_string()))?;
        let (events, receiver) = event_queue();
        let runtime = ScreenRuntime::start(screen, events.clone(), receiver)
            .map_err(|e| MapError::Runtime(e.to_string()))?;

        Ok(Self {
            events,
            ui: Mutex::new(ui_receiver),
            settings,
            runtime,
        })
    }

    fn post(&self, event: ScreenEvent) {
        if !self.events.post(event) {
            tracing::warn!("map screen is no longer running");
        }
    }
}

#[uniffi::export]
impl MapState {
    pub fn settings(&self) -> ScreenSettings {
        self.settings.clone()
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_running()
    }

    /// The screen has loaded; check location services and permission.
    pub fn loaded(&self) {
        self.post(ScreenEvent::Loaded)
    }

    pub fn authorization_changed(&self, status: AuthorizationStatus) {
        self.post(ScreenEvent::AuthorizationChanged(status.into()))
    }

    pub fn location_updated(&self, fix: LocationFix) {
        self.post(ScreenEvent::LocationUpdated(fix.into()))
    }

    pub fn viewport_settled(&self, region: MapRegion) {
        self.post(ScreenEvent::ViewportSettled(region.into()))
    }

    pub fn start_pressed(&self) {
        self.post(ScreenEvent::StartPressed)
    }

    pub fn geocode_completed(&self, request: u64, placemarks: Vec<PlacemarkRecord>) {
        self.post(ScreenEvent::GeocodeCompleted {
            request: RequestId(request),
            result: Ok(placemarks.into_iter().map(Placemark::from).collect()),
        })
    }

    pub fn geocode_failed(&self, request: u64, message: String) {
        self.post(ScreenEvent::GeocodeCompleted {
            request: RequestId(request),
            result: Err(message),
        })
    }

    pub fn route_completed(&self, request: u64, routes: Vec<RouteCandidate>) {
        self.post(ScreenEvent::RouteCompleted {
            request: RequestId(request),
            result: Ok(routes.into_iter().map(Route::from).collect()),
        })
    }

    pub fn route_failed(&self, request: u64, message: String) {
        self.post(ScreenEvent::RouteCompleted {
            request: RequestId(request),
            result: Err(message),
        })
    }

    /// Stop the screen thread. Providers holding this object keep it alive,
    /// so hosts call this when the screen is dismissed; the thread then drops
    /// the providers it owns.
    pub fn shutdown(&self) {
        self.events.post(ScreenEvent::Shutdown);
    }

    /// Wait for the next UI mutation. `None` once the screen has stopped.
    pub async fn next_ui_update(&self) -> Option<UiUpdate> {
        self.ui.lock().await.recv().await.map(UiUpdate::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex as StdMutex, OnceLock, mpsc};
    use std::time::Duration;

    use super::*;
    use crate::state::view::map::records::{Coordinate, RouteQuery};

    struct FakeLocation {
        status: AuthorizationStatus,
        fix: Option<LocationFix>,
        started: StdMutex<bool>,
    }

    impl LocationProvider for FakeLocation {
        fn services_enabled(&self) -> bool {
            true
        }

        fn authorization_status(&self) -> AuthorizationStatus {
            self.status
        }

        fn request_when_in_use_authorization(&self) {}

        fn start_updating_location(&self) {
            *self.started.lock().unwrap() = true;
        }

        fn current_location(&self) -> Option<LocationFix> {
            self.fix
        }
    }

    struct FakeGeocoder(StdMutex<mpsc::Sender<(u64, Coordinate)>>);

    impl Geocoder for FakeGeocoder {
        fn reverse_geocode(&self, request: u64, coordinate: Coordinate) {
            let _ = self.0.lock().unwrap().send((request, coordinate));
        }

        fn cancel(&self, _request: u64) {}
    }

    struct FakeDirections(StdMutex<mpsc::Sender<(u64, RouteQuery)>>);

    impl DirectionsProvider for FakeDirections {
        fn calculate(&self, request: u64, query: RouteQuery) {
            let _ = self.0.lock().unwrap().send((request, query));
        }

        fn cancel(&self, _request: u64) {}
    }

    struct Harness {
        state: MapState,
        location: Arc<FakeLocation>,
        geocodes: mpsc::Receiver<(u64, Coordinate)>,
        routes: mpsc::Receiver<(u64, RouteQuery)>,
    }

    fn harness(status: AuthorizationStatus, fix: Option<LocationFix>) -> Harness {
        let (geocode_tx, geocodes) = mpsc::channel();
        let (route_tx, routes) = mpsc::channel();
        let location = Arc::new(FakeLocation {
            status,
            fix,
            started: StdMutex::new(false),
        });

        let state = MapState::start(
            ScreenConfig::default(),
            location.clone(),
            Arc::new(FakeGeocoder(StdMutex::new(geocode_tx))),
            Arc::new(FakeDirections(StdMutex::new(route_tx))),
            Region::square(geo::Point::new(0.0, 0.0), 1_000.0),
        )
        .unwrap();

        Harness {
            state,
            location,
            geocodes,
            routes,
        }
    }

    fn region_at(latitude: f64, longitude: f64) -> MapRegion {
        MapRegion {
            center: Coordinate {
                latitude,
                longitude,
            },
            latitude_delta: 0.01,
            longitude_delta: 0.01,
        }
    }

    #[tokio::test]
    async fn test_pan_and_geocode_round_trip() {
        let harness = harness(AuthorizationStatus::AuthorizedWhenInUse, None);
        assert!(harness.state.is_running());

        harness.state.loaded();
        assert_eq!(
            harness.state.next_ui_update().await,
            Some(UiUpdate::ShowUserLocation { visible: true })
        );

        harness.state.viewport_settled(region_at(0.00054, 0.0));
        let (request, coordinate) = harness
            .geocodes
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(coordinate.latitude, 0.00054);
        assert!(*harness.location.started.lock().unwrap());

        harness.state.geocode_completed(
            request,
            vec![PlacemarkRecord {
                sub_thoroughfare: Some("221B".into()),
                thoroughfare: Some("Baker St".into()),
                ..PlacemarkRecord::default()
            }],
        );
        assert_eq!(
            harness.state.next_ui_update().await,
            Some(UiUpdate::SetAddress {
                text: "221B Baker St".into()
            })
        );
    }

    #[tokio::test]
    async fn test_start_routes_to_map_center() {
        let fix = LocationFix {
            coordinate: Coordinate {
                latitude: 51.5238,
                longitude: -0.1585,
            },
            horizontal_accuracy: 5.0,
            timestamp_ms: 1_700_000_000_000,
        };
        let harness = harness(AuthorizationStatus::AuthorizedAlways, Some(fix));

        harness.state.viewport_settled(region_at(51.5072, -0.1276));
        harness.state.start_pressed();

        let (request, query) = harness.routes.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(query.origin, fix.coordinate);
        assert_eq!(query.destination.latitude, 51.5072);
        assert_eq!(
            harness.state.next_ui_update().await,
            Some(UiUpdate::RemoveAllOverlays)
        );

        harness.state.route_failed(request, "no route".into());
        assert_eq!(
            harness.state.next_ui_update().await,
            Some(UiUpdate::Notice {
                message: "route calculation failed: no route".into()
            })
        );
    }

    #[tokio::test]
    async fn test_denied_permission_alerts() {
        let harness = harness(AuthorizationStatus::Denied, None);

        harness.state.loaded();

        match harness.state.next_ui_update().await {
            Some(UiUpdate::Alert { alert }) => {
                assert_eq!(alert.title, "Enable Location");
                assert_eq!(alert.message, "Location services are required for this app");
            }
            other => panic!("expected an alert, got {other:?}"),
        }
    }

    /// Reports every lookup straight back through the screen it serves, the
    /// way a host geocoder holds on to its `MapState`.
    struct ReportingGeocoder(OnceLock<Arc<MapState>>);

    impl Geocoder for ReportingGeocoder {
        fn reverse_geocode(&self, request: u64, _coordinate: Coordinate) {
            if let Some(state) = self.0.get() {
                state.geocode_failed(request, "offline".into());
            }
        }

        fn cancel(&self, _request: u64) {}
    }

    #[tokio::test]
    async fn test_shutdown_releases_state_held_by_provider() {
        let (route_tx, _routes) = mpsc::channel();
        let geocoder = Arc::new(ReportingGeocoder(OnceLock::new()));
        let state = Arc::new(
            MapState::start(
                ScreenConfig::default(),
                Arc::new(FakeLocation {
                    status: AuthorizationStatus::AuthorizedWhenInUse,
                    fix: None,
                    started: StdMutex::new(false),
                }),
                geocoder.clone(),
                Arc::new(FakeDirections(StdMutex::new(route_tx))),
                Region::square(geo::Point::new(0.0, 0.0), 1_000.0),
            )
            .unwrap(),
        );
        assert!(geocoder.0.set(Arc::clone(&state)).is_ok());
        drop(geocoder);

        state.shutdown();
        for _ in 0..500 {
            if !state.is_running() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        assert!(!state.is_running());
        assert_eq!(state.next_ui_update().await, None);

        let weak = Arc::downgrade(&state);
        drop(state);
        assert!(weak.upgrade().is_none());
    }
}

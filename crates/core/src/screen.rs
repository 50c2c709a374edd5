//! The screen coordinator: a single consumer of [`ScreenEvent`]s.
//!
//! Every decision (permission policy, geocode gate, request cancellation)
//! runs here, one event at a time, so none of it needs a lock. Anything the
//! user sees goes out through the [`UiQueue`].

use std::{ops::ControlFlow, sync::Arc};

use tokio::sync::mpsc;

use crate::{
    address::{AddressResolver, Placemark},
    config::{ConfigError, ScreenConfig},
    error::{ScreenError, Severity},
    event::ScreenEvent,
    location::UserLocation,
    map::{Region, presenter::MapPresenter},
    permission::{AuthorizationState, PermissionAction, PermissionCoordinator},
    route::{Route, RouteRequester},
    service::{DirectionsService, LocationService, RequestId, RequestIds, ReverseGeocoder},
    ui::{UiCommand, UiQueue},
};

/// The platform collaborators the screen drives.
#[derive(Clone)]
pub struct Services {
    pub location: Arc<dyn LocationService>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub directions: Arc<dyn DirectionsService>,
}

pub struct MapScreen {
    config: ScreenConfig,
    services: Services,
    ui: UiQueue,
    permission: PermissionCoordinator,
    presenter: MapPresenter,
    address: AddressResolver,
    routes: RouteRequester,
    last_fix: Option<UserLocation>,
    request_ids: RequestIds,
}

impl MapScreen {
    pub fn new(
        config: ScreenConfig,
        services: Services,
        ui: UiQueue,
        viewport: Region,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let presenter = MapPresenter::new(ui.clone(), viewport, config.route_style()?);

        Ok(Self {
            permission: PermissionCoordinator::new(),
            presenter,
            address: AddressResolver::new(config.geocode_threshold_meters),
            routes: RouteRequester::new(config.transport),
            last_fix: None,
            request_ids: RequestIds::default(),
            config,
            services,
            ui,
        })
    }

    pub fn authorization(&self) -> AuthorizationState {
        self.permission.state()
    }

    pub fn presenter(&self) -> &MapPresenter {
        &self.presenter
    }

    pub fn address(&self) -> &AddressResolver {
        &self.address
    }

    pub fn routes(&self) -> &RouteRequester {
        &self.routes
    }

    /// Consume events until [`ScreenEvent::Shutdown`] or every sender is gone.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ScreenEvent>) {
        tracing::debug!("screen started");
        while let Some(event) = events.recv().await {
            if self.handle(event).is_break() {
                break;
            }
        }
        tracing::debug!("screen stopped");
    }

    pub fn handle(&mut self, event: ScreenEvent) -> ControlFlow<()> {
        match event {
            ScreenEvent::Loaded => self.check_location_services(),
            ScreenEvent::AuthorizationChanged(state) => self.apply_authorization(state),
            ScreenEvent::LocationUpdated(fix) => {
                tracing::trace!("location fix ±{:.0}m", fix.horizontal_accuracy);
                self.last_fix = Some(fix);
            }
            ScreenEvent::ViewportSettled(region) => self.viewport_settled(region),
            ScreenEvent::StartPressed => self.request_directions(),
            ScreenEvent::GeocodeCompleted { request, result } => {
                self.geocode_completed(request, result)
            }
            ScreenEvent::RouteCompleted { request, result } => self.route_completed(request, result),
            ScreenEvent::Shutdown => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    fn check_location_services(&mut self) {
        if !self.services.location.services_enabled() {
            self.report(ScreenError::LocationServicesDisabled);
            return;
        }

        let state = self.permission.check_status(self.services.location.as_ref());
        self.apply_authorization(state);
    }

    fn apply_authorization(&mut self, state: AuthorizationState) {
        match self.permission.evaluate(state) {
            PermissionAction::RequestWhenInUse => {
                self.services.location.request_when_in_use_authorization()
            }
            PermissionAction::Prompt(error) => self.report(error),
            PermissionAction::BeginTracking(permit) => {
                self.presenter.show_user_location();
                if let Some(fix) = self.current_fix() {
                    self.presenter
                        .center_on(fix.position, self.config.initial_span_meters);
                }
                self.services.location.start_updating_location(&permit);
                self.address.set_baseline(self.presenter.current_center());
            }
            PermissionAction::Satisfied => {}
        }
    }

    fn viewport_settled(&mut self, region: Region) {
        if !self.presenter.viewport_settled(region) {
            tracing::warn!("ignoring viewport with a non-finite centre: {region:?}");
            return;
        }
        let center = self.presenter.current_center();
        let request = self.request_ids.next();

        self.address
            .viewport_settled(center, request, self.services.geocoder.as_ref());
    }

    fn geocode_completed(&mut self, request: RequestId, result: Result<Vec<Placemark>, String>) {
        match self.address.complete(request, result) {
            None => tracing::debug!("dropping superseded geocode {request}"),
            Some(Ok(address)) => self.ui.post(UiCommand::SetAddress(address)),
            Some(Err(error)) => self.report(error),
        }
    }

    fn request_directions(&mut self) {
        let Some(fix) = self.current_fix() else {
            self.report(ScreenError::LocationUnavailable);
            return;
        };

        let request = self
            .routes
            .build_request(&fix, self.presenter.current_center());
        self.presenter.clear_route();

        let id = self.request_ids.next();
        let cancelled = self
            .routes
            .issue(id, &request, self.services.directions.as_ref());
        if cancelled > 0 {
            tracing::debug!("cancelled {cancelled} earlier route request(s)");
        }
    }

    fn route_completed(&mut self, request: RequestId, result: Result<Vec<Route>, String>) {
        if !self.routes.complete(request) {
            tracing::debug!("dropping superseded route {request}");
            return;
        }

        match result {
            Ok(routes) if routes.is_empty() => tracing::info!("route {request} found no routes"),
            Ok(routes) => self.presenter.show_route(&routes),
            Err(message) => self.report(ScreenError::RouteFailed(message)),
        }
    }

    fn current_fix(&self) -> Option<UserLocation> {
        self.services.location.current_location().or(self.last_fix)
    }

    fn report(&self, error: ScreenError) {
        match error.severity() {
            Severity::Blocking => {
                tracing::info!("prompting user: {error}");
                self.ui.post(UiCommand::Alert(self.config.alert()));
            }
            Severity::Notice => {
                tracing::warn!("{error}");
                if self.config.notify_on_service_errors {
                    self.ui.post(UiCommand::Notice(error.to_string()));
                }
            }
        }
    }
}

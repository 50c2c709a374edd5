//! Location authorisation policy.

use crate::{error::ScreenError, service::LocationService};

/// OS-level grant for location access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum AuthorizationState {
    Undetermined,
    Denied,
    Restricted,
    /// "When in use".
    AuthorizedLimited,
    /// "Always".
    AuthorizedFull,
}

impl AuthorizationState {
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedLimited | Self::AuthorizedFull)
    }
}

/// Proof that location access has been granted. Only this module can mint
/// one, so location updates cannot be started while unauthorised.
#[derive(Debug)]
pub struct TrackingPermit {
    granted: AuthorizationState,
}

impl TrackingPermit {
    fn for_state(state: AuthorizationState) -> Option<Self> {
        state.is_authorized().then_some(Self { granted: state })
    }

    pub fn granted(&self) -> AuthorizationState {
        self.granted
    }
}

/// What the screen should do in response to an authorisation state.
#[derive(Debug)]
pub enum PermissionAction {
    RequestWhenInUse,
    Prompt(ScreenError),
    /// Show the user, centre on them, start updates and take a geocode
    /// baseline.
    BeginTracking(TrackingPermit),
    /// Already satisfied; nothing to do.
    Satisfied,
}

#[derive(Debug)]
pub struct PermissionCoordinator {
    state: AuthorizationState,
}

impl Default for PermissionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionCoordinator {
    pub fn new() -> Self {
        Self {
            state: AuthorizationState::Undetermined,
        }
    }

    pub fn check_status(&self, location: &dyn LocationService) -> AuthorizationState {
        location.authorization_state()
    }

    /// Last state passed to [`evaluate`](Self::evaluate).
    pub fn state(&self) -> AuthorizationState {
        self.state
    }

    pub fn evaluate(&mut self, state: AuthorizationState) -> PermissionAction {
        if state != self.state {
            tracing::info!("location authorization {} -> {}", self.state, state);
        }
        self.state = state;

        match state {
            AuthorizationState::Undetermined => PermissionAction::RequestWhenInUse,
            AuthorizationState::Denied => PermissionAction::Prompt(ScreenError::PermissionDenied),
            AuthorizationState::Restricted => {
                PermissionAction::Prompt(ScreenError::PermissionRestricted)
            }
            AuthorizationState::AuthorizedLimited => TrackingPermit::for_state(state)
                .map(PermissionAction::BeginTracking)
                .unwrap_or(PermissionAction::Satisfied),
            AuthorizationState::AuthorizedFull => PermissionAction::Satisfied,
        }
    }
}

/// How a [`ScreenError`] reaches the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A modal informational prompt.
    Blocking,
    /// Logged, and at most a non-blocking notice.
    Notice,
}

/// Everything that can go wrong on the screen. None of it is fatal; each
/// failure is scoped to one interaction and recovers when the user retries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScreenError {
    #[error("location services are disabled")]
    LocationServicesDisabled,

    #[error("location permission was denied")]
    PermissionDenied,

    #[error("location permission is restricted")]
    PermissionRestricted,

    #[error("current location is unavailable")]
    LocationUnavailable,

    #[error("reverse geocode failed: {0}")]
    GeocodeFailed(String),

    #[error("reverse geocode returned no results")]
    GeocodeEmpty,

    #[error("route calculation failed: {0}")]
    RouteFailed(String),
}

impl ScreenError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::LocationServicesDisabled
            | Self::PermissionDenied
            | Self::PermissionRestricted
            | Self::LocationUnavailable => Severity::Blocking,
            Self::GeocodeFailed(_) | Self::GeocodeEmpty | Self::RouteFailed(_) => Severity::Notice,
        }
    }
}

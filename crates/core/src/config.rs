//! Screen settings, loaded from an optional JSON document supplied by the
//! host. Every field has a default, so `{}` is a valid config.

use palette::{Srgb, WithAlpha};
use serde::Deserialize;

use crate::{map::overlay::OverlayStyle, route::TransportType, ui::Alert};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            title: "Enable Location".to_owned(),
            message: "Location services are required for this app".to_owned(),
            action: "Enable Location".to_owned(),
        }
    }
}

impl From<&AlertConfig> for Alert {
    fn from(config: &AlertConfig) -> Self {
        Alert {
            title: config.title.clone(),
            message: config.message.clone(),
            action: config.action.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// The map centre must move further than this before it is re-geocoded.
    pub geocode_threshold_meters: f64,
    /// Side of the square region shown when centring on the user.
    pub initial_span_meters: f64,
    pub transport: TransportType,
    /// `#rrggbb`.
    pub route_stroke_color: String,
    pub route_line_width: f32,
    pub address_label_corner_radius: f32,
    /// Show a non-blocking notice when geocoding or routing fails.
    pub notify_on_service_errors: bool,
    pub location_alert: AlertConfig,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            geocode_threshold_meters: 50.0,
            initial_span_meters: 10_000.0,
            transport: TransportType::Automobile,
            route_stroke_color: "#0000ff".to_owned(),
            route_line_width: 4.0,
            address_label_corner_radius: 20.0,
            notify_on_service_errors: true,
            location_alert: AlertConfig::default(),
        }
    }
}

impl ScreenConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.geocode_threshold_meters.is_finite() || self.geocode_threshold_meters < 0.0 {
            return Err(ConfigError::Invalid {
                field: "geocode_threshold_meters",
                reason: format!("{} is not a distance", self.geocode_threshold_meters),
            });
        }
        if !self.initial_span_meters.is_finite() || self.initial_span_meters <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "initial_span_meters",
                reason: format!("{} must be positive", self.initial_span_meters),
            });
        }
        if !self.route_line_width.is_finite() || self.route_line_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "route_line_width",
                reason: format!("{} must be positive", self.route_line_width),
            });
        }
        self.route_style().map(|_| ())
    }

    pub fn route_style(&self) -> Result<OverlayStyle, ConfigError> {
        let color: Srgb<u8> = self
            .route_stroke_color
            .parse()
            .map_err(|e| ConfigError::Invalid {
                field: "route_stroke_color",
                reason: format!("{:?}: {e}", self.route_stroke_color),
            })?;

        Ok(OverlayStyle::solid(color.into_format::<f32>().with_alpha(1.0))
            .with_line_width(self.route_line_width))
    }

    pub fn alert(&self) -> Alert {
        Alert::from(&self.location_alert)
    }
}

use std::sync::Arc;

use map_app_core::config::ScreenConfig;
use tokio::sync::RwLock;

use crate::state::view::map::{
    MapState,
    bridge::{DirectionsProvider, Geocoder, LocationProvider},
    records::MapRegion,
};

pub mod map;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MapError {
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Runtime(String),
}

#[derive(uniffi::Object)]
pub struct ViewState {
    config: ScreenConfig,
    map: RwLock<Option<Arc<MapState>>>,
}

#[uniffi::export]
impl ViewState {
    /// `config_json` overrides any subset of the screen settings.
    #[uniffi::constructor]
    pub fn new(config_json: Option<String>) -> Result<Self, MapError> {
        crate::logging::setup_logging();

        let config = match config_json {
            Some(json) => {
                ScreenConfig::from_json(&json).map_err(|e| MapError::Config(e.to_string()))?
            }
            None => ScreenConfig::default(),
        };

        Ok(Self {
            config,
            map: RwLock::new(None),
        })
    }

    /// The screen session, started on first call with the given platform
    /// services and initial viewport. Later calls return the same session.
    pub async fn get_map_state(
        &self,
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
        viewport: MapRegion,
    ) -> Result<Arc<MapState>, MapError> {
        if let Some(ref map) = *(self.map.read().await) {
            return Ok(Arc::clone(map));
        }

        let mut guard = self.map.write().await;
        if let Some(ref map) = *guard {
            return Ok(Arc::clone(map));
        }

        let new_map = Arc::new(MapState::start(
            self.config.clone(),
            location,
            geocoder,
            directions,
            viewport.into(),
        )?);
        *guard = Some(Arc::clone(&new_map));

        Ok(new_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_is_applied() {
        let view = ViewState::new(Some(r#"{ "geocode_threshold_meters": 75 }"#.into())).unwrap();
        assert_eq!(view.config.geocode_threshold_meters, 75.0);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let error = ViewState::new(Some(r#"{ "initial_span_meters": -5 }"#.into()))
            .err()
            .expect("negative span is rejected");
        assert!(matches!(error, MapError::Config(_)));
    }
}

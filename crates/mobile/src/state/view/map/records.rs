//! Plain data crossing the FFI boundary, and its conversions to core types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use geo::{LineString, Point, Rect, coord};
use map_app_core::{
    address::Placemark,
    location::UserLocation,
    map::{Region, overlay::RouteOverlay},
    permission::AuthorizationState,
    route::{Route, RouteRequest, TransportType},
    ui::{Alert, UiCommand},
};

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self {
            latitude: point.y(),
            longitude: point.x(),
        }
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl From<Region> for MapRegion {
    fn from(region: Region) -> Self {
        Self {
            center: region.center.into(),
            latitude_delta: region.latitude_delta,
            longitude_delta: region.longitude_delta,
        }
    }
}

impl From<MapRegion> for Region {
    fn from(region: MapRegion) -> Self {
        Region::new(
            region.center.into(),
            region.latitude_delta,
            region.longitude_delta,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct MapRect {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl From<Rect> for MapRect {
    fn from(rect: Rect) -> Self {
        Self {
            south_west: Point::from(rect.min()).into(),
            north_east: Point::from(rect.max()).into(),
        }
    }
}

impl From<MapRect> for Rect {
    fn from(rect: MapRect) -> Self {
        Rect::new(
            coord! { x: rect.south_west.longitude, y: rect.south_west.latitude },
            coord! { x: rect.north_east.longitude, y: rect.north_east.latitude },
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub horizontal_accuracy: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl From<LocationFix> for UserLocation {
    fn from(fix: LocationFix) -> Self {
        let timestamp =
            DateTime::<Utc>::from_timestamp_millis(fix.timestamp_ms).unwrap_or_else(|| {
                tracing::warn!("unrepresentable fix timestamp {}", fix.timestamp_ms);
                Utc::now()
            });

        UserLocation::new(fix.coordinate.into(), fix.horizontal_accuracy, timestamp)
    }
}

impl From<UserLocation> for LocationFix {
    fn from(location: UserLocation) -> Self {
        Self {
            coordinate: location.position.into(),
            horizontal_accuracy: location.horizontal_accuracy,
            timestamp_ms: location.timestamp.timestamp_millis(),
        }
    }
}

/// Mirrors the platform's authorisation levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl From<AuthorizationStatus> for AuthorizationState {
    fn from(status: AuthorizationStatus) -> Self {
        match status {
            AuthorizationStatus::NotDetermined => AuthorizationState::Undetermined,
            AuthorizationStatus::Denied => AuthorizationState::Denied,
            AuthorizationStatus::Restricted => AuthorizationState::Restricted,
            AuthorizationStatus::AuthorizedWhenInUse => AuthorizationState::AuthorizedLimited,
            AuthorizationStatus::AuthorizedAlways => AuthorizationState::AuthorizedFull,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, uniffi::Record)]
pub struct PlacemarkRecord {
    pub name: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl From<PlacemarkRecord> for Placemark {
    fn from(record: PlacemarkRecord) -> Self {
        Placemark {
            name: record.name,
            sub_thoroughfare: record.sub_thoroughfare,
            thoroughfare: record.thoroughfare,
            locality: record.locality,
            administrative_area: record.administrative_area,
            postal_code: record.postal_code,
            country: record.country,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum TransportMode {
    Automobile,
    Walking,
    Transit,
    Any,
}

impl From<TransportType> for TransportMode {
    fn from(transport: TransportType) -> Self {
        match transport {
            TransportType::Automobile => TransportMode::Automobile,
            TransportType::Walking => TransportMode::Walking,
            TransportType::Transit => TransportMode::Transit,
            TransportType::Any => TransportMode::Any,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct RouteQuery {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub transport: TransportMode,
}

impl From<&RouteRequest> for RouteQuery {
    fn from(request: &RouteRequest) -> Self {
        Self {
            origin: request.origin.into(),
            destination: request.destination.into(),
            transport: request.transport.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct RouteCandidate {
    pub name: Option<String>,
    pub polyline: Vec<Coordinate>,
    pub distance_meters: f64,
    pub expected_travel_time_seconds: f64,
}

impl From<RouteCandidate> for Route {
    fn from(candidate: RouteCandidate) -> Self {
        let polyline: LineString = candidate
            .polyline
            .into_iter()
            .map(|coordinate| coord! { x: coordinate.longitude, y: coordinate.latitude })
            .collect();
        let travel_time =
            Duration::try_from_secs_f64(candidate.expected_travel_time_seconds).unwrap_or_default();

        Route {
            name: candidate.name,
            polyline,
            distance_meters: candidate.distance_meters,
            expected_travel_time: travel_time,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct AlertRecord {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl From<Alert> for AlertRecord {
    fn from(alert: Alert) -> Self {
        Self {
            title: alert.title,
            message: alert.message,
            action: alert.action,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct RouteOverlayRecord {
    pub polyline: Vec<Coordinate>,
    /// `#rrggbb`.
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub line_width: f32,
    /// The same overlay as a GeoJSON `Feature`, for GeoJSON map sources.
    pub geojson: String,
}

impl From<RouteOverlay> for RouteOverlayRecord {
    fn from(overlay: RouteOverlay) -> Self {
        let geojson = serde_json::to_string(&overlay.to_geojson_feature()).unwrap_or_else(|e| {
            tracing::warn!("failed to encode route overlay as geojson: {e}");
            String::new()
        });

        Self {
            polyline: overlay.polyline.points().map(Coordinate::from).collect(),
            stroke_color: overlay.style.stroke_hex(),
            stroke_opacity: overlay.style.stroke_color.alpha,
            line_width: overlay.style.line_width,
            geojson,
        }
    }
}

/// One mutation for the host to apply on its main thread.
#[derive(Clone, Debug, PartialEq, uniffi::Enum)]
pub enum UiUpdate {
    ShowUserLocation { visible: bool },
    SetRegion { region: MapRegion, animated: bool },
    SetVisibleRect { rect: MapRect, animated: bool },
    RemoveAllOverlays,
    AddOverlay { overlay: RouteOverlayRecord },
    SetAddress { text: String },
    Alert { alert: AlertRecord },
    Notice { message: String },
}

impl From<UiCommand> for UiUpdate {
    fn from(command: UiCommand) -> Self {
        match command {
            UiCommand::ShowUserLocation(visible) => UiUpdate::ShowUserLocation { visible },
            UiCommand::SetRegion { region, animated } => UiUpdate::SetRegion {
                region: region.into(),
                animated,
            },
            UiCommand::SetVisibleRect { rect, animated } => UiUpdate::SetVisibleRect {
                rect: rect.into(),
                animated,
            },
            UiCommand::RemoveAllOverlays => UiUpdate::RemoveAllOverlays,
            UiCommand::AddOverlay(overlay) => UiUpdate::AddOverlay {
                overlay: overlay.into(),
            },
            UiCommand::SetAddress(text) => UiUpdate::SetAddress { text },
            UiCommand::Alert(alert) => UiUpdate::Alert {
                alert: alert.into(),
            },
            UiCommand::Notice(message) => UiUpdate::Notice { message },
        }
    }
}

/// Static presentation settings the host applies once.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct ScreenSettings {
    pub geocode_threshold_meters: f64,
    pub initial_span_meters: f64,
    pub address_label_corner_radius: f32,
    pub route_stroke_color: String,
    pub route_line_width: f32,
    pub transport: TransportMode,
}

#[cfg(test)]
mod tests {
    use map_app_core::map::overlay::OverlayStyle;

    use super::*;

    #[test]
    fn test_coordinates_swap_axes() {
        let coordinate = Coordinate {
            latitude: 51.5238,
            longitude: -0.1585,
        };
        let point = Point::from(coordinate);

        assert_eq!(point.x(), -0.1585);
        assert_eq!(point.y(), 51.5238);
        assert_eq!(Coordinate::from(point), coordinate);
    }

    #[test]
    fn test_authorization_mapping() {
        assert_eq!(
            AuthorizationState::from(AuthorizationStatus::AuthorizedWhenInUse),
            AuthorizationState::AuthorizedLimited
        );
        assert_eq!(
            AuthorizationState::from(AuthorizationStatus::AuthorizedAlways),
            AuthorizationState::AuthorizedFull
        );
        assert_eq!(
            AuthorizationState::from(AuthorizationStatus::NotDetermined),
            AuthorizationState::Undetermined
        );
    }

    #[test]
    fn test_route_candidate_conversion() {
        let route = Route::from(RouteCandidate {
            name: Some("A501".into()),
            polyline: vec![
                Coordinate {
                    latitude: 51.5238,
                    longitude: -0.1585,
                },
                Coordinate {
                    latitude: 51.5072,
                    longitude: -0.1276,
                },
            ],
            distance_meters: 2_900.0,
            expected_travel_time_seconds: -4.0,
        });

        assert_eq!(route.polyline.0.len(), 2);
        assert_eq!(route.polyline.0[1].x, -0.1276);
        assert_eq!(route.expected_travel_time, Duration::ZERO);
    }

    #[test]
    fn test_overlay_record_includes_geojson() {
        let overlay = RouteOverlay::new(
            LineString::from(vec![(0.0, 0.0), (0.01, 0.02)]),
            OverlayStyle::default(),
        );
        let record = RouteOverlayRecord::from(overlay);

        assert_eq!(record.stroke_color, "#0000ff");
        assert_eq!(record.polyline.len(), 2);
        assert!(record.geojson.contains("\"LineString\""));
    }

    #[test]
    fn test_location_fix_keeps_timestamp() {
        let fix = LocationFix {
            coordinate: Coordinate {
                latitude: 1.0,
                longitude: 2.0,
            },
            horizontal_accuracy: 8.0,
            timestamp_ms: 1_700_000_000_000,
        };
        let location = UserLocation::from(fix);

        assert_eq!(location.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(LocationFix::from(location), fix);
    }
}

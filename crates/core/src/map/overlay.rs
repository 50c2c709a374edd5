use geo::{BoundingRect, LineString, Rect};
use geojson::{Feature, Geometry, Value};
use palette::Srgb;

/// How a route polyline is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: palette::Srgba<f32>,
    /// Screen-space pixels.
    pub line_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::solid(palette::Srgba::new(0.0, 0.0, 1.0, 1.0))
    }
}

impl OverlayStyle {
    pub fn solid(stroke_color: palette::Srgba<f32>) -> Self {
        Self {
            stroke_color,
            line_width: 4.0,
        }
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// `#rrggbb`, the form map style documents expect.
    pub fn stroke_hex(&self) -> String {
        let rgb: Srgb<u8> = self.stroke_color.color.into_format();
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }
}

/// A route drawn on the map. Replaces whatever route was shown before.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
    pub polyline: LineString,
    pub style: OverlayStyle,
}

impl RouteOverlay {
    pub fn new(polyline: LineString, style: OverlayStyle) -> Self {
        Self { polyline, style }
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.polyline.bounding_rect()
    }

    pub fn to_geojson_feature(&self) -> Feature {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&self.polyline))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("stroke", self.style.stroke_hex());
        feature.set_property("stroke-opacity", self.style.stroke_color.alpha as f64);
        feature.set_property("stroke-width", self.style.line_width as f64);
        feature
    }
}

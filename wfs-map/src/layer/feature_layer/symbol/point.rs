use wfs_map_types::GeoPoint2d;

use crate::layer::feature_layer::symbol::{CircleMarker, VisualStyle};
use crate::Color;

/// Renders point features as circles of fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePointSymbol {
    /// Color of the point and its outline as seen on the map.
    pub color: Color,
    /// Color of the marker circle before the layer style is applied.
    pub marker_fill_color: Color,
    /// Outline color of the marker circle before the layer style is applied.
    pub marker_stroke_color: Color,
    /// Radius of the circle in pixels.
    pub radius: f64,
    /// Width of the outline in pixels.
    pub stroke_width: f64,
    /// Opacity of the circle area.
    pub fill_opacity: f64,
}

impl Default for CirclePointSymbol {
    fn default() -> Self {
        Self {
            color: Color::from_hex("#3388ff"),
            marker_fill_color: Color::from_hex("#ff7800"),
            marker_stroke_color: Color::BLACK,
            radius: 8.0,
            stroke_width: 2.0,
            fill_opacity: 0.8,
        }
    }
}

impl CirclePointSymbol {
    /// Style of a point feature.
    pub fn style(&self) -> VisualStyle {
        VisualStyle {
            stroke_color: self.color,
            stroke_width: self.stroke_width,
            stroke_opacity: 1.0,
            fill_color: self.color,
            fill_opacity: self.fill_opacity,
        }
    }

    /// Marker circle at the given position.
    pub fn marker(&self, center: GeoPoint2d) -> CircleMarker {
        CircleMarker {
            center,
            radius: self.radius,
            style: VisualStyle {
                stroke_color: self.marker_stroke_color,
                stroke_width: self.stroke_width,
                stroke_opacity: 1.0,
                fill_color: self.marker_fill_color,
                fill_opacity: self.fill_opacity,
            },
        }
    }
}

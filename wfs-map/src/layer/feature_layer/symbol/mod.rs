//! Symbols decide how [`Features`](wfs_map_types::Feature) of a [`FeatureLayer`](super::FeatureLayer) look.
//!
//! A symbol does not draw anything. It produces a [`VisualStyle`] for every feature and a [`CircleMarker`] for
//! point features, and the rendering surface turns those into pixels. [`FeatureSymbol`] is the default symbol:
//! fixed markers for points and polygons colored by the provenance of the active dataset.

mod point;
mod polygon;

pub use point::CirclePointSymbol;
pub use polygon::SimplePolygonSymbol;
use serde::Serialize;
use wfs_map_types::{Feature, GeoPoint2d, Geometry};

use crate::control::ActiveLayerState;
use crate::Color;

/// Stroke width of a hovered feature.
pub const HOVER_STROKE_WIDTH: f64 = 4.0;
/// Fill opacity of a hovered feature.
pub const HOVER_FILL_OPACITY: f64 = 0.3;

/// Paint parameters of one feature.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct VisualStyle {
    /// Color of the outline.
    pub stroke_color: Color,
    /// Width of the outline in pixels.
    pub stroke_width: f64,
    /// Opacity of the outline, `0.0..=1.0`.
    pub stroke_opacity: f64,
    /// Color of the inner area.
    pub fill_color: Color,
    /// Opacity of the inner area, `0.0..=1.0`.
    pub fill_opacity: f64,
}

impl VisualStyle {
    /// Style of the same feature while the pointer is over it.
    pub fn highlighted(&self) -> Self {
        Self {
            stroke_width: HOVER_STROKE_WIDTH,
            fill_opacity: HOVER_FILL_OPACITY,
            ..*self
        }
    }
}

/// Circle drawn for a point feature.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    /// Position of the circle center.
    pub center: GeoPoint2d,
    /// Radius in pixels.
    pub radius: f64,
    /// Paint of the circle.
    pub style: VisualStyle,
}

/// Symbol is used to style a feature on the map.
pub trait Symbol {
    /// Base style of the feature when the given dataset is active.
    fn style(&self, feature: &Feature, active_layer: ActiveLayerState) -> VisualStyle;

    /// Creates the marker for a point feature located at `coordinate`.
    fn point_to_layer(&self, feature: &Feature, coordinate: GeoPoint2d) -> CircleMarker;
}

/// Default symbol of the feature layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureSymbol {
    /// Symbol of point features.
    pub point: CirclePointSymbol,
    /// Symbol of polygons when the remote dataset is active.
    pub remote_polygon: SimplePolygonSymbol,
    /// Symbol of polygons when the demo dataset is active.
    pub demo_polygon: SimplePolygonSymbol,
}

impl Default for FeatureSymbol {
    fn default() -> Self {
        Self {
            point: CirclePointSymbol::default(),
            remote_polygon: SimplePolygonSymbol::new(Color::from_hex("#e74c3c")),
            demo_polygon: SimplePolygonSymbol::new(Color::from_hex("#27ae60")),
        }
    }
}

impl Symbol for FeatureSymbol {
    fn style(&self, feature: &Feature, active_layer: ActiveLayerState) -> VisualStyle {
        match (&feature.geometry, active_layer) {
            (Some(Geometry::Point(_)), _) => self.point.style(),
            (_, ActiveLayerState::Remote) => self.remote_polygon.style(),
            (_, ActiveLayerState::Demo) => self.demo_polygon.style(),
        }
    }

    fn point_to_layer(&self, _feature: &Feature, coordinate: GeoPoint2d) -> CircleMarker {
        self.point.marker(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::demo::demo_data;
    use wfs_map_types::{latlon, GeometryKind, PropertyMap};

    #[test]
    fn polygons_follow_active_layer() {
        let symbol = FeatureSymbol::default();
        let data = demo_data();

        for feature in data.iter() {
            let is_polygon =
                feature.geometry.as_ref().map(Geometry::kind) == Some(GeometryKind::Polygon);
            let demo = symbol.style(feature, ActiveLayerState::Demo);
            let remote = symbol.style(feature, ActiveLayerState::Remote);

            if is_polygon {
                assert_eq!(demo.fill_color, Color::from_hex("#27ae60"));
                assert_eq!(remote.fill_color, Color::from_hex("#e74c3c"));
                assert_eq!(demo.stroke_width, remote.stroke_width);
                assert_eq!(demo.fill_opacity, 0.2);
            } else {
                assert_eq!(demo, remote);
                assert_eq!(demo.fill_color, Color::from_hex("#3388ff"));
            }
        }
    }

    #[test]
    fn hover_style() {
        let symbol = FeatureSymbol::default();
        let feature = demo_data().find("moscow").cloned().expect("moscow");
        let base = symbol.style(&feature, ActiveLayerState::Demo);
        let hovered = base.highlighted();

        assert_eq!(hovered.stroke_width, 4.0);
        assert_eq!(hovered.fill_opacity, 0.3);
        assert_eq!(hovered.fill_color, base.fill_color);
    }

    #[test]
    fn point_marker() {
        let symbol = FeatureSymbol::default();
        let feature = Feature::new("p", latlon!(1.0, 2.0), PropertyMap::new());
        let marker = symbol.point_to_layer(&feature, latlon!(1.0, 2.0));

        assert_eq!(marker.center, latlon!(1.0, 2.0));
        assert_eq!(marker.radius, 8.0);
        assert_eq!(marker.style.fill_color, Color::from_hex("#ff7800"));
        assert_eq!(marker.style.stroke_color, Color::BLACK);
    }
}

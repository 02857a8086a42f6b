//! [`FeatureLayer`] is what the rendering surface draws on every redraw.

use std::sync::Arc;

use wfs_map_types::{Feature, FeatureCollection, GeoPoint2d, Geometry};

use crate::control::ActiveLayerState;

mod feature_store;
pub mod symbol;

pub use feature_store::FeatureStore;
use symbol::{CircleMarker, FeatureSymbol, Symbol, VisualStyle};

/// Features of the active dataset together with the way they are to be displayed.
///
/// The layer is a cheap view: the collection is shared with the state it was created from.
#[derive(Debug, Clone)]
pub struct FeatureLayer<S = FeatureSymbol> {
    collection: Option<Arc<FeatureCollection>>,
    active_layer: ActiveLayerState,
    symbol: S,
    hovered: Option<String>,
}

/// One feature as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem<'a> {
    /// The feature.
    pub feature: &'a Feature,
    /// Resolved style, with hover already applied.
    pub style: VisualStyle,
    /// Marker to draw instead of the geometry, for point features.
    pub marker: Option<CircleMarker>,
}

impl FeatureLayer<FeatureSymbol> {
    /// Creates a layer with the default symbol.
    pub fn new(collection: Option<Arc<FeatureCollection>>, active_layer: ActiveLayerState) -> Self {
        Self::with_symbol(collection, active_layer, FeatureSymbol::default())
    }
}

impl<S: Symbol> FeatureLayer<S> {
    /// Creates a layer with a custom symbol.
    pub fn with_symbol(
        collection: Option<Arc<FeatureCollection>>,
        active_layer: ActiveLayerState,
        symbol: S,
    ) -> Self {
        Self {
            collection,
            active_layer,
            symbol,
            hovered: None,
        }
    }

    /// Marks the feature with the given id as being under the pointer. `None` clears the hover.
    pub fn set_hovered(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    /// Id of the hovered feature.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Dataset the layer shows.
    pub fn active_layer(&self) -> ActiveLayerState {
        self.active_layer
    }

    /// Symbol of the layer.
    pub fn symbol(&self) -> &S {
        &self.symbol
    }

    /// Iterates over the features of the layer.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.collection.iter().flat_map(|c| c.iter())
    }

    /// Style the feature is displayed with at the moment.
    pub fn style(&self, feature: &Feature) -> VisualStyle {
        let base = self.symbol.style(feature, self.active_layer);
        if self.hovered.as_deref() == Some(feature.id.as_str()) {
            base.highlighted()
        } else {
            base
        }
    }

    /// Marker of a point feature. `None` for other geometries.
    pub fn point_to_layer(&self, feature: &Feature) -> Option<CircleMarker> {
        match &feature.geometry {
            Some(Geometry::Point(point)) => Some(self.symbol.point_to_layer(feature, *point)),
            _ => None,
        }
    }

    /// Everything the rendering surface needs to draw the layer. Features without geometry are skipped.
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        self.features()
            .filter(|feature| feature.geometry.is_some())
            .map(|feature| RenderItem {
                feature,
                style: self.style(feature),
                marker: self.point_to_layer(feature),
            })
            .collect()
    }

    /// Returns features whose geometry contains the point or lies within `tolerance` degrees of it. The topmost
    /// (last drawn) feature comes first.
    pub fn features_at(&self, point: &GeoPoint2d, tolerance: f64) -> Vec<&Feature> {
        let mut found: Vec<&Feature> = self
            .features()
            .filter(|feature| {
                feature
                    .geometry
                    .as_ref()
                    .is_some_and(|geometry| geometry.is_point_inside(point, tolerance))
            })
            .collect();
        found.reverse();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::demo::shared_demo_data;
    use crate::Color;
    use wfs_map_types::latlon;

    fn demo_layer() -> FeatureLayer {
        FeatureLayer::new(Some(shared_demo_data()), ActiveLayerState::Demo)
    }

    #[test]
    fn render_items_cover_all_features() {
        let layer = demo_layer();
        let items = layer.render_items();

        assert_eq!(items.len(), 8);
        assert_eq!(items.iter().filter(|item| item.marker.is_some()).count(), 4);
        assert_eq!(items[0].feature.id, "moscow");
        assert_eq!(items[0].style.fill_color, Color::from_hex("#27ae60"));
    }

    #[test]
    fn hover_and_unhover() {
        let mut layer = demo_layer();
        let moscow = shared_demo_data().find("moscow").cloned().expect("moscow");
        let base = layer.style(&moscow);

        layer.set_hovered(Some("moscow".into()));
        let hovered = layer.style(&moscow);
        assert_eq!(hovered.stroke_width, 4.0);
        assert_eq!(hovered.fill_opacity, 0.3);

        layer.set_hovered(None);
        assert_eq!(layer.style(&moscow), base);
    }

    #[test]
    fn features_at() {
        let layer = demo_layer();

        let found = layer.features_at(&latlon!(55.75, 37.6), 0.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "moscow");

        let found = layer.features_at(&latlon!(55.8, 49.1), 0.01);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "kazan");

        assert!(layer.features_at(&latlon!(0.0, 0.0), 0.1).is_empty());
    }

    #[test]
    fn empty_layer() {
        let layer = FeatureLayer::new(None, ActiveLayerState::Remote);
        assert!(layer.render_items().is_empty());
        assert!(layer.features_at(&latlon!(55.75, 37.6), 1.0).is_empty());
    }
}

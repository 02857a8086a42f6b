//! Base tile layers under the feature layer and the initial map view.
//!
//! Tiles are neither fetched nor drawn here. The module only describes the layers so that the rendering surface
//! can request the right tiles and show the right credits.

use serde::{Deserialize, Serialize};
use wfs_map_types::{latlon, GeoPoint2d};

use crate::layer::attribution::Attribution;

/// Center of the map when it is first shown.
pub const INITIAL_CENTER: GeoPoint2d = latlon!(55.7558, 37.6173);
/// Zoom level of the map when it is first shown.
pub const INITIAL_ZOOM: u32 = 5;

const OSM_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Tile index.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(x: i32, y: i32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Base layers the user can switch between.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseLayer {
    /// OpenStreetMap standard tiles.
    #[default]
    OpenStreetMap,
    /// Esri World Imagery.
    Satellite,
}

impl BaseLayer {
    /// All base layers in the order they are listed in the layer switcher.
    pub const ALL: [BaseLayer; 2] = [BaseLayer::OpenStreetMap, BaseLayer::Satellite];

    /// Name shown in the layer switcher.
    pub fn name(&self) -> &'static str {
        match self {
            BaseLayer::OpenStreetMap => "OpenStreetMap",
            BaseLayer::Satellite => "Satellite",
        }
    }

    /// Url template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub fn url_template(&self) -> &'static str {
        match self {
            BaseLayer::OpenStreetMap => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            BaseLayer::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    /// Credits to show while the layer is active.
    pub fn attribution(&self) -> Attribution {
        match self {
            BaseLayer::OpenStreetMap => Attribution::new(
                "© OpenStreetMap contributors",
                Some("https://www.openstreetmap.org/copyright".to_string()),
            ),
            BaseLayer::Satellite => {
                Attribution::new("Tiles © Esri", Some("https://www.esri.com".to_string()))
            }
        }
    }

    /// Url of the tile with the given index.
    pub fn tile_url(&self, index: TileIndex) -> String {
        let subdomain = OSM_SUBDOMAINS[(index.x + index.y).rem_euclid(3) as usize];
        self.url_template()
            .replace("{s}", subdomain)
            .replace("{z}", &index.z.to_string())
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
    }
}

/// Currently active base layer. Exactly one base layer is active at a time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseLayerSelection {
    active: BaseLayer,
}

impl BaseLayerSelection {
    /// Active base layer.
    pub fn active(&self) -> BaseLayer {
        self.active
    }

    /// Makes `layer` the active base layer. Returns true if the selection changed.
    pub fn select(&mut self, layer: BaseLayer) -> bool {
        let changed = self.active != layer;
        self.active = layer;
        changed
    }
}

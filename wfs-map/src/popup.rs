//! Content of the popup and the detail panel of a selected feature.
//!
//! Only data is produced here: ordered `(key, value)` pairs, the title and the number of attributes that did not fit.
//! Turning it into markup is up to the UI.

use serde::Serialize;
use wfs_map_types::{latlon, Feature, GeoPoint2d};

/// Value shown for an attribute without a value.
pub const MISSING_VALUE: &str = "N/A";
/// Number of attributes in the popup attached to the feature on the map.
pub const COMPACT_POPUP_ENTRIES: usize = 4;
/// Number of attributes in the detail panel.
pub const DETAIL_PANEL_ENTRIES: usize = 5;
/// Popup position for features without geometry.
pub const DEFAULT_ANCHOR: GeoPoint2d = latlon!(55.7558, 37.6173);

const HIDDEN_KEYS: [&str; 2] = ["geometry", "bbox"];

/// One displayed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeEntry {
    /// Attribute name.
    pub key: String,
    /// Display form of the value, [`MISSING_VALUE`] for null.
    pub value: String,
}

/// Attributes of a feature prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeTable {
    /// Title of the feature.
    pub title: String,
    /// Displayed attributes in their original order.
    pub entries: Vec<AttributeEntry>,
    /// Number of attributes that were not included.
    pub remaining: usize,
    /// Geometry kind label, `None` if not requested or the feature has no geometry.
    pub geometry_kind: Option<&'static str>,
}

impl AttributeTable {
    /// Text telling how many attributes are not shown, e.g. `"+3 more"`.
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more", self.remaining))
    }

    /// Returns true if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Popup of the selected feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    /// Position on the map the popup is attached to.
    pub anchor: GeoPoint2d,
    /// Content of the popup.
    pub content: AttributeTable,
}

impl Popup {
    /// Compact popup for the feature.
    pub fn for_feature(feature: &Feature) -> Self {
        Self {
            anchor: popup_anchor(feature),
            content: compact_popup(feature),
        }
    }
}

/// Content of the popup shown on the map: the first [`COMPACT_POPUP_ENTRIES`] attributes.
pub fn compact_popup(feature: &Feature) -> AttributeTable {
    truncated(feature, COMPACT_POPUP_ENTRIES)
}

/// Content of the side detail panel: the first [`DETAIL_PANEL_ENTRIES`] attributes and the geometry kind.
pub fn detail_panel(feature: &Feature) -> AttributeTable {
    AttributeTable {
        geometry_kind: feature.geometry.as_ref().map(|g| g.kind().as_str()),
        ..truncated(feature, DETAIL_PANEL_ENTRIES)
    }
}

/// All attributes of the feature except the `geometry` and `bbox` keys.
pub fn full_attributes(feature: &Feature) -> AttributeTable {
    AttributeTable {
        title: feature.title(),
        entries: entries(feature)
            .filter(|entry| !HIDDEN_KEYS.contains(&entry.key.as_str()))
            .collect(),
        remaining: 0,
        geometry_kind: None,
    }
}

/// Position the popup of the feature is attached to: the point itself, the first position of a polygon, or
/// [`DEFAULT_ANCHOR`] if the feature has no geometry.
pub fn popup_anchor(feature: &Feature) -> GeoPoint2d {
    feature
        .geometry
        .as_ref()
        .map_or(DEFAULT_ANCHOR, |geometry| geometry.anchor())
}

fn truncated(feature: &Feature, limit: usize) -> AttributeTable {
    let total = feature.properties.len();
    AttributeTable {
        title: feature.title(),
        entries: entries(feature).take(limit).collect(),
        remaining: total.saturating_sub(limit),
        geometry_kind: None,
    }
}

fn entries(feature: &Feature) -> impl Iterator<Item = AttributeEntry> + '_ {
    feature.properties.iter().map(|(key, value)| AttributeEntry {
        key: key.to_owned(),
        value: value
            .display_value()
            .unwrap_or_else(|| MISSING_VALUE.to_owned()),
    })
}

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::property::PropertyMap;

/// Title used for features without a `name` attribute.
pub const DEFAULT_TITLE: &str = "Object";

/// Where a feature collection came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Provenance {
    /// Loaded from a WFS server.
    Remote,
    /// Bundled demo dataset.
    Demo,
}

/// A geographic object with attributes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    /// Identifier of the feature, unique within its collection.
    pub id: String,
    /// Geometry of the feature. GeoJSON allows features without geometry.
    pub geometry: Option<Geometry>,
    /// Attributes of the feature.
    pub properties: PropertyMap,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(
        id: impl Into<String>,
        geometry: impl Into<Geometry>,
        properties: PropertyMap,
    ) -> Self {
        Self {
            id: id.into(),
            geometry: Some(geometry.into()),
            properties,
        }
    }

    /// Title to show for the feature: its `name` attribute or [`DEFAULT_TITLE`] if the name is missing or blank.
    pub fn title(&self) -> String {
        self.properties
            .name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned())
    }
}

/// Ordered set of features with the information where they came from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    provenance: Provenance,
}

impl FeatureCollection {
    /// Creates a new collection.
    pub fn new(features: Vec<Feature>, provenance: Provenance) -> Self {
        Self {
            features,
            provenance,
        }
    }

    /// Source of the features.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if there are no features in the collection.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over the features in order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Returns a feature by its position in the collection.
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Returns a feature with the given id.
    pub fn find(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Features of the collection.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;

    #[test]
    fn title_falls_back_to_default() {
        let named = Feature::new(
            "a",
            latlon!(1.0, 2.0),
            [("name", "Kazan")].into_iter().collect(),
        );
        let unnamed = Feature::new("b", latlon!(1.0, 2.0), PropertyMap::new());

        assert_eq!(named.title(), "Kazan");
        assert_eq!(unnamed.title(), DEFAULT_TITLE);
    }

    #[test]
    fn blank_name_uses_default_title() {
        for name in ["", "   ", "\t\n"] {
            let feature = Feature::new(
                "a",
                latlon!(1.0, 2.0),
                [("name", name)].into_iter().collect(),
            );
            assert_eq!(feature.title(), DEFAULT_TITLE, "name {name:?}");
        }

        let padded = Feature::new(
            "b",
            latlon!(1.0, 2.0),
            [("name", " Kazan ")].into_iter().collect(),
        );
        assert_eq!(padded.title(), " Kazan ");
    }

    #[test]
    fn find_by_id() {
        let collection = FeatureCollection::new(
            vec![
                Feature::new("a", latlon!(1.0, 2.0), PropertyMap::new()),
                Feature::new("b", latlon!(3.0, 4.0), PropertyMap::new()),
            ],
            Provenance::Remote,
        );

        assert_eq!(collection.find("b").map(|f| &f.id), Some(&"b".to_string()));
        assert!(collection.find("c").is_none());
        assert_eq!(collection.provenance(), Provenance::Remote);
    }
}

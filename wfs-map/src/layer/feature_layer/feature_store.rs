use std::sync::Arc;

use wfs_map_types::{Feature, FeatureCollection, Provenance};

/// Feature storage of a [FeatureLayer](super::FeatureLayer).
///
/// The store holds at most one dataset. Replacing the dataset increments the revision, so observers can tell a
/// reload of the same data apart from no change at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureStore {
    collection: Option<Arc<FeatureCollection>>,
    revision: u64,
}

impl FeatureStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the store with the dataset replaced by `collection`.
    pub fn replaced(&self, collection: Arc<FeatureCollection>) -> Self {
        Self {
            collection: Some(collection),
            revision: self.revision + 1,
        }
    }

    /// Current dataset, if any was loaded.
    pub fn collection(&self) -> Option<&Arc<FeatureCollection>> {
        self.collection.as_ref()
    }

    /// Number of times the dataset was replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of features in the current dataset.
    pub fn len(&self) -> usize {
        self.collection.as_ref().map_or(0, |c| c.len())
    }

    /// Returns true if there are no features to display.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Where the current dataset came from.
    pub fn provenance(&self) -> Option<Provenance> {
        self.collection.as_ref().map(|c| c.provenance())
    }

    /// Finds a feature of the current dataset by id.
    pub fn find(&self, id: &str) -> Option<&Feature> {
        self.collection.as_ref().and_then(|c| c.find(id))
    }

    /// Iterates over the features of the current dataset.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.collection.iter().flat_map(|c| c.iter())
    }
}

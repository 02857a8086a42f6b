//! Layers specify a data source and the way the data should be displayed on the map.
//!
//! * [`base`] - base tile layers under the features.
//! * [`FeatureLayer`] - features of the active dataset with their styles.
//! * [`data_provider`] - loading of the remote dataset, and [`demo`] - the bundled one.

pub mod attribution;
pub mod base;
pub mod data_provider;
pub mod demo;
pub mod feature_layer;

pub use base::{BaseLayer, BaseLayerSelection};
pub use feature_layer::{FeatureLayer, FeatureStore};

//! Data model of the WFS feature map: geographic points, point and polygon geometries, features with ordered
//! attributes, and feature collections that remember where they came from.
//!
//! The [`geojson`] module converts server responses into these types.

pub mod contour;
pub mod error;
mod feature;
mod geometry;
pub mod geometry_type;
pub mod geojson;
mod point;
mod polygon;
pub mod property;

pub use contour::Ring;
pub use feature::{Feature, FeatureCollection, Provenance, DEFAULT_TITLE};
pub use geometry::Geometry;
pub use geometry_type::GeometryKind;
pub use point::GeoPoint2d;
pub use polygon::Polygon;
pub use property::{PropertyMap, PropertyValue};

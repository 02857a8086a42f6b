//! Conversion of GeoJSON data into [`FeatureCollection`]s.
//!
//! WFS servers are not always strict about the GeoJSON they produce, so the parser is lenient where it can be
//! without losing data:
//! * the top level object only needs a `features` array, the `type` member is not checked;
//! * features with geometry kinds other than `Point` and `Polygon`, or with invalid coordinates, are skipped;
//! * features with `null` geometry are kept without geometry;
//! * missing ids are generated from the feature position, duplicate ids get a `#n` suffix.
//!
//! Anything that cannot be read as a collection of feature objects is reported as [`TypesError::Malformed`].

use std::collections::HashSet;

use ::geojson::{PolygonType, Position, Value};
use serde::Deserialize;

use crate::contour::Ring;
use crate::error::TypesError;
use crate::feature::{Feature, FeatureCollection, Provenance};
use crate::geometry::Geometry;
use crate::point::GeoPoint2d;
use crate::polygon::Polygon;
use crate::property::PropertyMap;

#[derive(Debug, Deserialize)]
struct WireCollection {
    features: Vec<WireFeature>,
}

#[derive(Debug, Deserialize)]
struct WireFeature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Parses a GeoJSON feature collection from raw bytes. See module documentation for details.
pub fn parse_feature_collection(
    bytes: &[u8],
    provenance: Provenance,
) -> Result<FeatureCollection, TypesError> {
    let wire: WireCollection = serde_json::from_slice(bytes)?;
    let total = wire.features.len();

    let mut ids = HashSet::with_capacity(total);
    let mut features = Vec::with_capacity(total);
    for (index, wire_feature) in wire.features.into_iter().enumerate() {
        let id = unique_id(feature_id(wire_feature.id, index), &mut ids);

        let geometry = match wire_feature.geometry {
            None => None,
            Some(value) => match convert_geometry_value(value) {
                Ok(geometry) => Some(geometry),
                Err(err) => {
                    log::warn!("Skipping feature {id}: {err}");
                    continue;
                }
            },
        };

        let properties = wire_feature
            .properties
            .unwrap_or_default()
            .into_iter()
            .collect::<PropertyMap>();

        features.push(Feature {
            id,
            geometry,
            properties,
        });
    }

    if features.len() < total {
        log::debug!(
            "{} of {total} features were skipped during GeoJSON conversion",
            total - features.len()
        );
    }

    Ok(FeatureCollection::new(features, provenance))
}

fn feature_id(id: Option<serde_json::Value>, index: usize) -> String {
    match id {
        Some(serde_json::Value::String(id)) => id,
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => format!("feature-{index}"),
    }
}

fn unique_id(id: String, ids: &mut HashSet<String>) -> String {
    if ids.insert(id.clone()) {
        return id;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{id}#{n}");
        if ids.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn convert_geometry_value(value: serde_json::Value) -> Result<Geometry, TypesError> {
    let geometry: ::geojson::Geometry = serde_json::from_value(value)
        .map_err(|err| TypesError::Conversion(format!("invalid geometry: {err}")))?;
    Geometry::try_from(&geometry)
}

impl TryFrom<&::geojson::Geometry> for Geometry {
    type Error = TypesError;

    fn try_from(value: &::geojson::Geometry) -> Result<Self, Self::Error> {
        match &value.value {
            Value::Point(p) => Ok(Geometry::Point(convert_point(p)?)),
            Value::Polygon(polygon) => Ok(Geometry::Polygon(convert_polygon(polygon)?)),
            other => Err(TypesError::Conversion(format!(
                "unsupported geometry type: {}",
                type_name(other)
            ))),
        }
    }
}

fn convert_point(position: &Position) -> Result<GeoPoint2d, TypesError> {
    GeoPoint2d::from_position(position)
        .ok_or_else(|| TypesError::Conversion(format!("invalid position: {position:?}")))
}

fn convert_ring(positions: &[Position]) -> Result<Ring, TypesError> {
    Ring::new(
        positions
            .iter()
            .map(convert_point)
            .collect::<Result<Vec<_>, _>>()?,
    )
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon, TypesError> {
    let Some((outer, inner)) = polygon.split_first() else {
        return Err(TypesError::Conversion("polygon has no rings".into()));
    };

    Ok(Polygon::new(
        convert_ring(outer)?,
        inner
            .iter()
            .map(|ring| convert_ring(ring))
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

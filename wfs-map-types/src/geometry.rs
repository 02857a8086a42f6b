use serde::{Deserialize, Serialize};

use crate::geometry_type::GeometryKind;
use crate::point::GeoPoint2d;
use crate::polygon::Polygon;

/// Geometry of a feature.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geometry {
    /// Single point.
    Point(GeoPoint2d),
    /// Polygon.
    Polygon(Polygon),
}

impl Geometry {
    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Point a popup for this geometry should be attached to.
    ///
    /// For a point it is the point itself, for a polygon the first position of its outer ring.
    pub fn anchor(&self) -> GeoPoint2d {
        match self {
            Geometry::Point(point) => *point,
            Geometry::Polygon(polygon) => polygon.outer_contour.first(),
        }
    }

    /// Returns true if the `point` hits the geometry with the given `tolerance` (in degrees).
    pub fn is_point_inside(&self, point: &GeoPoint2d, tolerance: f64) -> bool {
        match self {
            Geometry::Point(p) => p.distance_sq(point) <= tolerance * tolerance,
            Geometry::Polygon(polygon) => polygon.is_point_inside(point, tolerance),
        }
    }
}

impl From<GeoPoint2d> for Geometry {
    fn from(value: GeoPoint2d) -> Self {
        Self::Point(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

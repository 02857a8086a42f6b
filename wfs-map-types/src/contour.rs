//! Closed rings of geographic points.
//!
//! Unlike a generic contour, a [`Ring`] follows the GeoJSON `LinearRing` convention: the first and the last
//! positions are the same point. The duplicate is stored, so iterating over [`Ring::points`] yields the closing
//! point at the end.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::point::GeoPoint2d;

/// Minimum number of positions in a closed ring (a triangle plus the closing point).
pub const MIN_RING_POSITIONS: usize = 4;

/// Closed sequence of points. See module level documentation for details.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<GeoPoint2d>", into = "Vec<GeoPoint2d>")]
pub struct Ring {
    points: Vec<GeoPoint2d>,
}

impl Ring {
    /// Creates a new ring.
    ///
    /// Fails if there are fewer than [`MIN_RING_POSITIONS`] points or if the first point is not equal to the last.
    pub fn new(points: Vec<GeoPoint2d>) -> Result<Self, TypesError> {
        if points.len() < MIN_RING_POSITIONS {
            return Err(TypesError::Conversion(format!(
                "ring must have at least {MIN_RING_POSITIONS} positions, got {}",
                points.len()
            )));
        }

        if points.first() != points.last() {
            return Err(TypesError::Conversion(
                "ring is not closed: first and last positions differ".into(),
            ));
        }

        Ok(Self { points })
    }

    /// Points of the ring, including the closing point.
    pub fn points(&self) -> &[GeoPoint2d] {
        &self.points
    }

    /// The first point of the ring.
    pub fn first(&self) -> GeoPoint2d {
        // Construction guarantees the ring is not empty.
        self.points[0]
    }

    /// Iterates over the segments of the ring.
    pub fn iter_segments(&self) -> impl Iterator<Item = (&GeoPoint2d, &GeoPoint2d)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Winding number of the ring around the given point. Non-zero value means the point is inside.
    pub fn winding_number(&self, point: &GeoPoint2d) -> i64 {
        let mut wn = 0i64;
        let x = point.lon();
        let y = point.lat();

        for (from, to) in self.iter_segments() {
            let is_left = (to.lon() - from.lon()) * (y - from.lat())
                - (x - from.lon()) * (to.lat() - from.lat());

            if from.lat() <= y {
                if to.lat() > y && is_left > 0.0 {
                    wn += 1;
                }
            } else if to.lat() <= y && is_left < 0.0 {
                wn -= 1;
            }
        }

        wn
    }

    /// Squared distance from the point to the closest segment of the ring.
    pub fn distance_to_point_sq(&self, point: &GeoPoint2d) -> f64 {
        self.iter_segments()
            .map(|(from, to)| segment_distance_sq(from, to, point))
            .fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<Vec<GeoPoint2d>> for Ring {
    type Error = TypesError;

    fn try_from(value: Vec<GeoPoint2d>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ring> for Vec<GeoPoint2d> {
    fn from(value: Ring) -> Self {
        value.points
    }
}

fn segment_distance_sq(from: &GeoPoint2d, to: &GeoPoint2d, point: &GeoPoint2d) -> f64 {
    let dx = to.lon() - from.lon();
    let dy = to.lat() - from.lat();
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return from.distance_sq(point);
    }

    let t = ((point.lon() - from.lon()) * dx + (point.lat() - from.lat()) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let projected = GeoPoint2d::latlon(from.lat() + t * dy, from.lon() + t * dx);
    projected.distance_sq(point)
}

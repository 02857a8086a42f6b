use serde::{Deserialize, Serialize};

use crate::contour::Ring;
use crate::point::GeoPoint2d;

/// Polygon with one outer ring and optional holes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Polygon {
    /// Outer boundary of the polygon.
    pub outer_contour: Ring,
    /// Holes of the polygon.
    pub inner_contours: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(outer_contour: Ring, inner_contours: Vec<Ring>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Iterates over all rings of the polygon, outer ring first.
    pub fn iter_contours(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }

    /// Returns true if the `point` lies inside the polygon or within `tolerance` of one of its sides.
    pub fn is_point_inside(&self, point: &GeoPoint2d, tolerance: f64) -> bool {
        let in_outer = self.outer_contour.winding_number(point) != 0;
        let in_hole = self
            .inner_contours
            .iter()
            .any(|contour| contour.winding_number(point) != 0);
        if in_outer && !in_hole {
            return true;
        }

        let tolerance_sq = tolerance * tolerance;
        self.iter_contours()
            .any(|contour| contour.distance_to_point_sq(point) <= tolerance_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;

    fn ring(min: f64, max: f64) -> Ring {
        Ring::new(vec![
            latlon!(min, min),
            latlon!(min, max),
            latlon!(max, max),
            latlon!(max, min),
            latlon!(min, min),
        ])
        .expect("valid ring")
    }

    #[test]
    fn contains_point() {
        let polygon = Polygon::new(ring(0.0, 10.0), vec![]);
        assert!(polygon.is_point_inside(&latlon!(5.0, 5.0), 0.0));
        assert!(!polygon.is_point_inside(&latlon!(11.0, 5.0), 0.0));
        assert!(polygon.is_point_inside(&latlon!(10.5, 5.0), 1.0));
    }

    #[test]
    fn hole_is_outside() {
        let mut hole = ring(4.0, 6.0).points().to_vec();
        hole.reverse();
        let polygon = Polygon::new(
            ring(0.0, 10.0),
            vec![Ring::new(hole).expect("valid ring")],
        );

        assert!(!polygon.is_point_inside(&latlon!(5.0, 5.0), 0.0));
        assert!(polygon.is_point_inside(&latlon!(2.0, 2.0), 0.0));
    }
}

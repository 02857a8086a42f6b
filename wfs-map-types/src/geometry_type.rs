//! See documentation for [`GeometryKind`].
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of a [`Geometry`](crate::Geometry). Only points and polygons are supported.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeometryKind {
    /// Single point.
    Point,
    /// Polygon with optional holes.
    Polygon,
}

impl GeometryKind {
    /// Name of the kind as used by GeoJSON `type` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

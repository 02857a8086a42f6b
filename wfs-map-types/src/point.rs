use serde::{Deserialize, Serialize};

/// 2d point on the surface of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a new point from latitude and longitude in degrees.
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a new point from a GeoJSON position, which stores longitude first.
    ///
    /// Returns `None` if the position has less than two coordinates or any of them is not finite. Extra
    /// coordinates (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Self::latlon(*lat, *lon)),
            _ => None,
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Squared distance to the other point in degree space.
    pub fn distance_sq(&self, other: &GeoPoint2d) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        d_lat * d_lat + d_lon * d_lon
    }
}

impl approx::AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use wfs_map_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::GeoPoint2d::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_lon_lat() {
        let point = GeoPoint2d::from_position(&[37.6, 55.7]).expect("valid position");
        assert_eq!(point.lat(), 55.7);
        assert_eq!(point.lon(), 37.6);
    }

    #[test]
    fn position_with_altitude() {
        let point = GeoPoint2d::from_position(&[37.6, 55.7, 120.0]).expect("valid position");
        assert_eq!(point, latlon!(55.7, 37.6));
    }

    #[test]
    fn invalid_positions() {
        assert!(GeoPoint2d::from_position(&[37.6]).is_none());
        assert!(GeoPoint2d::from_position(&[]).is_none());
        assert!(GeoPoint2d::from_position(&[f64::NAN, 1.0]).is_none());
    }
}

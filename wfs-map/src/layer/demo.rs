//! Bundled demo dataset shown when no WFS server is available.
//!
//! The dataset mixes regions (polygons with a `budget` attribute) and cities (points with a `founded` attribute), so
//! features do not share one attribute schema.

use std::sync::{Arc, LazyLock};

use wfs_map_types::contour::Ring;
use wfs_map_types::{
    latlon, Feature, FeatureCollection, GeoPoint2d, Polygon, PropertyMap, Provenance,
};

static DEMO_DATA: LazyLock<Arc<FeatureCollection>> = LazyLock::new(|| Arc::new(demo_data()));

struct Region {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    population: &'static str,
    area: &'static str,
    code: &'static str,
    admin_center: &'static str,
    budget: &'static str,
    // (lon, lat) of the south-west and north-east corners.
    bbox: [(f64, f64); 2],
}

struct City {
    id: &'static str,
    name: &'static str,
    population: &'static str,
    area: &'static str,
    code: &'static str,
    founded: &'static str,
    lon: f64,
    lat: f64,
}

const REGIONS: [Region; 4] = [
    Region {
        id: "moscow",
        name: "Moscow Oblast",
        kind: "Federal subject",
        population: "12500000",
        area: "2561",
        code: "45000000",
        admin_center: "Moscow",
        budget: "3500000",
        bbox: [(37.3, 55.5), (37.9, 56.0)],
    },
    Region {
        id: "spb",
        name: "Saint Petersburg",
        kind: "Federal city",
        population: "5350000",
        area: "1439",
        code: "40000000",
        admin_center: "Saint Petersburg",
        budget: "1200000",
        bbox: [(29.5, 59.8), (30.5, 60.1)],
    },
    Region {
        id: "ryazan",
        name: "Ryazan Oblast",
        kind: "Federal subject",
        population: "1100000",
        area: "39600",
        code: "61000000",
        admin_center: "Ryazan",
        budget: "850000",
        bbox: [(38.5, 53.5), (41.5, 55.5)],
    },
    Region {
        id: "volgograd",
        name: "Volgograd Oblast",
        kind: "Federal subject",
        population: "2500000",
        area: "112877",
        code: "18000000",
        admin_center: "Volgograd",
        budget: "1500000",
        bbox: [(41.5, 47.5), (45.5, 50.5)],
    },
];

const CITIES: [City; 4] = [
    City {
        id: "kazan",
        name: "Kazan",
        population: "1250000",
        area: "425",
        code: "92000000",
        founded: "1005",
        lon: 49.1088,
        lat: 55.7961,
    },
    City {
        id: "nizhny",
        name: "Nizhny Novgorod",
        population: "1250000",
        area: "411",
        code: "22000000",
        founded: "1221",
        lon: 44.002,
        lat: 56.328,
    },
    City {
        id: "ekb",
        name: "Yekaterinburg",
        population: "1500000",
        area: "495",
        code: "65000000",
        founded: "1723",
        lon: 60.6122,
        lat: 56.8389,
    },
    City {
        id: "novosibirsk",
        name: "Novosibirsk",
        population: "1600000",
        area: "505",
        code: "54000000",
        founded: "1893",
        lon: 82.9204,
        lat: 55.0084,
    },
];

/// Returns the demo feature collection.
///
/// The result is always the same: 8 features in a fixed order (Moscow Oblast, Saint Petersburg, Kazan,
/// Nizhny Novgorod, Ryazan Oblast, Volgograd Oblast, Yekaterinburg, Novosibirsk), each with 7 attributes.
pub fn demo_data() -> FeatureCollection {
    let [moscow, spb, ryazan, volgograd] = &REGIONS;
    let [kazan, nizhny, ekb, novosibirsk] = &CITIES;

    let features = vec![
        region_feature(moscow),
        region_feature(spb),
        city_feature(kazan),
        city_feature(nizhny),
        region_feature(ryazan),
        region_feature(volgograd),
        city_feature(ekb),
        city_feature(novosibirsk),
    ];

    FeatureCollection::new(features, Provenance::Demo)
}

/// Shared instance of [`demo_data`], created on first use.
pub fn shared_demo_data() -> Arc<FeatureCollection> {
    DEMO_DATA.clone()
}

fn region_feature(region: &Region) -> Feature {
    let properties: PropertyMap = [
        ("name", region.name),
        ("type", region.kind),
        ("population", region.population),
        ("area", region.area),
        ("code", region.code),
        ("admin_center", region.admin_center),
        ("budget", region.budget),
    ]
    .into_iter()
    .collect();

    Feature::new(region.id, rectangle(region.bbox), properties)
}

fn city_feature(city: &City) -> Feature {
    let properties: PropertyMap = [
        ("name", city.name),
        ("type", "City"),
        ("population", city.population),
        ("area", city.area),
        ("code", city.code),
        ("admin_center", city.name),
        ("founded", city.founded),
    ]
    .into_iter()
    .collect();

    Feature::new(city.id, latlon!(city.lat, city.lon), properties)
}

fn rectangle([(min_lon, min_lat), (max_lon, max_lat)]: [(f64, f64); 2]) -> Polygon {
    let points: Vec<GeoPoint2d> = vec![
        latlon!(min_lat, min_lon),
        latlon!(min_lat, max_lon),
        latlon!(max_lat, max_lon),
        latlon!(max_lat, min_lon),
        latlon!(min_lat, min_lon),
    ];

    match Ring::new(points) {
        Ok(ring) => Polygon::new(ring, vec![]),
        Err(err) => unreachable!("demo rectangle is always a closed ring: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfs_map_types::{Geometry, GeometryKind};

    #[test]
    fn demo_dataset_shape() {
        let data = demo_data();
        assert_eq!(data.len(), 8);
        assert_eq!(data.provenance(), Provenance::Demo);

        let kinds: Vec<_> = data
            .iter()
            .map(|f| f.geometry.as_ref().map(Geometry::kind))
            .collect();
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == Some(GeometryKind::Polygon))
                .count(),
            4
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == Some(GeometryKind::Point))
                .count(),
            4
        );
    }

    #[test]
    fn polygon_rings_are_closed() {
        for feature in demo_data().iter() {
            if let Some(Geometry::Polygon(polygon)) = &feature.geometry {
                for ring in polygon.iter_contours() {
                    assert_eq!(ring.points().first(), ring.points().last());
                }
            }
        }
    }

    #[test]
    fn heterogeneous_attributes() {
        let data = demo_data();
        let moscow = data.find("moscow").expect("moscow");
        let kazan = data.find("kazan").expect("kazan");

        assert!(moscow.properties.get("budget").is_some());
        assert!(moscow.properties.get("founded").is_none());
        assert!(kazan.properties.get("founded").is_some());
        assert!(kazan.properties.get("budget").is_none());
        assert!(data.iter().all(|f| f.properties.len() == 7));
    }

    #[test]
    fn deterministic() {
        assert_eq!(demo_data(), demo_data());
        assert_eq!(*shared_demo_data(), demo_data());
    }
}

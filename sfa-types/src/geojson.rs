//! Conversions between [`Geom`] and [`geojson::Geometry`](::geojson::Geometry).
//!
//! GeoJSON carries no SRID: it is dropped on export and left unset on import.

use ::geojson::{PolygonType, Position as GeoJsonPosition, Value as GeoJsonValue};

use crate::error::SpatialError;
use crate::geometry::Geom;
use crate::geometry_type::{CoordinateSpace, GeometryType};
use crate::line_string::Path;
use crate::number::Number;
use crate::point::Position;

fn position(position: &[Number]) -> GeoJsonPosition {
    position.iter().map(Number::as_f64).collect()
}

fn path(path: &[Position]) -> Vec<GeoJsonPosition> {
    path.iter().map(|p| position(p)).collect()
}

fn rings(rings: &[Path]) -> PolygonType {
    rings.iter().map(|ring| path(ring)).collect()
}

impl<S: CoordinateSpace> From<&Geom<S>> for ::geojson::Geometry {
    fn from(value: &Geom<S>) -> Self {
        let value = match value {
            Geom::Point(v) => GeoJsonValue::Point(position(&v.to_array())),
            Geom::PointZ(v) => GeoJsonValue::Point(position(&v.to_array())),
            Geom::PointZm(v) => GeoJsonValue::Point(position(&v.to_array()[..3])),
            Geom::MultiPoint(v) => GeoJsonValue::MultiPoint(path(v)),
            Geom::LineString(v) => GeoJsonValue::LineString(path(v)),
            Geom::Polygon(v) => GeoJsonValue::Polygon(rings(v)),
            Geom::MultiLineString(v) => GeoJsonValue::MultiLineString(rings(v)),
            Geom::MultiPolygon(v) => {
                GeoJsonValue::MultiPolygon(v.iter().map(|polygon| rings(polygon)).collect())
            }
        };

        ::geojson::Geometry::new(value)
    }
}

impl<S: CoordinateSpace> TryFrom<&::geojson::Geometry> for Geom<S> {
    type Error = SpatialError;

    fn try_from(value: &::geojson::Geometry) -> Result<Self, Self::Error> {
        let (kind, coordinates) = match &value.value {
            GeoJsonValue::Point(p) if p.len() == 3 => (GeometryType::PointZ, serde_json::to_value(p)),
            GeoJsonValue::Point(p) => (GeometryType::Point, serde_json::to_value(p)),
            GeoJsonValue::MultiPoint(v) => (GeometryType::MultiPoint, serde_json::to_value(v)),
            GeoJsonValue::LineString(v) => (GeometryType::LineString, serde_json::to_value(v)),
            GeoJsonValue::Polygon(v) => (GeometryType::Polygon, serde_json::to_value(v)),
            GeoJsonValue::MultiLineString(v) => {
                (GeometryType::MultiLineString, serde_json::to_value(v))
            }
            GeoJsonValue::MultiPolygon(v) => (GeometryType::MultiPolygon, serde_json::to_value(v)),
            GeoJsonValue::GeometryCollection(_) => {
                return Err(SpatialError::invalid(
                    "Cannot create a geometry of type \"GeometryCollection\"",
                ))
            }
        };

        let coordinates =
            coordinates.map_err(|err| SpatialError::invalid(format!("Invalid GeoJSON value: {err}")))?;
        Geom::from_parts(kind, &coordinates, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spatial;
    use crate::geometry_type::{Cartesian, Geodetic};
    use crate::polygon::Polygon;

    #[test]
    fn polygon_round_trip() {
        let polygon: Polygon =
            Polygon::with_srid([[[0.5, 0.0], [1.0, 0.0], [1.0, 1.0], [0.5, 0.0]]], Some(4326)).unwrap();
        let geom = Geom::Polygon(polygon.clone());
        let geojson = ::geojson::Geometry::from(&geom);
        assert_eq!(
            geojson.value,
            GeoJsonValue::Polygon(vec![vec![
                vec![0.5, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.5, 0.0]
            ]])
        );

        let back = Geom::<Cartesian>::try_from(&geojson).unwrap();
        assert_eq!(back.to_string(), polygon.to_string());
        assert_eq!(back.srid(), None);
    }

    #[test]
    fn geojson_input_is_validated() {
        let geometry = ::geojson::Geometry::new(GeoJsonValue::Point(vec![0.0, 100.0]));
        assert!(Geom::<Geodetic>::try_from(&geometry).is_err());
        assert!(Geom::<Cartesian>::try_from(&geometry).is_ok());

        let geometry = ::geojson::Geometry::new(GeoJsonValue::Point(vec![1.0, 2.0, 3.0]));
        assert_eq!(
            Geom::<Cartesian>::try_from(&geometry).unwrap().geometry_type(),
            GeometryType::PointZ
        );
    }
}

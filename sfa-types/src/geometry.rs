use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SpatialError;
use crate::geometry_type::{Cartesian, CoordinateSpace, GeometryType};
use crate::line_string::{LineString, Path};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::number::Number;
use crate::point::{Point, Position};
use crate::point_3d::{from_unix_seconds, Point3d, Point4d};
use crate::polygon::Polygon;
use crate::wkt::{read_wkt, write_ewkt, write_wkt, WktParts};

/// Coordinates of a geometry, without type or SRID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coordinates {
    /// Single position: `[x, y]`, `[x, y, z]` or `[x, y, z, t]`.
    Position(Vec<Number>),
    /// Sequence of positions.
    Path(Vec<Position>),
    /// Sequence of paths.
    Paths(Vec<Path>),
    /// Sequence of polygons.
    Polygons(Vec<Vec<Path>>),
}

impl Coordinates {
    /// Returns false if any value is `NaN` or infinite.
    pub fn is_finite(&self) -> bool {
        fn path_is_finite(path: &[Position]) -> bool {
            path.iter().flatten().all(Number::is_finite)
        }

        match self {
            Coordinates::Position(values) => values.iter().all(Number::is_finite),
            Coordinates::Path(path) => path_is_finite(path),
            Coordinates::Paths(paths) => paths.iter().all(|p| path_is_finite(p)),
            Coordinates::Polygons(polygons) => polygons
                .iter()
                .flatten()
                .all(|p| path_is_finite(p)),
        }
    }

    /// Returns true if there are no positions.
    pub fn is_empty(&self) -> bool {
        match self {
            Coordinates::Position(values) => values.is_empty(),
            Coordinates::Path(path) => path.is_empty(),
            Coordinates::Paths(paths) => paths.is_empty(),
            Coordinates::Polygons(polygons) => polygons.is_empty(),
        }
    }

    /// Returns true if a line or polygon inside a non-empty collection has no positions.
    pub fn has_empty_part(&self) -> bool {
        match self {
            Coordinates::Position(_) | Coordinates::Path(_) => false,
            Coordinates::Paths(paths) => paths.iter().any(Vec::is_empty),
            Coordinates::Polygons(polygons) => polygons
                .iter()
                .any(|rings| rings.is_empty() || rings.iter().any(Vec::is_empty)),
        }
    }
}

/// Structured export of a geometry: `{"type": ..., "coordinates": ..., "srid": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryJson {
    /// Type of the geometry.
    #[serde(rename = "type")]
    pub kind: GeometryType,
    /// Coordinates of the geometry.
    pub coordinates: Coordinates,
    /// Spatial reference identifier.
    pub srid: Option<i32>,
}

/// Common interface of all geometry values.
pub trait Spatial: Display {
    /// Type of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Family of the geometry: [`GeometryType::Geometry`] or [`GeometryType::Geography`].
    fn family(&self) -> GeometryType;

    /// Spatial reference identifier. `None` means unspecified.
    fn srid(&self) -> Option<i32>;

    /// Sets the SRID. Setting `None` keeps the current SRID.
    fn set_srid(&mut self, srid: Option<i32>) -> &mut Self;

    /// Coordinates of the geometry.
    fn coordinates(&self) -> Coordinates;

    /// Structured export of the geometry.
    fn to_json_value(&self) -> Result<GeometryJson, SpatialError> {
        let coordinates = self.coordinates();
        if !coordinates.is_finite() {
            return Err(SpatialError::Serialization(format!(
                "{} has non-finite coordinates",
                self.geometry_type()
            )));
        }

        Ok(GeometryJson {
            kind: self.geometry_type(),
            coordinates,
            srid: self.srid(),
        })
    }

    /// JSON string of the structured export.
    fn to_json(&self) -> Result<String, SpatialError> {
        serde_json::to_string(&self.to_json_value()?)
            .map_err(|err| SpatialError::Serialization(err.to_string()))
    }

    /// Well-known text, e.g. `POINT(1 2)`.
    fn to_wkt(&self) -> Result<String, SpatialError> {
        write_wkt(self)
    }

    /// Extended well-known text, e.g. `SRID=4326;POINT(1 2)`. Same as WKT if there is no SRID.
    fn to_ewkt(&self) -> Result<String, SpatialError> {
        write_ewkt(self)
    }
}

/// Geometry of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Geom<S = Cartesian> {
    /// Point.
    Point(Point<S>),
    /// Point with an elevation.
    PointZ(Point3d<S>),
    /// Point with an elevation and a moment.
    PointZm(Point4d<S>),
    /// Multi point.
    MultiPoint(MultiPoint<S>),
    /// Line string.
    LineString(LineString<S>),
    /// Polygon.
    Polygon(Polygon<S>),
    /// Multi line string.
    MultiLineString(MultiLineString<S>),
    /// Multi polygon.
    MultiPolygon(MultiPolygon<S>),
}

#[derive(Deserialize)]
struct JsonInput {
    #[serde(rename = "type")]
    kind: GeometryType,
    coordinates: Value,
    #[serde(default)]
    srid: Option<i32>,
}

impl<S: CoordinateSpace> Geom<S> {
    /// Reads the structured export back: `{"type": "Point", "coordinates": [1, 2], "srid": 4326}`.
    pub fn from_json(json: &str) -> Result<Self, SpatialError> {
        let input: JsonInput = serde_json::from_str(json)
            .map_err(|err| SpatialError::invalid(format!("Invalid geometry JSON: {err}")))?;
        Self::from_parts(input.kind, &input.coordinates, input.srid)
    }

    /// Reads WKT or EWKT: `POINT(1 2)`, `SRID=4326;LINESTRING(0 0,1 1)`.
    pub fn from_wkt(wkt: &str) -> Result<Self, SpatialError> {
        let WktParts {
            kind,
            coordinates,
            srid,
        } = read_wkt(wkt)?;
        Self::from_parts(kind, &coordinates, srid)
    }

    /// Creates a geometry of the given type from nested coordinate arrays.
    pub fn from_parts(
        kind: GeometryType,
        coordinates: &Value,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        let geom = match kind {
            GeometryType::Point => {
                let [x, y] = scalars::<2>(kind, coordinates)?;
                Geom::Point(Point::from_position([x, y], srid)?)
            }
            GeometryType::PointZ => {
                let [x, y, z] = scalars::<3>(kind, coordinates)?;
                Geom::PointZ(Point3d::with_srid(x, y, z, srid)?)
            }
            GeometryType::PointZm => {
                let [x, y, z, t] = scalars::<4>(kind, coordinates)?;
                let moment = match t {
                    Number::Int(seconds) => from_unix_seconds(seconds),
                    Number::Float(_) => None,
                }
                .ok_or_else(|| {
                    SpatialError::invalid(format!("Invalid {kind} moment value, got \"{t}\"."))
                })?;
                Geom::PointZm(Point4d::with_srid(x, y, z, moment, srid)?)
            }
            GeometryType::MultiPoint => Geom::MultiPoint(MultiPoint::with_srid(coordinates, srid)?),
            GeometryType::LineString => Geom::LineString(LineString::with_srid(coordinates, srid)?),
            GeometryType::Polygon => Geom::Polygon(Polygon::with_srid(coordinates, srid)?),
            GeometryType::MultiLineString => {
                Geom::MultiLineString(MultiLineString::with_srid(coordinates, srid)?)
            }
            GeometryType::MultiPolygon => {
                Geom::MultiPolygon(MultiPolygon::with_srid(coordinates, srid)?)
            }
            GeometryType::Geometry
            | GeometryType::GeometryCollection
            | GeometryType::Geography
            | GeometryType::GeographyCollection => {
                return Err(SpatialError::invalid(format!(
                    "Cannot create a geometry of type \"{kind}\""
                )))
            }
        };

        Ok(geom)
    }
}

/// Exactly `N` numeric values of a single position.
fn scalars<const N: usize>(
    kind: GeometryType,
    coordinates: &Value,
) -> Result<[Number; N], SpatialError> {
    let invalid = || SpatialError::invalid(format!("Invalid {kind} value, got \"{coordinates}\"."));

    let values = coordinates
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| match v {
            Value::Number(n) => n
                .as_i64()
                .map(Number::Int)
                .or_else(|| n.as_f64().map(Number::Float)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    values.try_into().map_err(|_| invalid())
}

impl<S: CoordinateSpace> Spatial for Geom<S> {
    fn geometry_type(&self) -> GeometryType {
        match self {
            Geom::Point(v) => v.geometry_type(),
            Geom::PointZ(v) => v.geometry_type(),
            Geom::PointZm(v) => v.geometry_type(),
            Geom::MultiPoint(v) => v.geometry_type(),
            Geom::LineString(v) => v.geometry_type(),
            Geom::Polygon(v) => v.geometry_type(),
            Geom::MultiLineString(v) => v.geometry_type(),
            Geom::MultiPolygon(v) => v.geometry_type(),
        }
    }

    fn family(&self) -> GeometryType {
        S::FAMILY
    }

    fn srid(&self) -> Option<i32> {
        match self {
            Geom::Point(v) => v.srid(),
            Geom::PointZ(v) => v.srid(),
            Geom::PointZm(v) => v.srid(),
            Geom::MultiPoint(v) => v.srid(),
            Geom::LineString(v) => v.srid(),
            Geom::Polygon(v) => v.srid(),
            Geom::MultiLineString(v) => v.srid(),
            Geom::MultiPolygon(v) => v.srid(),
        }
    }

    fn set_srid(&mut self, srid: Option<i32>) -> &mut Self {
        match self {
            Geom::Point(v) => {
                v.set_srid(srid);
            }
            Geom::PointZ(v) => {
                v.set_srid(srid);
            }
            Geom::PointZm(v) => {
                v.set_srid(srid);
            }
            Geom::MultiPoint(v) => {
                v.set_srid(srid);
            }
            Geom::LineString(v) => {
                v.set_srid(srid);
            }
            Geom::Polygon(v) => {
                v.set_srid(srid);
            }
            Geom::MultiLineString(v) => {
                v.set_srid(srid);
            }
            Geom::MultiPolygon(v) => {
                v.set_srid(srid);
            }
        }
        self
    }

    fn coordinates(&self) -> Coordinates {
        match self {
            Geom::Point(v) => v.coordinates(),
            Geom::PointZ(v) => v.coordinates(),
            Geom::PointZm(v) => v.coordinates(),
            Geom::MultiPoint(v) => v.coordinates(),
            Geom::LineString(v) => v.coordinates(),
            Geom::Polygon(v) => v.coordinates(),
            Geom::MultiLineString(v) => v.coordinates(),
            Geom::MultiPolygon(v) => v.coordinates(),
        }
    }
}

impl<S: CoordinateSpace> Display for Geom<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Geom::Point(v) => v.fmt(f),
            Geom::PointZ(v) => v.fmt(f),
            Geom::PointZm(v) => v.fmt(f),
            Geom::MultiPoint(v) => v.fmt(f),
            Geom::LineString(v) => v.fmt(f),
            Geom::Polygon(v) => v.fmt(f),
            Geom::MultiLineString(v) => v.fmt(f),
            Geom::MultiPolygon(v) => v.fmt(f),
        }
    }
}

impl<S> From<Point<S>> for Geom<S> {
    fn from(value: Point<S>) -> Self {
        Self::Point(value)
    }
}

impl<S> From<Point3d<S>> for Geom<S> {
    fn from(value: Point3d<S>) -> Self {
        Self::PointZ(value)
    }
}

impl<S> From<Point4d<S>> for Geom<S> {
    fn from(value: Point4d<S>) -> Self {
        Self::PointZm(value)
    }
}

impl<S> From<MultiPoint<S>> for Geom<S> {
    fn from(value: MultiPoint<S>) -> Self {
        Self::MultiPoint(value)
    }
}

impl<S> From<LineString<S>> for Geom<S> {
    fn from(value: LineString<S>) -> Self {
        Self::LineString(value)
    }
}

impl<S> From<Polygon<S>> for Geom<S> {
    fn from(value: Polygon<S>) -> Self {
        Self::Polygon(value)
    }
}

impl<S> From<MultiLineString<S>> for Geom<S> {
    fn from(value: MultiLineString<S>) -> Self {
        Self::MultiLineString(value)
    }
}

impl<S> From<MultiPolygon<S>> for Geom<S> {
    fn from(value: MultiPolygon<S>) -> Self {
        Self::MultiPolygon(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::geometry_type::Geodetic;

    #[test]
    fn json_export() {
        let point: Point = Point::with_srid(1, 2.5, Some(4326)).unwrap();
        assert_eq!(
            point.to_json().unwrap(),
            r#"{"type":"Point","coordinates":[1,2.5],"srid":4326}"#
        );

        let line: LineString = LineString::new([[0, 0], [1, 1]]).unwrap();
        let value = serde_json::to_value(line.to_json_value().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]], "srid": null})
        );
    }

    #[test]
    fn non_finite_values_are_not_serialized() {
        let point: Point = Point::new(f64::NAN, 0).unwrap();
        assert_matches!(point.to_json(), Err(SpatialError::Serialization(_)));
        assert_matches!(point.to_wkt(), Err(SpatialError::Serialization(_)));
    }

    #[test]
    fn empty_parts_have_no_wkt() {
        let lines: MultiLineString = MultiLineString::new(vec![Vec::<[i32; 2]>::new()]).unwrap();
        assert_matches!(lines.to_wkt(), Err(SpatialError::Serialization(_)));
        assert_matches!(lines.to_ewkt(), Err(SpatialError::Serialization(_)));
        assert!(lines.to_json().is_ok());

        let polygons: MultiPolygon =
            MultiPolygon::new(vec![Vec::<Vec<[i32; 2]>>::new()]).unwrap();
        assert_matches!(polygons.to_wkt(), Err(SpatialError::Serialization(_)));

        let mut lines: MultiLineString = MultiLineString::new([[[0, 0], [1, 1]]]).unwrap();
        let wkt = lines.to_wkt().unwrap();
        assert_eq!(Geom::<Cartesian>::from_wkt(&wkt).unwrap(), Geom::MultiLineString(lines.clone()));
        lines.add_line_string(Vec::<[i32; 2]>::new()).unwrap();
        assert_matches!(lines.to_wkt(), Err(SpatialError::Serialization(_)));
    }

    #[test]
    fn wkt_export() {
        let polygon: Polygon =
            Polygon::with_srid([[[0, 0], [1, 0], [1, 1], [0, 0]]], Some(4326)).unwrap();
        assert_eq!(polygon.to_wkt().unwrap(), "POLYGON((0 0,1 0,1 1,0 0))");
        assert_eq!(
            polygon.to_ewkt().unwrap(),
            "SRID=4326;POLYGON((0 0,1 0,1 1,0 0))"
        );

        let empty: MultiPoint = MultiPoint::new(Vec::<[i32; 2]>::new()).unwrap();
        assert_eq!(empty.to_ewkt().unwrap(), "MULTIPOINT EMPTY");
    }

    #[test]
    fn json_round_trip() {
        let multi: MultiPolygon = MultiPolygon::with_srid(
            vec![vec![vec![[0, 0], [1, 0], [1, 1], [0, 0]]]],
            Some(3857),
        )
        .unwrap();
        let geom = Geom::<Cartesian>::from_json(&multi.to_json().unwrap()).unwrap();
        assert_eq!(geom, Geom::MultiPolygon(multi));

        let geom = Geom::<Cartesian>::from_json(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap();
        assert_eq!(geom.srid(), None);
        assert_eq!(geom.to_string(), "1 2");
    }

    #[test]
    fn from_json_validates() {
        assert!(Geom::<Cartesian>::from_json(r#"{"type":"Polygon","coordinates":[[[0,0],[1,1]]]}"#).is_err());
        assert!(Geom::<Cartesian>::from_json(r#"{"type":"Point","coordinates":[1]}"#).is_err());
        assert!(Geom::<Cartesian>::from_json(r#"{"type":"Geometry","coordinates":[]}"#).is_err());
        assert!(Geom::<Cartesian>::from_json("not json").is_err());
        assert!(Geom::<Geodetic>::from_json(r#"{"type":"Point","coordinates":[200,0]}"#).is_err());
    }

    #[test]
    fn wkt_round_trip() {
        for wkt in [
            "POINT(1 2)",
            "SRID=4326;LINESTRING(0 0,1 1,2 0.5)",
            "POLYGON((0 0,10 0,10 10,0 10,0 0),(2 2,3 2,3 3,2 2))",
            "MULTIPOINT(0 0,0 5)",
            "MULTILINESTRING((0 0,1 1),(2 2,3 3))",
            "SRID=0;MULTIPOLYGON(((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))",
            "POINT Z(1 2 3)",
            "POINT ZM(1 2 3 1700000000)",
        ] {
            let geom = Geom::<Cartesian>::from_wkt(wkt).unwrap();
            assert_eq!(geom.to_ewkt().unwrap(), wkt);
        }
    }

    #[test]
    fn geom_srid() {
        let mut geom: Geom = Point::<Cartesian>::new(1, 2).unwrap().into();
        geom.set_srid(Some(4326)).set_srid(None);
        assert_eq!(geom.srid(), Some(4326));
        assert_eq!(geom.family(), GeometryType::Geometry);
        assert_eq!(geom.geometry_type(), GeometryType::Point);
    }
}

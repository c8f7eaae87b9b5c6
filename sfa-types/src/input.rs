//! Values accepted by geometry constructors and setters.
//!
//! A container element may be given in several forms: as nested arrays of numbers or strings, as `serde_json`
//! arrays, or as another geometry value. Each input type is a closed set of such forms, reduced to plain coordinates
//! before validation.

use serde_json::Value;

use crate::error::SpatialError;
use crate::geometry_type::{CoordinateSpace, GeometryType};
use crate::line_string::{is_closed, LineString, Path};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::number::{Number, RawCoordinate};
use crate::point::{json_type_name, Point, Position};
use crate::polygon::Polygon;
use crate::wkt::path_text;

/// A point given to a geometry container.
#[derive(Debug, Clone, PartialEq)]
pub enum PointInput {
    /// Raw coordinates. Exactly two numeric values describe a valid point.
    Raw(Vec<RawCoordinate>),
    /// Coordinates of an existing point.
    Position(Position),
    /// A value that cannot describe a point, with the name of its type.
    Invalid(&'static str),
}

/// A sequence of points: a line string, a ring or the points of a multi point.
#[derive(Debug, Clone, PartialEq)]
pub enum LineInput {
    /// Separate points.
    Points(Vec<PointInput>),
    /// Coordinates of an existing line string or multi point.
    Path(Path),
    /// Rings of an existing polygon. Never accepted as a single line.
    Polygon(Vec<Path>),
    /// A value that cannot describe a sequence of points, with the name of its type.
    Invalid(&'static str),
}

/// A sequence of lines: the rings of a polygon or the lines of a multi line string.
#[derive(Debug, Clone, PartialEq)]
pub enum LinesInput {
    /// Separate lines.
    Lines(Vec<LineInput>),
    /// Lines of an existing multi line string. Never accepted as the rings of a polygon.
    MultiLineString(Vec<Path>),
    /// A value that cannot describe a sequence of lines, with the name of its type.
    Invalid(&'static str),
}

/// A sequence of polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonsInput {
    /// Separate polygons.
    Polygons(Vec<LinesInput>),
    /// A value that cannot describe a sequence of polygons, with the name of its type.
    Invalid(&'static str),
}

impl PointInput {
    /// Reduces the input to the coordinates of a point valid in the space `S`.
    pub(crate) fn into_position<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Position, SpatialError> {
        let invalid = |kind: &str| {
            SpatialError::invalid(format!("Invalid {owner} Point value of type \"{kind}\""))
        };

        let [x, y] = match self {
            PointInput::Position(position) => position,
            PointInput::Raw(values) => match values.as_slice() {
                [x, y] => [
                    numeric(x).ok_or_else(|| invalid("array"))?,
                    numeric(y).ok_or_else(|| invalid("array"))?,
                ],
                _ => return Err(invalid("array")),
            },
            PointInput::Invalid(kind) => return Err(invalid(kind)),
        };

        Ok([S::check_x(x)?, S::check_y(y)?])
    }
}

/// Numeric value of a container coordinate. Unlike point constructors, containers do not parse degree notations.
fn numeric(value: &RawCoordinate) -> Option<Number> {
    match value {
        RawCoordinate::Number(n) if n.is_finite() => Some(*n),
        RawCoordinate::Number(_) => None,
        RawCoordinate::Text(text) => Number::parse_numeric(text),
    }
}

impl LineInput {
    /// Reduces the input to a sequence of positions valid in the space `S`.
    pub(crate) fn into_path<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Path, SpatialError> {
        match self {
            LineInput::Points(points) => points
                .into_iter()
                .map(|p| p.into_position::<S>(owner))
                .collect(),
            LineInput::Path(path) => path
                .into_iter()
                .map(|p| PointInput::Position(p).into_position::<S>(owner))
                .collect(),
            LineInput::Polygon(_) => Err(SpatialError::invalid(format!(
                "Invalid {owner} LineString value of type \"Polygon\""
            ))),
            LineInput::Invalid(kind) => Err(SpatialError::invalid(format!(
                "Invalid {owner} LineString value of type \"{kind}\""
            ))),
        }
    }

    /// Reduces the input to a closed ring valid in the space `S`.
    pub(crate) fn into_ring<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Path, SpatialError> {
        if let LineInput::Polygon(_) = self {
            return Err(SpatialError::invalid(
                "You cannot add a Polygon to another one. Use a Multipolygon.",
            ));
        }

        let ring = self.into_path::<S>(owner)?;
        if !is_closed(&ring) {
            let text = path_text(&ring);
            log::debug!("rejecting open ring ({text})");
            return Err(SpatialError::invalid(format!(
                "Invalid polygon, ring \"({text})\" is not closed"
            )));
        }

        Ok(ring)
    }
}

impl LinesInput {
    fn into_lines(self, owner: GeometryType) -> Result<Vec<LineInput>, SpatialError> {
        match self {
            LinesInput::Lines(lines) => Ok(lines),
            LinesInput::MultiLineString(_) => Err(SpatialError::invalid(format!(
                "Invalid {owner} value of type \"MultiLineString\""
            ))),
            LinesInput::Invalid(kind) => Err(SpatialError::invalid(format!(
                "Invalid {owner} value of type \"{kind}\""
            ))),
        }
    }

    /// Reduces the input to line strings valid in the space `S`.
    pub(crate) fn into_paths<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Vec<Path>, SpatialError> {
        let lines = match self {
            LinesInput::MultiLineString(paths) => paths.into_iter().map(LineInput::Path).collect(),
            other => other.into_lines(owner)?,
        };

        lines
            .into_iter()
            .map(|line| line.into_path::<S>(owner))
            .collect()
    }

    /// Reduces the input to closed rings valid in the space `S`.
    pub(crate) fn into_rings<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Vec<Path>, SpatialError> {
        self.into_lines(owner)?
            .into_iter()
            .map(|line| line.into_ring::<S>(owner))
            .collect()
    }
}

impl PolygonsInput {
    /// Reduces the input to polygons valid in the space `S`.
    pub(crate) fn into_polygons<S: CoordinateSpace>(
        self,
        owner: GeometryType,
    ) -> Result<Vec<Vec<Path>>, SpatialError> {
        match self {
            PolygonsInput::Polygons(polygons) => polygons
                .into_iter()
                .map(|polygon| polygon.into_rings::<S>(owner))
                .collect(),
            PolygonsInput::Invalid(kind) => Err(SpatialError::invalid(format!(
                "Invalid {owner} value of type \"{kind}\""
            ))),
        }
    }
}

impl<T: Into<RawCoordinate>> From<[T; 2]> for PointInput {
    fn from(value: [T; 2]) -> Self {
        PointInput::Raw(value.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<RawCoordinate>, B: Into<RawCoordinate>> From<(A, B)> for PointInput {
    fn from((x, y): (A, B)) -> Self {
        PointInput::Raw(vec![x.into(), y.into()])
    }
}

impl<S: CoordinateSpace> From<Point<S>> for PointInput {
    fn from(value: Point<S>) -> Self {
        PointInput::Position(value.to_array())
    }
}

impl<S: CoordinateSpace> From<&Point<S>> for PointInput {
    fn from(value: &Point<S>) -> Self {
        PointInput::Position(value.to_array())
    }
}

impl From<&Value> for PointInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(values) => values
                .iter()
                .map(|v| match v {
                    Value::Number(n) => n
                        .as_i64()
                        .map(RawCoordinate::from)
                        .or_else(|| n.as_f64().map(RawCoordinate::from)),
                    Value::String(s) => Some(RawCoordinate::from(s)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(PointInput::Raw)
                .unwrap_or(PointInput::Invalid("array")),
            other => PointInput::Invalid(json_type_name(other)),
        }
    }
}

impl From<Value> for PointInput {
    fn from(value: Value) -> Self {
        PointInput::from(&value)
    }
}

impl<T: Into<PointInput>> From<Vec<T>> for LineInput {
    fn from(value: Vec<T>) -> Self {
        LineInput::Points(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PointInput>, const N: usize> From<[T; N]> for LineInput {
    fn from(value: [T; N]) -> Self {
        LineInput::Points(value.into_iter().map(Into::into).collect())
    }
}

impl<S: CoordinateSpace> From<LineString<S>> for LineInput {
    fn from(value: LineString<S>) -> Self {
        LineInput::Path(value.to_array())
    }
}

impl<S: CoordinateSpace> From<&LineString<S>> for LineInput {
    fn from(value: &LineString<S>) -> Self {
        LineInput::Path(value.to_array())
    }
}

impl<S: CoordinateSpace> From<MultiPoint<S>> for LineInput {
    fn from(value: MultiPoint<S>) -> Self {
        LineInput::Path(value.to_array())
    }
}

impl<S: CoordinateSpace> From<&MultiPoint<S>> for LineInput {
    fn from(value: &MultiPoint<S>) -> Self {
        LineInput::Path(value.to_array())
    }
}

impl<S: CoordinateSpace> From<Polygon<S>> for LineInput {
    fn from(value: Polygon<S>) -> Self {
        LineInput::Polygon(value.to_array())
    }
}

impl<S: CoordinateSpace> From<&Polygon<S>> for LineInput {
    fn from(value: &Polygon<S>) -> Self {
        LineInput::Polygon(value.to_array())
    }
}

impl From<&Value> for LineInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(points) => LineInput::Points(points.iter().map(PointInput::from).collect()),
            other => LineInput::Invalid(json_type_name(other)),
        }
    }
}

impl From<Value> for LineInput {
    fn from(value: Value) -> Self {
        LineInput::from(&value)
    }
}

impl<T: Into<LineInput>> From<Vec<T>> for LinesInput {
    fn from(value: Vec<T>) -> Self {
        LinesInput::Lines(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LineInput>, const N: usize> From<[T; N]> for LinesInput {
    fn from(value: [T; N]) -> Self {
        LinesInput::Lines(value.into_iter().map(Into::into).collect())
    }
}

impl<S: CoordinateSpace> From<Polygon<S>> for LinesInput {
    fn from(value: Polygon<S>) -> Self {
        LinesInput::from(&value)
    }
}

impl<S: CoordinateSpace> From<&Polygon<S>> for LinesInput {
    fn from(value: &Polygon<S>) -> Self {
        LinesInput::Lines(value.to_array().into_iter().map(LineInput::Path).collect())
    }
}

impl<S: CoordinateSpace> From<MultiLineString<S>> for LinesInput {
    fn from(value: MultiLineString<S>) -> Self {
        LinesInput::from(&value)
    }
}

impl<S: CoordinateSpace> From<&MultiLineString<S>> for LinesInput {
    fn from(value: &MultiLineString<S>) -> Self {
        LinesInput::MultiLineString(value.to_array())
    }
}

impl From<&Value> for LinesInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(lines) => LinesInput::Lines(lines.iter().map(LineInput::from).collect()),
            other => LinesInput::Invalid(json_type_name(other)),
        }
    }
}

impl From<Value> for LinesInput {
    fn from(value: Value) -> Self {
        LinesInput::from(&value)
    }
}

impl<T: Into<LinesInput>> From<Vec<T>> for PolygonsInput {
    fn from(value: Vec<T>) -> Self {
        PolygonsInput::Polygons(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LinesInput>, const N: usize> From<[T; N]> for PolygonsInput {
    fn from(value: [T; N]) -> Self {
        PolygonsInput::Polygons(value.into_iter().map(Into::into).collect())
    }
}

impl<S: CoordinateSpace> From<MultiPolygon<S>> for PolygonsInput {
    fn from(value: MultiPolygon<S>) -> Self {
        PolygonsInput::from(&value)
    }
}

impl<S: CoordinateSpace> From<&MultiPolygon<S>> for PolygonsInput {
    fn from(value: &MultiPolygon<S>) -> Self {
        PolygonsInput::Polygons(
            value
                .to_array()
                .into_iter()
                .map(|rings| LinesInput::Lines(rings.into_iter().map(LineInput::Path).collect()))
                .collect(),
        )
    }
}

impl From<&Value> for PolygonsInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(polygons) => {
                PolygonsInput::Polygons(polygons.iter().map(LinesInput::from).collect())
            }
            other => PolygonsInput::Invalid(json_type_name(other)),
        }
    }
}

impl From<Value> for PolygonsInput {
    fn from(value: Value) -> Self {
        PolygonsInput::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::geometry_type::{Cartesian, Geodetic};

    #[test]
    fn raw_points_must_be_numeric_pairs() {
        let position = PointInput::from(["1", "2.5"])
            .into_position::<Cartesian>(GeometryType::MultiPoint)
            .unwrap();
        assert_eq!(position, [Number::Int(1), Number::Float(2.5)]);

        let err = PointInput::from(["40°N", "2"])
            .into_position::<Cartesian>(GeometryType::MultiPoint)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid MultiPoint Point value of type \"array\""
        );

        let err = PointInput::from(&json!([1, 2, 3]))
            .into_position::<Cartesian>(GeometryType::LineString)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid LineString Point value of type \"array\""
        );

        let err = PointInput::from(&json!("1 2"))
            .into_position::<Cartesian>(GeometryType::Polygon)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid Polygon Point value of type \"string\""
        );
    }

    #[test]
    fn positions_are_checked_against_space() {
        let point: Point = Point::new(200, 0).unwrap();
        assert!(PointInput::from(point)
            .into_position::<Geodetic>(GeometryType::MultiPoint)
            .is_err());
        assert!(PointInput::from(&point)
            .into_position::<Cartesian>(GeometryType::MultiPoint)
            .is_ok());
    }

    #[test]
    fn open_rings_are_rejected() {
        let err = LineInput::from([[0, 0], [10, 0], [10, 10], [0, 10]])
            .into_ring::<Cartesian>(GeometryType::Polygon)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid polygon, ring \"(0 0,10 0,10 10,0 10)\" is not closed"
        );

        assert!(LineInput::from(Vec::<[i32; 2]>::new())
            .into_ring::<Cartesian>(GeometryType::Polygon)
            .is_err());
        assert!(LineInput::from([[0, 0]])
            .into_ring::<Cartesian>(GeometryType::Polygon)
            .is_err());
    }

    #[test]
    fn ring_closure_is_numeric() {
        let ring = LineInput::Points(vec![
            PointInput::from([0, 0]),
            PointInput::from([1, 0]),
            PointInput::from([0.0, 0.0]),
        ]);
        assert!(ring.into_ring::<Cartesian>(GeometryType::Polygon).is_ok());

        let ring = LineInput::from([[0.0, 0.0], [1.0, 0.0], [0.0, 1e-12]]);
        assert!(ring.into_ring::<Cartesian>(GeometryType::Polygon).is_err());
    }

    #[test]
    fn polygon_is_not_a_ring() {
        let polygon: Polygon =
            Polygon::new([[[0, 0], [1, 0], [1, 1], [0, 0]]]).unwrap();
        let err = LineInput::from(&polygon)
            .into_ring::<Cartesian>(GeometryType::Polygon)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You cannot add a Polygon to another one. Use a Multipolygon."
        );
        assert_matches!(
            LineInput::from(polygon).into_path::<Cartesian>(GeometryType::MultiLineString),
            Err(SpatialError::InvalidValue { .. })
        );
    }

    #[test]
    fn json_values() {
        let rings = LinesInput::from(&json!([[[0, 0], [1, 0], ["1", "1"], [0, 0]]]))
            .into_rings::<Cartesian>(GeometryType::Polygon)
            .unwrap();
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][2], [Number::Int(1), Number::Int(1)]);

        let err = PolygonsInput::from(&json!(5))
            .into_polygons::<Cartesian>(GeometryType::MultiPolygon)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid MultiPolygon value of type \"number\""
        );
    }

    #[test]
    fn multi_line_string_is_not_a_polygon() {
        let lines: MultiLineString =
            MultiLineString::new([[[0, 0], [1, 0], [1, 1], [0, 0]]]).unwrap();

        let err = LinesInput::from(&lines)
            .into_rings::<Cartesian>(GeometryType::MultiPolygon)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid MultiPolygon value of type \"MultiLineString\""
        );

        let paths = LinesInput::from(lines)
            .into_paths::<Cartesian>(GeometryType::MultiLineString)
            .unwrap();
        assert_eq!(paths.len(), 1);
    }
}

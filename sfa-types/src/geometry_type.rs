//! Geometry type tags and coordinate space markers.
use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::SpatialError;
use crate::number::{Number, RawCoordinate};
use crate::range::{check_range, resolve_cartesian, resolve_geodetic, Axis};

/// Type of a geometry value. Fixed per concrete geometry type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeometryType {
    /// Single position.
    Point,
    /// Sequence of positions.
    LineString,
    /// Sequence of closed rings.
    Polygon,
    /// Set of positions.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Planar geometry family.
    Geometry,
    /// Collection of planar geometries.
    GeometryCollection,
    /// Geodetic geometry family.
    Geography,
    /// Collection of geodetic geometries.
    GeographyCollection,
    /// Position with elevation.
    PointZ,
    /// Position with elevation and a moment in time.
    #[serde(rename = "PointZM")]
    PointZm,
}

impl GeometryType {
    /// Name of the type, as used in the JSON export.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::Geometry => "Geometry",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::Geography => "Geography",
            GeometryType::GeographyCollection => "GeographyCollection",
            GeometryType::PointZ => "PointZ",
            GeometryType::PointZm => "PointZM",
        }
    }

    /// Keyword starting the WKT representation of the type.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::Geometry => "GEOMETRY",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
            GeometryType::Geography => "GEOGRAPHY",
            GeometryType::GeographyCollection => "GEOGRAPHYCOLLECTION",
            GeometryType::PointZ => "POINT Z",
            GeometryType::PointZm => "POINT ZM",
        }
    }

    /// Type with the given WKT keyword. Keywords are case insensitive and may contain extra whitespace.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        let normalized = keyword
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        [
            GeometryType::Point,
            GeometryType::LineString,
            GeometryType::Polygon,
            GeometryType::MultiPoint,
            GeometryType::MultiLineString,
            GeometryType::MultiPolygon,
            GeometryType::PointZ,
            GeometryType::PointZm,
        ]
        .into_iter()
        .find(|t| t.wkt_keyword() == normalized)
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Coordinate space of a geometry. Decides which values are accepted as coordinates.
///
/// The defined coordinate spaces are:
/// * [`Cartesian`] - planar or projected coordinates without universal bounds;
/// * [`Geodetic`] - longitude/latitude pairs in degrees.
pub trait CoordinateSpace: Debug + Copy + Default + PartialEq + 'static {
    /// Geometry family of the space: [`GeometryType::Geometry`] or [`GeometryType::Geography`].
    const FAMILY: GeometryType;

    /// Checks the first coordinate of a position (X, longitude).
    fn check_x(x: Number) -> Result<Number, SpatialError>;

    /// Checks the second coordinate of a position (Y, latitude).
    fn check_y(y: Number) -> Result<Number, SpatialError>;

    /// Resolves caller input into the first coordinate of a position.
    fn resolve_x(input: &RawCoordinate) -> Result<Number, SpatialError>;

    /// Resolves caller input into the second coordinate of a position.
    fn resolve_y(input: &RawCoordinate) -> Result<Number, SpatialError>;
}

/// Planar coordinate space marker.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct Cartesian;

/// Geodetic coordinate space marker.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct Geodetic;

impl CoordinateSpace for Cartesian {
    const FAMILY: GeometryType = GeometryType::Geometry;

    fn check_x(x: Number) -> Result<Number, SpatialError> {
        Ok(x)
    }

    fn check_y(y: Number) -> Result<Number, SpatialError> {
        Ok(y)
    }

    fn resolve_x(input: &RawCoordinate) -> Result<Number, SpatialError> {
        resolve_cartesian(input)
    }

    fn resolve_y(input: &RawCoordinate) -> Result<Number, SpatialError> {
        resolve_cartesian(input)
    }
}

impl CoordinateSpace for Geodetic {
    const FAMILY: GeometryType = GeometryType::Geography;

    fn check_x(x: Number) -> Result<Number, SpatialError> {
        check_axis(x, Axis::Longitude)
    }

    fn check_y(y: Number) -> Result<Number, SpatialError> {
        check_axis(y, Axis::Latitude)
    }

    fn resolve_x(input: &RawCoordinate) -> Result<Number, SpatialError> {
        resolve_geodetic(input, Axis::Longitude)
    }

    fn resolve_y(input: &RawCoordinate) -> Result<Number, SpatialError> {
        resolve_geodetic(input, Axis::Latitude)
    }
}

fn check_axis(value: Number, axis: Axis) -> Result<Number, SpatialError> {
    let (min, max) = axis.bounds();
    check_range(value, min, max)
        .map_err(|range| SpatialError::out_of_range(axis, &value.to_string(), range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_keywords() {
        assert_eq!(
            GeometryType::from_wkt_keyword("multipolygon"),
            Some(GeometryType::MultiPolygon)
        );
        assert_eq!(
            GeometryType::from_wkt_keyword(" Point  ZM "),
            Some(GeometryType::PointZm)
        );
        assert_eq!(GeometryType::from_wkt_keyword("GEOMETRY"), None);
        assert_eq!(GeometryType::from_wkt_keyword("CIRCLE"), None);
    }

    #[test]
    fn names_match_json_tags() {
        for t in [
            GeometryType::Point,
            GeometryType::MultiLineString,
            GeometryType::GeographyCollection,
            GeometryType::PointZm,
        ] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.name());
        }
    }

    #[test]
    fn geodetic_space_checks_bounds() {
        assert!(Geodetic::check_x(Number::Int(180)).is_ok());
        assert!(Geodetic::check_x(Number::Float(180.5)).is_err());
        assert!(Geodetic::check_y(Number::Int(-90)).is_ok());
        assert!(Geodetic::check_y(Number::Int(-91)).is_err());
        assert!(Cartesian::check_y(Number::Int(-91)).is_ok());
    }

    #[test]
    fn geodetic_space_echoes_text_input() {
        let err = Geodetic::resolve_y(&RawCoordinate::from("95.5")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Out of range latitude value, latitude must be between -90 and 90, got \"95.5\"."
        );
        assert_eq!(
            Cartesian::resolve_y(&RawCoordinate::from("95.5")).unwrap(),
            Number::Float(95.5)
        );
    }
}

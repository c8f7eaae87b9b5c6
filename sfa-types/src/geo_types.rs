//! Conversions between this crate's geometries and [`geo_types`](::geo_types) geometries.
//!
//! Conversion into `geo_types` is infallible. Elevation and moment of 3d and 4d points are dropped. Conversion
//! from `geo_types` validates the coordinates the same way constructors do. Empty interior rings of a polygon are
//! skipped, and `Line`, `Rect` and `Triangle` become a line string or a polygon.

use ::geo_types::Coord;

use crate::error::SpatialError;
use crate::geometry::Geom;
use crate::geometry_type::CoordinateSpace;
use crate::line_string::{LineString, Path};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::{Point, Position};
use crate::polygon::Polygon;

fn coord(position: &Position) -> Coord<f64> {
    Coord {
        x: position[0].as_f64(),
        y: position[1].as_f64(),
    }
}

fn line(path: &[Position]) -> ::geo_types::LineString<f64> {
    path.iter().map(coord).collect()
}

fn polygon(rings: &[Path]) -> ::geo_types::Polygon<f64> {
    let mut rings = rings.iter().map(|ring| line(ring));
    let exterior = rings
        .next()
        .unwrap_or_else(|| ::geo_types::LineString::new(vec![]));
    ::geo_types::Polygon::new(exterior, rings.collect())
}

fn positions(line: &::geo_types::LineString<f64>) -> Vec<[f64; 2]> {
    line.coords().map(|c| [c.x, c.y]).collect()
}

/// Rings of a `geo_types` polygon. An empty polygon has no rings.
fn polygon_rings(value: &::geo_types::Polygon<f64>) -> Result<Vec<Vec<[f64; 2]>>, SpatialError> {
    let interiors = value
        .interiors()
        .iter()
        .filter(|ring| !ring.0.is_empty())
        .map(positions);

    if value.exterior().0.is_empty() {
        return match interiors.count() {
            0 => Ok(vec![]),
            _ => Err(SpatialError::invalid(
                "Invalid Polygon, interior rings given without an exterior ring",
            )),
        };
    }

    Ok(std::iter::once(positions(value.exterior()))
        .chain(interiors)
        .collect())
}

impl<S: CoordinateSpace> From<&Point<S>> for ::geo_types::Point<f64> {
    fn from(value: &Point<S>) -> Self {
        ::geo_types::Point(coord(&value.to_array()))
    }
}

impl<S: CoordinateSpace> From<&MultiPoint<S>> for ::geo_types::MultiPoint<f64> {
    fn from(value: &MultiPoint<S>) -> Self {
        value
            .iter()
            .map(|p| ::geo_types::Point(coord(p)))
            .collect()
    }
}

impl<S: CoordinateSpace> From<&LineString<S>> for ::geo_types::LineString<f64> {
    fn from(value: &LineString<S>) -> Self {
        line(value)
    }
}

impl<S: CoordinateSpace> From<&Polygon<S>> for ::geo_types::Polygon<f64> {
    fn from(value: &Polygon<S>) -> Self {
        polygon(value)
    }
}

impl<S: CoordinateSpace> From<&MultiLineString<S>> for ::geo_types::MultiLineString<f64> {
    fn from(value: &MultiLineString<S>) -> Self {
        ::geo_types::MultiLineString::new(value.iter().map(|path| line(path)).collect())
    }
}

impl<S: CoordinateSpace> From<&MultiPolygon<S>> for ::geo_types::MultiPolygon<f64> {
    fn from(value: &MultiPolygon<S>) -> Self {
        ::geo_types::MultiPolygon::new(value.iter().map(|rings| polygon(rings)).collect())
    }
}

impl<S: CoordinateSpace> From<&Geom<S>> for ::geo_types::Geometry<f64> {
    fn from(value: &Geom<S>) -> Self {
        match value {
            Geom::Point(v) => ::geo_types::Point::from(v).into(),
            Geom::PointZ(v) => ::geo_types::Point::from(&**v).into(),
            Geom::PointZm(v) => ::geo_types::Point::from(&***v).into(),
            Geom::MultiPoint(v) => ::geo_types::MultiPoint::from(v).into(),
            Geom::LineString(v) => ::geo_types::LineString::from(v).into(),
            Geom::Polygon(v) => ::geo_types::Polygon::from(v).into(),
            Geom::MultiLineString(v) => ::geo_types::MultiLineString::from(v).into(),
            Geom::MultiPolygon(v) => ::geo_types::MultiPolygon::from(v).into(),
        }
    }
}

impl<S: CoordinateSpace> TryFrom<::geo_types::Point<f64>> for Point<S> {
    type Error = SpatialError;

    fn try_from(value: ::geo_types::Point<f64>) -> Result<Self, Self::Error> {
        Point::new(value.x(), value.y())
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::LineString<f64>> for LineString<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::LineString<f64>) -> Result<Self, Self::Error> {
        LineString::new(positions(value))
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::Polygon<f64>> for Polygon<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::Polygon<f64>) -> Result<Self, Self::Error> {
        Polygon::new(polygon_rings(value)?)
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::MultiPoint<f64>> for MultiPoint<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::MultiPoint<f64>) -> Result<Self, Self::Error> {
        MultiPoint::new(value.iter().map(|p| [p.x(), p.y()]).collect::<Vec<_>>())
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::MultiLineString<f64>> for MultiLineString<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::MultiLineString<f64>) -> Result<Self, Self::Error> {
        MultiLineString::new(value.iter().map(positions).collect::<Vec<_>>())
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::MultiPolygon<f64>> for MultiPolygon<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::MultiPolygon<f64>) -> Result<Self, Self::Error> {
        let polygons = value
            .iter()
            .map(polygon_rings)
            .collect::<Result<Vec<_>, _>>()?;
        MultiPolygon::new(polygons)
    }
}

impl<S: CoordinateSpace> TryFrom<&::geo_types::Geometry<f64>> for Geom<S> {
    type Error = SpatialError;

    fn try_from(value: &::geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        use ::geo_types::Geometry;

        Ok(match value {
            Geometry::Point(v) => Geom::Point(Point::try_from(*v)?),
            Geometry::Line(v) => Geom::LineString(LineString::new([
                [v.start.x, v.start.y],
                [v.end.x, v.end.y],
            ])?),
            Geometry::LineString(v) => Geom::LineString(v.try_into()?),
            Geometry::Polygon(v) => Geom::Polygon(v.try_into()?),
            Geometry::MultiPoint(v) => Geom::MultiPoint(v.try_into()?),
            Geometry::MultiLineString(v) => Geom::MultiLineString(v.try_into()?),
            Geometry::MultiPolygon(v) => Geom::MultiPolygon(v.try_into()?),
            Geometry::Rect(v) => Geom::Polygon((&v.to_polygon()).try_into()?),
            Geometry::Triangle(v) => Geom::Polygon((&v.to_polygon()).try_into()?),
            Geometry::GeometryCollection(_) => {
                return Err(SpatialError::invalid(
                    "Cannot create a geometry of type \"GeometryCollection\"",
                ))
            }
        })
    }
}

use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::index::resolve_index;
use crate::input::{LineInput, PointInput};
use crate::point::{Point, Position};
use crate::wkt::path_text;

/// Ordered sequence of positions.
pub type Path = Vec<Position>;

/// Returns true if the path has at least two positions and the first one equals the last one.
pub(crate) fn is_closed(path: &[Position]) -> bool {
    path.len() >= 2 && path.first() == path.last()
}

/// Sequence of points connected by straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<S = Cartesian> {
    points: Path,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Line string in the geodetic coordinate space.
pub type GeographyLineString = LineString<Geodetic>;

impl<S: CoordinateSpace> LineString<S> {
    /// Creates a new line string. Fails if any of the points is invalid.
    pub fn new(points: impl Into<LineInput>) -> Result<Self, SpatialError> {
        Self::with_srid(points, None)
    }

    /// Creates a new line string with the given SRID.
    pub fn with_srid(points: impl Into<LineInput>, srid: Option<i32>) -> Result<Self, SpatialError> {
        Ok(Self::from_parts(
            points.into().into_path::<S>(GeometryType::LineString)?,
            srid,
        ))
    }

    pub(crate) fn from_parts(points: Path, srid: Option<i32>) -> Self {
        Self {
            points,
            srid,
            space: PhantomData,
        }
    }

    /// Appends a point.
    pub fn add_point(&mut self, point: impl Into<PointInput>) -> Result<&mut Self, SpatialError> {
        let position = point.into().into_position::<S>(GeometryType::LineString)?;
        self.points.push(position);
        Ok(self)
    }

    /// Point at the given index. Negative indices count from the end.
    pub fn point(&self, index: isize) -> Result<Point<S>, SpatialError> {
        let index = resolve_index(index, self.points.len())?;
        Ok(Point::from_parts(self.points[index], self.srid))
    }

    /// All points, carrying the SRID of the line string.
    pub fn points(&self) -> Vec<Point<S>> {
        self.points
            .iter()
            .map(|p| Point::from_parts(*p, self.srid))
            .collect()
    }

    /// Replaces all points. On failure the line string is left unchanged.
    pub fn set_points(&mut self, points: impl Into<LineInput>) -> Result<&mut Self, SpatialError> {
        self.points = points.into().into_path::<S>(GeometryType::LineString)?;
        Ok(self)
    }

    /// Returns true if the line string has at least two points and its first point equals its last point.
    pub fn is_closed(&self) -> bool {
        is_closed(&self.points)
    }

    /// Coordinates of the points.
    pub fn to_array(&self) -> Path {
        self.points.clone()
    }
}

impl<S> Deref for LineString<S> {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<S: CoordinateSpace> Spatial for LineString<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn family(&self) -> GeometryType {
        S::FAMILY
    }

    fn srid(&self) -> Option<i32> {
        self.srid
    }

    fn set_srid(&mut self, srid: Option<i32>) -> &mut Self {
        self.srid = srid.or(self.srid);
        self
    }

    fn coordinates(&self) -> Coordinates {
        Coordinates::Path(self.to_array())
    }
}

impl<S> Display for LineString<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&path_text(&self.points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi_point::MultiPoint;

    #[test]
    fn closed_line_string() {
        let mut line: LineString =
            LineString::new([[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]).unwrap();
        assert!(line.is_closed());

        line.set_points([[0, 0], [1, 0], [1, 1], [0, 1]]).unwrap();
        assert!(!line.is_closed());
    }

    #[test]
    fn short_lines_are_never_closed() {
        let line: LineString = LineString::new(Vec::<[i32; 2]>::new()).unwrap();
        assert!(!line.is_closed());
        let line: LineString = LineString::new([[0, 0]]).unwrap();
        assert!(!line.is_closed());
        let line: LineString =
            LineString::new(vec![PointInput::from([0, 0]), PointInput::from([0.0, 0.0])]).unwrap();
        assert!(line.is_closed());
    }

    #[test]
    fn from_other_geometries() {
        let multi_point: MultiPoint = MultiPoint::with_srid([[1, 2], [3, 4]], Some(3857)).unwrap();
        let line: LineString = LineString::new(&multi_point).unwrap();
        assert_eq!(line.to_array(), multi_point.to_array());
        assert_eq!(line.srid(), None);

        let points = line.points();
        let copy: LineString = LineString::new(points).unwrap();
        assert_eq!(copy, line);
    }

    #[test]
    fn invalid_point_message_names_line_string() {
        let err = LineString::<Cartesian>::new([["1", "2"], ["x", "4"]]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid LineString Point value of type \"array\""
        );
    }

    #[test]
    fn geography_line_string() {
        let line = GeographyLineString::with_srid([[-73.9, 40.7], [2.35, 48.85]], Some(4326)).unwrap();
        assert_eq!(line.point(0).unwrap().latitude(), crate::number::Number::Float(40.7));
        assert_eq!(line.family(), GeometryType::Geography);
        assert!(GeographyLineString::new([[-190, 0], [0, 0]]).is_err());
    }
}

use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::index::resolve_index;
use crate::input::{LineInput, PointInput};
use crate::line_string::Path;
use crate::point::{Point, Position};
use crate::wkt::path_text;

/// Ordered set of points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint<S = Cartesian> {
    points: Path,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Multi point in the geodetic coordinate space.
pub type GeographyMultiPoint = MultiPoint<Geodetic>;

impl<S: CoordinateSpace> MultiPoint<S> {
    /// Creates a new multi point. Fails if any of the points is invalid.
    pub fn new(points: impl Into<LineInput>) -> Result<Self, SpatialError> {
        Self::with_srid(points, None)
    }

    /// Creates a new multi point with the given SRID.
    pub fn with_srid(points: impl Into<LineInput>, srid: Option<i32>) -> Result<Self, SpatialError> {
        Ok(Self::from_parts(
            points.into().into_path::<S>(GeometryType::MultiPoint)?,
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
        let position = point.into().into_position::<S>(GeometryType::MultiPoint)?;
        self.points.push(position);
        Ok(self)
    }

    /// Point at the given index. Negative indices count from the end.
    pub fn point(&self, index: isize) -> Result<Point<S>, SpatialError> {
        let index = resolve_index(index, self.points.len())?;
        Ok(Point::from_parts(self.points[index], self.srid))
    }

    /// All points, carrying the SRID of the multi point.
    pub fn points(&self) -> Vec<Point<S>> {
        self.points
            .iter()
            .map(|p| Point::from_parts(*p, self.srid))
            .collect()
    }

    /// Replaces all points. On failure the multi point is left unchanged.
    pub fn set_points(&mut self, points: impl Into<LineInput>) -> Result<&mut Self, SpatialError> {
        self.points = points.into().into_path::<S>(GeometryType::MultiPoint)?;
        Ok(self)
    }

    /// Coordinates of the points.
    pub fn to_array(&self) -> Vec<Position> {
        self.points.clone()
    }
}

impl<S> Deref for MultiPoint<S> {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<S: CoordinateSpace> Spatial for MultiPoint<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
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

impl<S> Display for MultiPoint<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&path_text(&self.points))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::number::Number;

    #[test]
    fn text_form() {
        let multi_point: MultiPoint = MultiPoint::new([[0, 0], [0, 5], [5, 0], [0, 0]]).unwrap();
        assert_eq!(multi_point.to_string(), "0 0,0 5,5 0,0 0");
        assert_eq!(multi_point.len(), 4);
    }

    #[test]
    fn add_and_get_points() {
        let mut multi_point: MultiPoint = MultiPoint::with_srid(Vec::<[i32; 2]>::new(), Some(4326)).unwrap();
        assert!(multi_point.is_empty());

        let point: Point = Point::new(3, 4).unwrap();
        multi_point
            .add_point([1, 2])
            .unwrap()
            .add_point(point)
            .unwrap()
            .add_point(["5.5", "6"])
            .unwrap();

        let last = multi_point.point(-1).unwrap();
        assert_eq!(last.to_array(), [Number::Float(5.5), Number::Int(6)]);
        assert_eq!(last.srid(), Some(4326));
        assert_eq!(multi_point.point(-3).unwrap().to_string(), "1 2");
        assert_eq!(multi_point.point(1).unwrap(), Point::with_srid(3, 4, Some(4326)).unwrap());

        assert_matches!(
            multi_point.point(3),
            Err(SpatialError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(multi_point.point(-4).is_err());
    }

    #[test]
    fn failed_insertion_keeps_points() {
        let mut multi_point: MultiPoint = MultiPoint::new([[1, 1], [2, 2]]).unwrap();
        assert!(multi_point.add_point(["a", "b"]).is_err());
        assert!(multi_point.set_points([["1", "1"], ["2", "x"]]).is_err());
        assert_eq!(multi_point.to_string(), "1 1,2 2");
    }

    #[test]
    fn geography_multi_point() {
        let err = GeographyMultiPoint::new([[0, 0], [0, 95]]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Out of range latitude value, latitude must be between -90 and 90, got \"95\"."
        );
        let points = GeographyMultiPoint::new([[-180, -90], [180, 90]]).unwrap().points();
        assert_eq!(points[1].longitude(), Number::Int(180));
    }
}

use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use web_time::SystemTime;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::number::{Number, RawCoordinate};
use crate::point::Point;
use crate::wkt::position_text;

/// Point with an elevation.
///
/// Dereferences to the underlying 2d [`Point`], so all accessors and setters of the point are available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3d<S = Cartesian> {
    point: Point<S>,
    z: Number,
}

/// Point with an elevation in the geodetic coordinate space.
pub type GeographyPoint3d = Point3d<Geodetic>;

impl<S: CoordinateSpace> Point3d<S> {
    /// Creates a new point.
    pub fn new(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
        z: impl Into<Number>,
    ) -> Result<Self, SpatialError> {
        Self::with_srid(x, y, z, None)
    }

    /// Creates a new point with the given SRID.
    pub fn with_srid(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
        z: impl Into<Number>,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        Ok(Self {
            point: Point::with_srid(x, y, srid)?,
            z: z.into(),
        })
    }

    /// Elevation.
    pub fn z(&self) -> Number {
        self.z
    }

    /// Sets the elevation. Elevation is never range checked.
    pub fn set_z(&mut self, z: impl Into<Number>) -> &mut Self {
        self.z = z.into();
        self
    }

    /// Coordinates of the point, `[x, y, z]`.
    pub fn to_array(&self) -> [Number; 3] {
        [self.point.x(), self.point.y(), self.z]
    }
}

impl<S> Deref for Point3d<S> {
    type Target = Point<S>;

    fn deref(&self) -> &Self::Target {
        &self.point
    }
}

impl<S> DerefMut for Point3d<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.point
    }
}

impl<S: CoordinateSpace> Spatial for Point3d<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::PointZ
    }

    fn family(&self) -> GeometryType {
        S::FAMILY
    }

    fn srid(&self) -> Option<i32> {
        self.point.srid()
    }

    fn set_srid(&mut self, srid: Option<i32>) -> &mut Self {
        self.point.set_srid(srid);
        self
    }

    fn coordinates(&self) -> Coordinates {
        Coordinates::Position(self.to_array().to_vec())
    }
}

impl<S: CoordinateSpace> Display for Point3d<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&position_text(&self.to_array()))
    }
}

/// Point with an elevation and a moment in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point4d<S = Cartesian> {
    point: Point3d<S>,
    moment: SystemTime,
}

impl<S: CoordinateSpace> Point4d<S> {
    /// Creates a new point.
    pub fn new(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
        z: impl Into<Number>,
        moment: SystemTime,
    ) -> Result<Self, SpatialError> {
        Self::with_srid(x, y, z, moment, None)
    }

    /// Creates a new point with the given SRID.
    pub fn with_srid(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
        z: impl Into<Number>,
        moment: SystemTime,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        Ok(Self {
            point: Point3d::with_srid(x, y, z, srid)?,
            moment,
        })
    }

    /// Moment of the point.
    pub fn moment(&self) -> SystemTime {
        self.moment
    }

    /// Sets the moment of the point.
    pub fn set_moment(&mut self, moment: SystemTime) -> &mut Self {
        self.moment = moment;
        self
    }

    /// Coordinates of the point, `[x, y, z, t]`, where `t` is the moment as whole seconds since the unix epoch.
    pub fn to_array(&self) -> [Number; 4] {
        let [x, y, z] = self.point.to_array();
        [x, y, z, Number::Int(unix_seconds(self.moment))]
    }
}

impl<S> Deref for Point4d<S> {
    type Target = Point3d<S>;

    fn deref(&self) -> &Self::Target {
        &self.point
    }
}

impl<S> DerefMut for Point4d<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.point
    }
}

impl<S: CoordinateSpace> Spatial for Point4d<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::PointZm
    }

    fn family(&self) -> GeometryType {
        S::FAMILY
    }

    fn srid(&self) -> Option<i32> {
        self.point.srid()
    }

    fn set_srid(&mut self, srid: Option<i32>) -> &mut Self {
        self.point.set_srid(srid);
        self
    }

    fn coordinates(&self) -> Coordinates {
        Coordinates::Position(self.to_array().to_vec())
    }
}

impl<S: CoordinateSpace> Display for Point4d<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&position_text(&self.to_array()))
    }
}

/// Whole seconds since the unix epoch, rounded down.
pub(crate) fn unix_seconds(moment: SystemTime) -> i64 {
    match moment.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(err) => {
            let before = err.duration();
            let seconds = before.as_secs() as i64;
            if before.subsec_nanos() > 0 {
                -seconds - 1
            } else {
                -seconds
            }
        }
    }
}

/// Moment at the given number of seconds since the unix epoch.
pub(crate) fn from_unix_seconds(seconds: i64) -> Option<SystemTime> {
    let offset = Duration::from_secs(seconds.unsigned_abs());
    if seconds >= 0 {
        SystemTime::UNIX_EPOCH.checked_add(offset)
    } else {
        SystemTime::UNIX_EPOCH.checked_sub(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_3d() {
        let mut point: Point3d = Point3d::with_srid(1, 2.5, 3, Some(4326)).unwrap();
        assert_eq!(point.to_string(), "1 2.5 3");
        assert_eq!(point.geometry_type(), GeometryType::PointZ);
        assert_eq!(point.x(), Number::Int(1));

        point.set_z(-10.5).set_x("4").unwrap();
        assert_eq!(
            point.to_array(),
            [Number::Int(4), Number::Float(2.5), Number::Float(-10.5)]
        );
        assert_eq!(point.srid(), Some(4326));
    }

    #[test]
    fn geography_point_3d_checks_bounds() {
        assert!(GeographyPoint3d::new(10, 95, 0).is_err());
        assert!(GeographyPoint3d::new(10, 90, 8848).is_ok());
    }

    #[test]
    fn point_4d() {
        let moment = from_unix_seconds(1_700_000_000).unwrap();
        let point: Point4d = Point4d::new(1, 2, 3, moment).unwrap();
        assert_eq!(point.to_string(), "1 2 3 1700000000");
        assert_eq!(point.to_array()[3], Number::Int(1_700_000_000));
        assert_eq!(point.geometry_type(), GeometryType::PointZm);
        assert_eq!(point.z(), Number::Int(3));
    }

    #[test]
    fn unix_seconds_round_down() {
        let moment = SystemTime::UNIX_EPOCH - Duration::from_millis(1500);
        assert_eq!(unix_seconds(moment), -2);
        let moment = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_seconds(moment), 1);
        assert_eq!(unix_seconds(from_unix_seconds(-60).unwrap()), -60);
    }
}

use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

use serde_json::Value;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::number::{Number, RawCoordinate};
use crate::range::{resolve_geodetic, Axis};
use crate::wkt::position_text;

/// Coordinates of a single position, `[x, y]`.
pub type Position = [Number; 2];

/// Point geometry.
///
/// Stores one pair of coordinates, accessible either as `x`/`y` or as `longitude`/`latitude`. Which values are
/// accepted is decided by the coordinate space `S`: [`Cartesian`] points take any finite value, [`Geodetic`] points
/// are bounded to `[-180, 180]` longitude and `[-90, 90]` latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S = Cartesian> {
    x: Number,
    y: Number,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Point in the geodetic coordinate space.
pub type GeographyPoint = Point<Geodetic>;

/// Non-fatal diagnostic produced alongside a successfully constructed value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Advisory {
    /// The coordinates were given as a single array argument.
    DeprecatedArrayArgument,
    /// The coordinates were given as an array followed by an SRID.
    DeprecatedArrayWithSrid,
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::DeprecatedArrayArgument => {
                f.write_str("passing coordinates as a single array is deprecated, pass x and y separately")
            }
            Advisory::DeprecatedArrayWithSrid => f.write_str(
                "passing coordinates as an array followed by an SRID is deprecated, pass x, y and SRID separately",
            ),
        }
    }
}

/// Constructed value together with the advisories raised while constructing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructed<T> {
    value: T,
    advisories: Vec<Advisory>,
}

impl<T> Constructed<T> {
    /// Constructed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Advisories raised during construction.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Whether the value was constructed from a deprecated argument shape.
    pub fn is_deprecated(&self) -> bool {
        self.advisories.iter().any(|a| {
            matches!(
                a,
                Advisory::DeprecatedArrayArgument | Advisory::DeprecatedArrayWithSrid
            )
        })
    }

    /// Drops the advisories and returns the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<S: CoordinateSpace> Point<S> {
    /// Creates a new point without SRID.
    ///
    /// Text coordinates are parsed, so both `Point::new(-79.9486, 40.4461)` and
    /// `Point::new("79°56′55″W", "40°26′46″N")` are accepted.
    pub fn new(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
    ) -> Result<Self, SpatialError> {
        Self::with_srid(x, y, None)
    }

    /// Creates a new point with the given SRID.
    pub fn with_srid(
        x: impl Into<RawCoordinate>,
        y: impl Into<RawCoordinate>,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        Ok(Self {
            x: S::resolve_x(&x.into())?,
            y: S::resolve_y(&y.into())?,
            srid,
            space: PhantomData,
        })
    }

    /// Creates a point from numeric coordinates, checking them against the coordinate space.
    pub fn from_position(position: Position, srid: Option<i32>) -> Result<Self, SpatialError> {
        Ok(Self {
            x: S::check_x(position[0])?,
            y: S::check_y(position[1])?,
            srid,
            space: PhantomData,
        })
    }

    /// Wraps coordinates that are already validated for the space.
    pub(crate) fn from_parts(position: Position, srid: Option<i32>) -> Self {
        Self {
            x: position[0],
            y: position[1],
            srid,
            space: PhantomData,
        }
    }

    /// Creates a point from a loosely typed argument list.
    ///
    /// Accepted shapes, in order of precedence:
    /// 1. `[[x, y]]` or `[[x, y, srid]]` (deprecated);
    /// 2. `[[x, y], srid]` (deprecated);
    /// 3. `[x, y]`;
    /// 4. `[x, y, srid]`.
    ///
    /// Coordinates are numbers or strings, an SRID is an integer or `null`. Deprecated shapes are accepted, but the
    /// returned value carries an [`Advisory`] about them. Any other shape fails with an error echoing the arguments.
    pub fn from_args(args: &[Value]) -> Result<Constructed<Self>, SpatialError> {
        let (point, advisory) = match args {
            [Value::Array(values)] => match values.as_slice() {
                [x, y] => (
                    Self::from_scalars(x, y, None),
                    Some(Advisory::DeprecatedArrayArgument),
                ),
                [x, y, srid] => (
                    Self::from_scalars(x, y, Some(srid)),
                    Some(Advisory::DeprecatedArrayArgument),
                ),
                _ => (None, None),
            },
            [Value::Array(values), srid] => match values.as_slice() {
                [x, y] => (
                    Self::from_scalars(x, y, Some(srid)),
                    Some(Advisory::DeprecatedArrayWithSrid),
                ),
                _ => (None, None),
            },
            [x, y] => (Self::from_scalars(x, y, None), None),
            [x, y, srid] => (Self::from_scalars(x, y, Some(srid)), None),
            _ => (None, None),
        };

        let point = point.ok_or_else(|| invalid_arguments(args))??;
        let advisories = match advisory {
            Some(advisory) => {
                log::warn!("{advisory}");
                vec![advisory]
            }
            None => vec![],
        };

        Ok(Constructed {
            value: point,
            advisories,
        })
    }

    fn from_scalars(x: &Value, y: &Value, srid: Option<&Value>) -> Option<Result<Self, SpatialError>> {
        let x = scalar(x)?;
        let y = scalar(y)?;
        let srid = match srid {
            Some(value) => srid_argument(value)?,
            None => None,
        };

        Some(Self::with_srid(x, y, srid))
    }

    /// X coordinate.
    pub fn x(&self) -> Number {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> Number {
        self.y
    }

    /// Longitude. Same value as [`Point::x`].
    pub fn longitude(&self) -> Number {
        self.x
    }

    /// Latitude. Same value as [`Point::y`].
    pub fn latitude(&self) -> Number {
        self.y
    }

    /// Sets the X coordinate. Text is parsed, but not range checked unless the point is geodetic.
    pub fn set_x(&mut self, x: impl Into<RawCoordinate>) -> Result<&mut Self, SpatialError> {
        self.x = S::resolve_x(&x.into())?;
        Ok(self)
    }

    /// Sets the Y coordinate. Text is parsed, but not range checked unless the point is geodetic.
    pub fn set_y(&mut self, y: impl Into<RawCoordinate>) -> Result<&mut Self, SpatialError> {
        self.y = S::resolve_y(&y.into())?;
        Ok(self)
    }

    /// Sets the longitude, which must be within `[-180, 180]`.
    pub fn set_longitude(
        &mut self,
        longitude: impl Into<RawCoordinate>,
    ) -> Result<&mut Self, SpatialError> {
        self.x = resolve_geodetic(&longitude.into(), Axis::Longitude)?;
        Ok(self)
    }

    /// Sets the latitude, which must be within `[-90, 90]`.
    pub fn set_latitude(
        &mut self,
        latitude: impl Into<RawCoordinate>,
    ) -> Result<&mut Self, SpatialError> {
        self.y = resolve_geodetic(&latitude.into(), Axis::Latitude)?;
        Ok(self)
    }

    /// Coordinates of the point, `[x, y]`.
    pub fn to_array(&self) -> Position {
        [self.x, self.y]
    }
}

impl<S: CoordinateSpace> Spatial for Point<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
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
        Coordinates::Position(self.to_array().to_vec())
    }
}

impl<S> Display for Point<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&position_text(&[self.x, self.y]))
    }
}

fn scalar(value: &Value) -> Option<RawCoordinate> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(RawCoordinate::from)
            .or_else(|| n.as_f64().map(RawCoordinate::from)),
        Value::String(s) => Some(RawCoordinate::from(s)),
        _ => None,
    }
}

fn srid_argument(value: &Value) -> Option<Option<i32>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()).map(Some),
        Value::String(s) => s.trim().parse::<i32>().ok().map(Some),
        _ => None,
    }
}

/// Name of the JSON type of the value, as used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_arguments(args: &[Value]) -> SpatialError {
    let echoed = args
        .iter()
        .map(|arg| match arg {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => json_type_name(other).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    SpatialError::invalid(format!(
        "Invalid parameters passed to Point::from_args: {echoed}"
    ))
}

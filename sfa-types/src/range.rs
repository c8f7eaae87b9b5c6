//! Range checks of geodetic coordinates and the policies resolving caller input into coordinate values.

use crate::error::{RangeError, SpatialError};
use crate::number::{Number, RawCoordinate};
use crate::parser::parse_coordinate;

/// Geodetic axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// East-west angle, `[-180, 180]`.
    Longitude,
    /// North-south angle, `[-90, 90]`.
    Latitude,
}

impl Axis {
    /// Valid `(min, max)` interval of the axis.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Axis::Longitude => (-180.0, 180.0),
            Axis::Latitude => (-90.0, 90.0),
        }
    }

    /// Lowercase name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Longitude => "longitude",
            Axis::Latitude => "latitude",
        }
    }
}

/// Returns the value unchanged if `min <= value <= max`.
pub fn check_range(value: Number, min: f64, max: f64) -> Result<Number, RangeError> {
    let v = value.as_f64();
    if min <= v && v <= max {
        Ok(value)
    } else {
        Err(RangeError::Bounds {
            value: value.to_string(),
            min,
            max,
        })
    }
}

/// Resolves a geodetic coordinate: parses text input and checks the value against the axis bounds.
///
/// Numeric input is returned as is, without conversion between integers and floats.
pub fn resolve_geodetic(input: &RawCoordinate, axis: Axis) -> Result<Number, SpatialError> {
    let value = match input {
        RawCoordinate::Number(v) => *v,
        RawCoordinate::Text(text) => parse_coordinate(text)?,
    };

    let (min, max) = axis.bounds();
    check_range(value, min, max)
        .map_err(|range| SpatialError::out_of_range(axis, &input.to_string(), range))
}

/// Resolves a cartesian coordinate. Text input is parsed, but the value is never range checked.
pub fn resolve_cartesian(input: &RawCoordinate) -> Result<Number, SpatialError> {
    match input {
        RawCoordinate::Number(v) => Ok(*v),
        RawCoordinate::Text(text) => Ok(parse_coordinate(text)?),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn check_range_bounds_are_inclusive() {
        assert_eq!(check_range(Number::Int(90), -90.0, 90.0), Ok(Number::Int(90)));
        assert_eq!(
            check_range(Number::Float(-90.0), -90.0, 90.0),
            Ok(Number::Float(-90.0))
        );
        assert_matches!(
            check_range(Number::Float(90.000_000_1), -90.0, 90.0),
            Err(RangeError::Bounds { min, max, .. }) if min == -90.0 && max == 90.0
        );
        assert!(check_range(Number::Float(f64::NAN), -90.0, 90.0).is_err());
    }

    #[test]
    fn geodetic_keeps_numeric_kind() {
        let value = resolve_geodetic(&RawCoordinate::from(20), Axis::Longitude).unwrap();
        assert_matches!(value, Number::Int(20));
        let value = resolve_geodetic(&RawCoordinate::from(20.0), Axis::Longitude).unwrap();
        assert_matches!(value, Number::Float(_));
    }

    #[test]
    fn geodetic_rejects_out_of_range() {
        let err = resolve_geodetic(&RawCoordinate::from(90.000_000_1), Axis::Latitude).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Out of range latitude value, latitude must be between -90 and 90, got \"90.0000001\"."
        );
        assert_eq!(err.range().unwrap().bounds(), Some((-90.0, 90.0)));

        let err = resolve_geodetic(&RawCoordinate::from("-180.5"), Axis::Longitude).unwrap_err();
        assert_eq!(err.range().unwrap().value(), "-180.5");
    }

    #[test]
    fn cartesian_is_unbounded() {
        let value = resolve_cartesian(&RawCoordinate::from(1_000_000)).unwrap();
        assert_eq!(value, Number::Int(1_000_000));
        let value = resolve_cartesian(&RawCoordinate::from("250")).unwrap();
        assert_eq!(value, Number::Int(250));
        assert!(resolve_cartesian(&RawCoordinate::from("abc")).is_err());
    }
}

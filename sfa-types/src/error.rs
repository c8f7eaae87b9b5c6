//! Error types used by the crate.

use thiserror::Error;

use crate::range::Axis;

/// A coordinate component is outside of its allowed range.
///
/// This kind never reaches the caller on its own: point setters and constructors wrap it into
/// [`SpatialError::InvalidValue`], where it stays available through [`SpatialError::range`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// Value is outside of the `[min, max]` interval.
    #[error("Coordinate must be comprised between {min} and {max}, got \"{value}\".")]
    Bounds {
        /// Offending value as it was given.
        value: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Degrees of a value with a `N` or `S` cardinal direction exceed 90.
    #[error("Degrees out of range -90 to 90 in value \"{0}\"")]
    Latitude(String),
    /// Degrees of a value with a `E` or `W` cardinal direction exceed 180.
    #[error("Degrees out of range -180 to 180 in value \"{0}\"")]
    Longitude(String),
    /// Minutes component is 60 or more.
    #[error("Minutes greater than 59 in value \"{0}\"")]
    Minutes(String),
    /// Seconds component is 60 or more.
    #[error("Seconds greater than 59 in value \"{0}\"")]
    Seconds(String),
}

impl RangeError {
    /// The offending value.
    pub fn value(&self) -> &str {
        match self {
            RangeError::Bounds { value, .. } => value,
            RangeError::Latitude(value)
            | RangeError::Longitude(value)
            | RangeError::Minutes(value)
            | RangeError::Seconds(value) => value,
        }
    }

    /// The violated `(min, max)` interval, if the error is about degrees.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            RangeError::Bounds { min, max, .. } => Some((*min, *max)),
            RangeError::Latitude(_) => Some(Axis::Latitude.bounds()),
            RangeError::Longitude(_) => Some(Axis::Longitude.bounds()),
            RangeError::Minutes(_) | RangeError::Seconds(_) => None,
        }
    }
}

/// Failure of the coordinate string parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The text matches no coordinate notation.
    #[error("unexpected coordinate syntax in value \"{0}\"")]
    Syntax(String),
    /// The text holds two coordinates instead of one.
    #[error("value \"{0}\" holds a pair of coordinates")]
    Pair(String),
    /// A component of the coordinate is out of range.
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    /// Construction or mutation of a geometry failed.
    #[error("{message}")]
    InvalidValue {
        /// Human readable description, echoing the invalid input.
        message: String,
        /// Range violation that caused the failure.
        #[source]
        range: Option<RangeError>,
    },
    /// Element index does not address an element of the sequence.
    #[error("index {index} is out of range for a sequence of {len} elements")]
    IndexOutOfRange {
        /// Requested index.
        index: isize,
        /// Length of the sequence.
        len: usize,
    },
    /// Geometry cannot be represented in the requested output format.
    #[error("cannot serialize geometry: {0}")]
    Serialization(String),
}

impl SpatialError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
            range: None,
        }
    }

    pub(crate) fn out_of_range(axis: Axis, value: &str, range: RangeError) -> Self {
        let (min, max) = axis.bounds();
        let name = axis.name();
        Self::InvalidValue {
            message: format!(
                "Out of range {name} value, {name} must be between {min} and {max}, got \"{value}\"."
            ),
            range: Some(range),
        }
    }

    /// Range violation behind an [`SpatialError::InvalidValue`] error, if any.
    pub fn range(&self) -> Option<&RangeError> {
        match self {
            SpatialError::InvalidValue { range, .. } => range.as_ref(),
            _ => None,
        }
    }
}

impl From<ParseError> for SpatialError {
    fn from(value: ParseError) -> Self {
        match value {
            ParseError::Syntax(text) => {
                Self::invalid(format!("Invalid coordinate value, got \"{text}\"."))
            }
            ParseError::Pair(_) => {
                Self::invalid("Invalid coordinate value, coordinate cannot be an array.")
            }
            ParseError::Range(range) => match &range {
                RangeError::Latitude(text) => {
                    let text = text.clone();
                    Self::out_of_range(Axis::Latitude, &text, range)
                }
                RangeError::Longitude(text) => {
                    let text = text.clone();
                    Self::out_of_range(Axis::Longitude, &text, range)
                }
                RangeError::Minutes(text) => Self::InvalidValue {
                    message: format!(
                        "Out of range minute value, minute must be between 0 and 59, got \"{text}\"."
                    ),
                    range: Some(range.clone()),
                },
                RangeError::Seconds(text) => Self::InvalidValue {
                    message: format!(
                        "Out of range second value, second must be between 0 and 59, got \"{text}\"."
                    ),
                    range: Some(range.clone()),
                },
                RangeError::Bounds { .. } => Self::InvalidValue {
                    message: range.to_string(),
                    range: Some(range),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_become_invalid_values() {
        let err = SpatialError::from(ParseError::Syntax("84:26:46Q".into()));
        assert_eq!(err.to_string(), "Invalid coordinate value, got \"84:26:46Q\".");
        assert!(err.range().is_none());

        let err = SpatialError::from(ParseError::Pair("10 20".into()));
        assert_eq!(
            err.to_string(),
            "Invalid coordinate value, coordinate cannot be an array."
        );
    }

    #[test]
    fn range_errors_keep_value_and_bounds() {
        let err = SpatialError::from(ParseError::Range(RangeError::Latitude(
            "92:26:46N".into(),
        )));
        assert_eq!(
            err.to_string(),
            "Out of range latitude value, latitude must be between -90 and 90, got \"92:26:46N\"."
        );
        let range = err.range().unwrap();
        assert_eq!(range.value(), "92:26:46N");
        assert_eq!(range.bounds(), Some((-90.0, 90.0)));

        let err = SpatialError::from(ParseError::Range(RangeError::Seconds(
            "84:23:75N".into(),
        )));
        assert_eq!(
            err.to_string(),
            "Out of range second value, second must be between 0 and 59, got \"84:23:75N\"."
        );
        assert_eq!(err.range().unwrap().bounds(), None);
    }
}

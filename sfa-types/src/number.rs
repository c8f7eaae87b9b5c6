//! Scalar values of geometry coordinates.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Numeric coordinate value.
///
/// Integers stay integers and floats stay floats, so that a coordinate is written back exactly as it was given.
/// Comparison is numeric: `Number::Int(1) == Number::Float(1.0)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// Value as `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Returns false for `NaN` and infinite values.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(v) => v.is_finite(),
        }
    }

    /// Negated value.
    pub fn negate(self) -> Self {
        match self {
            Number::Int(v) => v
                .checked_neg()
                .map(Number::Int)
                .unwrap_or(Number::Float(-(v as f64))),
            Number::Float(v) => Number::Float(-v),
        }
    }

    /// Parses a plain numeric string (`"5"`, `"-42.42"`, `"1e3"`).
    ///
    /// Degree notations are not accepted here, see [`parse_coordinate`](crate::parse_coordinate) for them.
    pub fn parse_numeric(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(v) = text.parse::<i64>() {
            return Some(Number::Int(v));
        }

        // `f64::from_str` also accepts "inf" and "NaN", which are not numbers here.
        if !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            return None;
        }

        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Number::Float)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Coordinate as given by a caller: either a number, or a text to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCoordinate {
    /// Numeric value.
    Number(Number),
    /// Text value, e.g. `"40.446"` or `"40°26′46″N"`.
    Text(String),
}

impl Display for RawCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RawCoordinate::Number(v) => write!(f, "{v}"),
            RawCoordinate::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<Number> for RawCoordinate {
    fn from(value: Number) -> Self {
        RawCoordinate::Number(value)
    }
}

impl From<i32> for RawCoordinate {
    fn from(value: i32) -> Self {
        RawCoordinate::Number(value.into())
    }
}

impl From<i64> for RawCoordinate {
    fn from(value: i64) -> Self {
        RawCoordinate::Number(value.into())
    }
}

impl From<f32> for RawCoordinate {
    fn from(value: f32) -> Self {
        RawCoordinate::Number(value.into())
    }
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value.into())
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        RawCoordinate::Text(value.to_string())
    }
}

impl From<String> for RawCoordinate {
    fn from(value: String) -> Self {
        RawCoordinate::Text(value)
    }
}

impl From<&String> for RawCoordinate {
    fn from(value: &String) -> Self {
        RawCoordinate::Text(value.clone())
    }
}

//! Parser of single coordinate strings.
//!
//! Accepted notations:
//! * plain decimals: `40.446`, `-79.982`, `42`;
//! * degrees with symbols: `42°`, `42°42'`, `40°26'46"N`, `79° 56′ 55″ W`;
//! * colon separated degrees: `40:26:46N`, `79:56:55.832W`.
//!
//! A cardinal direction (`N`, `S`, `E`, `W`) may be given before or after the value and defines its sign. A value
//! with a `N`/`S` direction cannot exceed 90 degrees, a value with `E`/`W` cannot exceed 180.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::{ParseError, RangeError};
use crate::number::Number;

lazy_static! {
    static ref COORDINATE: Regex = Regex::new(
        r#"(?x)
        ^\s*
        (?P<prefix>[NSEWnsew])?\s*
        (?P<sign>[-+])?\s*
        (?P<deg>[0-9]+(?:\.[0-9]+)?)
        (?:
            \s*(?P<mark>[°º])
            (?:
                \s*(?P<min>[0-9]+(?:\.[0-9]+)?)\s*['′]
                (?:\s*(?P<sec>[0-9]+(?:\.[0-9]+)?)\s*(?:"|″|''))?
            )?
          |
            :(?P<cmin>[0-9]+(?:\.[0-9]+)?)
            (?::(?P<csec>[0-9]+(?:\.[0-9]+)?))?
        )?
        \s*(?P<suffix>[NSEWnsew])?
        \s*$
        "#
    )
    .expect("coordinate pattern must compile");
}

/// Parses a single coordinate into a signed value in degrees.
///
/// A plain integer stays an integer; every other notation produces a float.
///
/// ```
/// use sfa_types::{parse_coordinate, Number};
///
/// let value = parse_coordinate("40°26′46″N").unwrap();
/// assert!((value.as_f64() - 40.44611111111111).abs() < 1e-12);
/// assert_eq!(parse_coordinate("-42").unwrap(), Number::Int(-42));
/// ```
pub fn parse_coordinate(text: &str) -> Result<Number, ParseError> {
    match COORDINATE.captures(text) {
        Some(caps) => from_captures(text, &caps),
        None if is_pair(text) => {
            log::trace!("coordinate {text:?} holds two values");
            Err(ParseError::Pair(text.to_string()))
        }
        None => {
            log::trace!("coordinate {text:?} matches no notation");
            Err(ParseError::Syntax(text.to_string()))
        }
    }
}

fn from_captures(text: &str, caps: &Captures) -> Result<Number, ParseError> {
    let syntax = || ParseError::Syntax(text.to_string());
    let component = |name: &str| -> Result<Option<f64>, ParseError> {
        caps.name(name)
            .map(|m| m.as_str().parse::<f64>().map_err(|_| syntax()))
            .transpose()
    };

    let cardinal = match (caps.name("prefix"), caps.name("suffix")) {
        (Some(_), Some(_)) => return Err(syntax()),
        (Some(c), None) | (None, Some(c)) => c.as_str().chars().next(),
        (None, None) => None,
    };
    let sign = caps.name("sign").map(|m| m.as_str());
    if cardinal.is_some() && sign.is_some() {
        return Err(syntax());
    }

    let minutes = component("min")?.or(component("cmin")?);
    let seconds = component("sec")?.or(component("csec")?);

    if minutes.is_some_and(|m| m >= 60.0) {
        return Err(RangeError::Minutes(text.to_string()).into());
    }
    if seconds.is_some_and(|s| s >= 60.0) {
        return Err(RangeError::Seconds(text.to_string()).into());
    }

    let deg_str = caps.name("deg").map(|m| m.as_str()).ok_or_else(&syntax)?;
    let is_plain = caps.name("mark").is_none() && minutes.is_none();
    let magnitude = match deg_str.parse::<i64>() {
        Ok(v) if is_plain => Number::Int(v),
        _ => {
            let degrees = deg_str.parse::<f64>().map_err(|_| syntax())?;
            Number::Float(degrees + minutes.unwrap_or(0.0) / 60.0 + seconds.unwrap_or(0.0) / 3600.0)
        }
    };

    match cardinal.map(|c| c.to_ascii_uppercase()) {
        Some(c @ ('N' | 'S')) if magnitude.as_f64() > 90.0 => {
            log::trace!("coordinate {text:?} exceeds latitude bounds ({c})");
            Err(RangeError::Latitude(text.to_string()).into())
        }
        Some(c @ ('E' | 'W')) if magnitude.as_f64() > 180.0 => {
            log::trace!("coordinate {text:?} exceeds longitude bounds ({c})");
            Err(RangeError::Longitude(text.to_string()).into())
        }
        Some('S' | 'W') => Ok(magnitude.negate()),
        _ if sign == Some("-") => Ok(magnitude.negate()),
        _ => Ok(magnitude),
    }
}

/// Whether the text is two coordinates separated by a comma or by whitespace.
fn is_pair(text: &str) -> bool {
    let text = text.trim();
    if let Some((left, right)) = text.split_once(',') {
        return COORDINATE.is_match(left) && COORDINATE.is_match(right);
    }

    text.char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .any(|(i, _)| COORDINATE.is_match(&text[..i]) && COORDINATE.is_match(&text[i..]))
}

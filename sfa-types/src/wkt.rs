//! Well-known text representation of geometries.
//!
//! Writing produces `KEYWORD(coordinates)`, e.g. `POLYGON((0 0,1 0,1 1,0 0))`, optionally prefixed with an SRID
//! in the extended form: `SRID=4326;POINT(1 2)`. Reading accepts both forms.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::SpatialError;
use crate::geometry::Spatial;
use crate::geometry_type::GeometryType;
use crate::line_string::Path;
use crate::number::Number;
use crate::point::Position;

lazy_static! {
    static ref EWKT: Regex = Regex::new(
        r"(?is)^\s*(?:SRID\s*=\s*(?P<srid>-?\d+)\s*;)?\s*(?P<keyword>[a-z][a-z ]*?)\s*(?P<body>\(.*\)|EMPTY)\s*$"
    )
    .expect("EWKT pattern must compile");
}

/// Coordinates of one position separated by spaces: `1 2`.
pub(crate) fn position_text(position: &[Number]) -> String {
    position
        .iter()
        .map(Number::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Positions separated by commas: `0 0,1 0,1 1`.
pub(crate) fn path_text(path: &[Position]) -> String {
    path.iter()
        .map(|p| position_text(p))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parenthesized paths separated by commas: `(0 0,1 0),(2 2,3 3)`.
pub(crate) fn paths_text(paths: &[Path]) -> String {
    paths
        .iter()
        .map(|path| format!("({})", path_text(path)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parenthesized polygons separated by commas: `((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5))`.
pub(crate) fn polygons_text(polygons: &[Vec<Path>]) -> String {
    polygons
        .iter()
        .map(|rings| format!("({})", paths_text(rings)))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn write_wkt<G: Spatial + ?Sized>(geometry: &G) -> Result<String, SpatialError> {
    let coordinates = geometry.coordinates();
    if !coordinates.is_finite() {
        return Err(SpatialError::Serialization(format!(
            "{} has non-finite coordinates",
            geometry.geometry_type()
        )));
    }

    if coordinates.has_empty_part() {
        return Err(SpatialError::Serialization(format!(
            "{} has an empty part, which has no WKT form",
            geometry.geometry_type()
        )));
    }

    let keyword = geometry.geometry_type().wkt_keyword();
    if coordinates.is_empty() {
        Ok(format!("{keyword} EMPTY"))
    } else {
        Ok(format!("{keyword}({geometry})"))
    }
}

pub(crate) fn write_ewkt<G: Spatial + ?Sized>(geometry: &G) -> Result<String, SpatialError> {
    let wkt = write_wkt(geometry)?;
    Ok(match geometry.srid() {
        Some(srid) => format!("SRID={srid};{wkt}"),
        None => wkt,
    })
}

/// Parsed WKT: geometry type, nested coordinate arrays and SRID.
pub(crate) struct WktParts {
    pub kind: GeometryType,
    pub coordinates: Value,
    pub srid: Option<i32>,
}

pub(crate) fn read_wkt(text: &str) -> Result<WktParts, SpatialError> {
    let invalid = || SpatialError::invalid(format!("Invalid WKT value, got \"{text}\"."));

    let caps = EWKT.captures(text).ok_or_else(invalid)?;
    let srid = caps
        .name("srid")
        .map(|m| m.as_str().parse::<i32>().map_err(|_| invalid()))
        .transpose()?;
    let kind = caps
        .name("keyword")
        .and_then(|m| GeometryType::from_wkt_keyword(m.as_str()))
        .ok_or_else(invalid)?;
    let body = caps.name("body").map(|m| m.as_str()).ok_or_else(invalid)?;

    let coordinates = if body.eq_ignore_ascii_case("EMPTY") {
        Value::Array(vec![])
    } else {
        let mut tokens = Tokens::new(body);
        let list = tokens.list().ok_or_else(invalid)?;
        if !tokens.is_done() {
            return Err(invalid());
        }
        list
    };

    let coordinates = match kind {
        GeometryType::Point | GeometryType::PointZ | GeometryType::PointZm => match coordinates {
            Value::Array(mut items) if items.len() == 1 => items.remove(0),
            Value::Array(items) if items.is_empty() => return Err(invalid()),
            other => other,
        },
        GeometryType::MultiPoint => unwrap_single_positions(coordinates),
        _ => coordinates,
    };

    log::trace!("read {kind} from WKT");
    Ok(WktParts {
        kind,
        coordinates,
        srid,
    })
}

/// `MULTIPOINT((0 0),(1 1))` holds each position in its own list.
fn unwrap_single_positions(coordinates: Value) -> Value {
    match coordinates {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Array(mut inner)
                        if inner.len() == 1 && matches!(inner[0], Value::Array(_)) =>
                    {
                        inner.remove(0)
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Deepest list nesting of any geometry: polygons of rings of positions.
const MAX_DEPTH: usize = 3;

/// Reader of parenthesized coordinate lists.
struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            depth: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.text[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn is_done(&mut self) -> bool {
        self.peek().is_none()
    }

    /// `( item, item, ... )`, where an item is a nested list or a position. Fails on lists nested deeper than
    /// [`MAX_DEPTH`].
    fn list(&mut self) -> Option<Value> {
        if self.depth >= MAX_DEPTH || !self.eat('(') {
            return None;
        }

        self.depth += 1;
        let list = self.items();
        self.depth -= 1;
        list
    }

    fn items(&mut self) -> Option<Value> {
        let mut items = vec![];
        loop {
            let item = if self.peek() == Some('(') {
                self.list()?
            } else {
                self.position()?
            };
            items.push(item);

            if self.eat(')') {
                return Some(Value::Array(items));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    /// Whitespace separated numbers up to the next `,` or `)`.
    fn position(&mut self) -> Option<Value> {
        self.skip_whitespace();
        let rest = &self.text[self.pos..];
        let end = rest.find([',', ')']).unwrap_or(rest.len());
        self.pos += end;

        let values = rest[..end]
            .split_whitespace()
            .map(|token| match Number::parse_numeric(token)? {
                Number::Int(v) => Some(Value::from(v)),
                Number::Float(v) => serde_json::Number::from_f64(v).map(Value::Number),
            })
            .collect::<Option<Vec<_>>>()?;

        if values.is_empty() {
            None
        } else {
            Some(Value::Array(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_helpers() {
        let path = vec![
            [Number::Int(0), Number::Int(0)],
            [Number::Float(1.5), Number::Int(-2)],
        ];
        assert_eq!(path_text(&path), "0 0,1.5 -2");
        assert_eq!(paths_text(&[path.clone(), path.clone()]), "(0 0,1.5 -2),(0 0,1.5 -2)");
        assert_eq!(polygons_text(&[vec![path]]), "((0 0,1.5 -2))");
    }

    #[test]
    fn read_point() {
        let parts = read_wkt("SRID=4326;POINT(1 2.5)").unwrap();
        assert_eq!(parts.kind, GeometryType::Point);
        assert_eq!(parts.srid, Some(4326));
        assert_eq!(parts.coordinates, json!([1, 2.5]));

        let parts = read_wkt("point z (1 2 3)").unwrap();
        assert_eq!(parts.kind, GeometryType::PointZ);
        assert_eq!(parts.coordinates, json!([1, 2, 3]));
        assert_eq!(parts.srid, None);
    }

    #[test]
    fn read_nested_lists() {
        let parts = read_wkt("POLYGON((0 0, 1 0, 1 1, 0 0), (0.2 0.2,0.3 0.2,0.2 0.2))").unwrap();
        assert_eq!(
            parts.coordinates,
            json!([[[0, 0], [1, 0], [1, 1], [0, 0]], [[0.2, 0.2], [0.3, 0.2], [0.2, 0.2]]])
        );

        let bare = read_wkt("MULTIPOINT(0 0,1 1)").unwrap();
        let wrapped = read_wkt("MULTIPOINT((0 0),(1 1))").unwrap();
        assert_eq!(bare.coordinates, wrapped.coordinates);

        let empty = read_wkt("LINESTRING EMPTY").unwrap();
        assert_eq!(empty.coordinates, json!([]));
    }

    #[test]
    fn read_errors() {
        for text in [
            "",
            "POINT",
            "POINT(1 2",
            "POINT(1 2))",
            "POINT(1 x)",
            "CIRCLE(1 2)",
            "SRID=abc;POINT(1 2)",
            "LINESTRING(0 0,,1 1)",
            "POINT()",
            "MULTIPOLYGON((((0 0))))",
        ] {
            assert!(read_wkt(text).is_err(), "{text}");
        }
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let depth = 200_000;
        let text = format!("MULTIPOLYGON{}{}", "(".repeat(depth), ")".repeat(depth));
        assert!(read_wkt(&text).is_err());

        let parts = read_wkt("MULTIPOLYGON(((0 0,1 0,1 1,0 0)))").unwrap();
        assert_eq!(parts.coordinates, json!([[[[0, 0], [1, 0], [1, 1], [0, 0]]]]));
    }
}

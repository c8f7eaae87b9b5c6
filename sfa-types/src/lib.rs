//! OGC Simple Features geometry values: points, line strings, polygons and their multi variants.
//!
//! Geometries are validated when they are built: every coordinate is checked when it is inserted, polygon rings
//! must be closed, and geodetic geometries reject longitudes outside of `[-180, 180]` and latitudes outside of
//! `[-90, 90]`. A geometry that exists is always valid, so its coordinate arrays, text, WKT and JSON forms can be
//! consumed without further checks.
//!
//! ```
//! use sfa_types::{Polygon, Spatial};
//!
//! let polygon: Polygon = Polygon::with_srid([[[0, 0], [10, 0], [10, 10], [0, 0]]], Some(4326)).unwrap();
//! assert_eq!(polygon.to_ewkt().unwrap(), "SRID=4326;POLYGON((0 0,10 0,10 10,0 0))");
//!
//! let open = Polygon::<sfa_types::Cartesian>::new([[[0, 0], [10, 0], [10, 10], [0, 10]]]);
//! assert!(open.is_err());
//! ```

mod error;
pub use error::*;

mod number;
pub use number::*;

mod parser;
pub use parser::parse_coordinate;

pub mod range;

mod geometry_type;
pub use geometry_type::*;

mod index;

mod point;
pub use point::*;

mod point_3d;
pub use point_3d::{GeographyPoint3d, Point3d, Point4d};

pub mod input;

mod multi_point;
pub use multi_point::*;

mod line_string;
pub use line_string::*;

mod polygon;
pub use polygon::*;

mod multi_line_string;
pub use multi_line_string::*;

mod multi_polygon;
pub use multi_polygon::*;

mod geometry;
pub use geometry::*;

mod wkt;

#[cfg(feature = "geo-types")]
mod geo_types;

#[cfg(feature = "geojson")]
mod geojson;

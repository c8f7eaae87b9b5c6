use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::index::resolve_index;
use crate::input::{LineInput, LinesInput};
use crate::line_string::{LineString, Path};
use crate::wkt::paths_text;

/// Ordered set of line strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString<S = Cartesian> {
    line_strings: Vec<Path>,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Multi line string in the geodetic coordinate space.
pub type GeographyMultiLineString = MultiLineString<Geodetic>;

impl<S: CoordinateSpace> MultiLineString<S> {
    /// Creates a new multi line string. Fails if any of the lines is invalid.
    pub fn new(line_strings: impl Into<LinesInput>) -> Result<Self, SpatialError> {
        Self::with_srid(line_strings, None)
    }

    /// Creates a new multi line string with the given SRID.
    pub fn with_srid(
        line_strings: impl Into<LinesInput>,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        Ok(Self::from_parts(
            line_strings
                .into()
                .into_paths::<S>(GeometryType::MultiLineString)?,
            srid,
        ))
    }

    pub(crate) fn from_parts(line_strings: Vec<Path>, srid: Option<i32>) -> Self {
        Self {
            line_strings,
            srid,
            space: PhantomData,
        }
    }

    /// Appends a line string.
    pub fn add_line_string(
        &mut self,
        line_string: impl Into<LineInput>,
    ) -> Result<&mut Self, SpatialError> {
        let path = line_string
            .into()
            .into_path::<S>(GeometryType::MultiLineString)?;
        self.line_strings.push(path);
        Ok(self)
    }

    /// Line string at the given index. Negative indices count from the end.
    pub fn line_string(&self, index: isize) -> Result<LineString<S>, SpatialError> {
        let index = resolve_index(index, self.line_strings.len())?;
        Ok(LineString::from_parts(
            self.line_strings[index].clone(),
            self.srid,
        ))
    }

    /// All line strings, carrying the SRID of the multi line string.
    pub fn line_strings(&self) -> Vec<LineString<S>> {
        self.line_strings
            .iter()
            .map(|path| LineString::from_parts(path.clone(), self.srid))
            .collect()
    }

    /// Replaces all line strings. On failure the multi line string is left unchanged.
    pub fn set_line_strings(
        &mut self,
        line_strings: impl Into<LinesInput>,
    ) -> Result<&mut Self, SpatialError> {
        self.line_strings = line_strings
            .into()
            .into_paths::<S>(GeometryType::MultiLineString)?;
        Ok(self)
    }

    /// Coordinates of the line strings.
    pub fn to_array(&self) -> Vec<Path> {
        self.line_strings.clone()
    }
}

impl<S> Deref for MultiLineString<S> {
    type Target = [Path];

    fn deref(&self) -> &Self::Target {
        &self.line_strings
    }
}

impl<S: CoordinateSpace> Spatial for MultiLineString<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
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
        Coordinates::Paths(self.to_array())
    }
}

impl<S> Display for MultiLineString<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&paths_text(&self.line_strings))
    }
}

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

/// Polygon given by a sequence of closed rings.
///
/// The first ring is the outer boundary, following rings are holes. Ring orientation is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S = Cartesian> {
    rings: Vec<Path>,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Polygon in the geodetic coordinate space.
pub type GeographyPolygon = Polygon<Geodetic>;

impl<S: CoordinateSpace> Polygon<S> {
    /// Creates a new polygon. Fails if any of the rings is invalid or is not closed.
    pub fn new(rings: impl Into<LinesInput>) -> Result<Self, SpatialError> {
        Self::with_srid(rings, None)
    }

    /// Creates a new polygon with the given SRID.
    pub fn with_srid(rings: impl Into<LinesInput>, srid: Option<i32>) -> Result<Self, SpatialError> {
        Ok(Self::from_parts(
            rings.into().into_rings::<S>(GeometryType::Polygon)?,
            srid,
        ))
    }

    pub(crate) fn from_parts(rings: Vec<Path>, srid: Option<i32>) -> Self {
        Self {
            rings,
            srid,
            space: PhantomData,
        }
    }

    /// Appends a ring. A polygon given as a ring is rejected.
    pub fn add_ring(&mut self, ring: impl Into<LineInput>) -> Result<&mut Self, SpatialError> {
        let ring = ring.into().into_ring::<S>(GeometryType::Polygon)?;
        self.rings.push(ring);
        Ok(self)
    }

    /// Ring at the given index as a line string. Negative indices count from the end.
    pub fn ring(&self, index: isize) -> Result<LineString<S>, SpatialError> {
        let index = resolve_index(index, self.rings.len())?;
        Ok(LineString::from_parts(self.rings[index].clone(), self.srid))
    }

    /// All rings as line strings, carrying the SRID of the polygon.
    pub fn rings(&self) -> Vec<LineString<S>> {
        self.rings
            .iter()
            .map(|ring| LineString::from_parts(ring.clone(), self.srid))
            .collect()
    }

    /// Replaces all rings. On failure the polygon is left unchanged.
    pub fn set_rings(&mut self, rings: impl Into<LinesInput>) -> Result<&mut Self, SpatialError> {
        self.rings = rings.into().into_rings::<S>(GeometryType::Polygon)?;
        Ok(self)
    }

    /// Coordinates of the rings.
    pub fn to_array(&self) -> Vec<Path> {
        self.rings.clone()
    }
}

impl<S> Deref for Polygon<S> {
    type Target = [Path];

    fn deref(&self) -> &Self::Target {
        &self.rings
    }
}

impl<S: CoordinateSpace> Spatial for Polygon<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
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

impl<S> Display for Polygon<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&paths_text(&self.rings))
    }
}

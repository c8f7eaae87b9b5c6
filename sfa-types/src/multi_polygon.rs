use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::SpatialError;
use crate::geometry::{Coordinates, Spatial};
use crate::geometry_type::{Cartesian, CoordinateSpace, Geodetic, GeometryType};
use crate::index::resolve_index;
use crate::input::{LinesInput, PolygonsInput};
use crate::line_string::Path;
use crate::polygon::Polygon;
use crate::wkt::polygons_text;

/// Ordered set of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon<S = Cartesian> {
    polygons: Vec<Vec<Path>>,
    srid: Option<i32>,
    space: PhantomData<S>,
}

/// Multi polygon in the geodetic coordinate space.
pub type GeographyMultiPolygon = MultiPolygon<Geodetic>;

impl<S: CoordinateSpace> MultiPolygon<S> {
    /// Creates a new multi polygon. Polygons are given as polygon values or as nested arrays of rings.
    pub fn new(polygons: impl Into<PolygonsInput>) -> Result<Self, SpatialError> {
        Self::with_srid(polygons, None)
    }

    /// Creates a new multi polygon with the given SRID.
    pub fn with_srid(
        polygons: impl Into<PolygonsInput>,
        srid: Option<i32>,
    ) -> Result<Self, SpatialError> {
        Ok(Self::from_parts(
            polygons
                .into()
                .into_polygons::<S>(GeometryType::MultiPolygon)?,
            srid,
        ))
    }

    pub(crate) fn from_parts(polygons: Vec<Vec<Path>>, srid: Option<i32>) -> Self {
        Self {
            polygons,
            srid,
            space: PhantomData,
        }
    }

    /// Appends a polygon.
    pub fn add_polygon(&mut self, polygon: impl Into<LinesInput>) -> Result<&mut Self, SpatialError> {
        let rings = polygon.into().into_rings::<S>(GeometryType::MultiPolygon)?;
        self.polygons.push(rings);
        Ok(self)
    }

    /// Polygon at the given index. Negative indices count from the end.
    pub fn polygon(&self, index: isize) -> Result<Polygon<S>, SpatialError> {
        let index = resolve_index(index, self.polygons.len())?;
        Ok(Polygon::from_parts(self.polygons[index].clone(), self.srid))
    }

    /// All polygons, carrying the SRID of the multi polygon.
    pub fn polygons(&self) -> Vec<Polygon<S>> {
        self.polygons
            .iter()
            .map(|rings| Polygon::from_parts(rings.clone(), self.srid))
            .collect()
    }

    /// Replaces all polygons. On failure the multi polygon is left unchanged.
    pub fn set_polygons(
        &mut self,
        polygons: impl Into<PolygonsInput>,
    ) -> Result<&mut Self, SpatialError> {
        self.polygons = polygons
            .into()
            .into_polygons::<S>(GeometryType::MultiPolygon)?;
        Ok(self)
    }

    /// Coordinates of the polygons.
    pub fn to_array(&self) -> Vec<Vec<Path>> {
        self.polygons.clone()
    }
}

impl<S> Deref for MultiPolygon<S> {
    type Target = [Vec<Path>];

    fn deref(&self) -> &Self::Target {
        &self.polygons
    }
}

impl<S: CoordinateSpace> Spatial for MultiPolygon<S> {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
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
        Coordinates::Polygons(self.to_array())
    }
}

impl<S> Display for MultiPolygon<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&polygons_text(&self.polygons))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn square(origin: i32, size: i32) -> Vec<[i32; 2]> {
        let (a, b) = (origin, origin + size);
        vec![[a, a], [b, a], [b, b], [a, b], [a, a]]
    }

    #[test]
    fn polygons_from_values_and_arrays() {
        let first: Polygon = Polygon::new(vec![square(0, 10), square(2, 2)]).unwrap();
        let mut multi: MultiPolygon = MultiPolygon::with_srid(vec![first.clone()], Some(4326)).unwrap();
        multi.add_polygon(vec![square(20, 5)]).unwrap();

        assert_eq!(multi.len(), 2);
        assert_eq!(
            multi.to_string(),
            "((0 0,10 0,10 10,0 10,0 0),(2 2,4 2,4 4,2 4,2 2)),((20 20,25 20,25 25,20 25,20 20))"
        );

        let polygon = multi.polygon(0).unwrap();
        assert_eq!(polygon.to_array(), first.to_array());
        assert_eq!(polygon.srid(), Some(4326));
        assert_eq!(multi.polygon(-1).unwrap(), multi.polygons()[1]);
    }

    #[test]
    fn open_ring_in_polygon() {
        let mut multi: MultiPolygon = MultiPolygon::new(vec![vec![square(0, 1)]]).unwrap();
        let err = multi
            .add_polygon(vec![vec![[0, 0], [1, 0], [1, 1]]])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid polygon, ring \"(0 0,1 0,1 1)\" is not closed"
        );
        assert!(multi
            .set_polygons(vec![vec![square(0, 1)], vec![vec![[0, 0], [1, 1]]]])
            .is_err());
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn polygon_index_out_of_range() {
        let multi: MultiPolygon = MultiPolygon::new(Vec::<Vec<Vec<[i32; 2]>>>::new()).unwrap();
        assert!(multi.is_empty());
        assert_matches!(
            multi.polygon(-1),
            Err(SpatialError::IndexOutOfRange { index: -1, len: 0 })
        );
    }
}

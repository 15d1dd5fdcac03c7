//! access to the cell grid
//!
use std::fmt::Display;
use std::hash::Hash;

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use h3o::geom::{ToCells, ToGeo};
use h3o::{CellIndex, LatLng, Resolution};

use crate::error::Error;

/// The operations of a hierarchical hexagonal grid the conversions depend on.
///
/// All coordinates are WGS84 degrees with `x` being the longitude and `y` being
/// the latitude.
pub trait CellGrid {
    /// identifier of a single cell. The `Display` form is used as the
    /// `id` of generated geojson features.
    type Cell: Clone + Eq + Hash + Display;

    /// cells whose center is located within the polygon. Holes are excluded.
    fn polygon_to_cells(
        &self,
        polygon: &Polygon<f64>,
        resolution: Resolution,
    ) -> Result<Vec<Self::Cell>, Error>;

    /// the cell containing the coordinate
    fn coordinate_to_cell(
        &self,
        coord: Coord<f64>,
        resolution: Resolution,
    ) -> Result<Self::Cell, Error>;

    /// the closed boundary ring of a cell
    fn cell_to_boundary(&self, cell: &Self::Cell) -> Result<LineString<f64>, Error>;

    /// merges the cells into the outlines of the area they cover.
    ///
    /// Gaps inside the covered area are returned as holes.
    fn cells_to_outlines(&self, cells: &[Self::Cell]) -> Result<MultiPolygon<f64>, Error>;
}

/// [`CellGrid`] for the H3 grid
#[derive(Debug, Clone, Copy, Default)]
pub struct H3oGrid;

impl CellGrid for H3oGrid {
    type Cell = CellIndex;

    fn polygon_to_cells(
        &self,
        polygon: &Polygon<f64>,
        resolution: Resolution,
    ) -> Result<Vec<Self::Cell>, Error> {
        // the default containment mode only includes cells with their centroid
        // inside the polygon
        Ok(h3o::geom::Polygon::from_degrees(polygon.clone())?
            .to_cells(resolution)
            .collect())
    }

    fn coordinate_to_cell(
        &self,
        coord: Coord<f64>,
        resolution: Resolution,
    ) -> Result<Self::Cell, Error> {
        Ok(LatLng::try_from(coord)?.to_cell(resolution))
    }

    fn cell_to_boundary(&self, cell: &Self::Cell) -> Result<LineString<f64>, Error> {
        let mut ring = LineString::from(
            cell.boundary()
                .iter()
                .copied()
                .map(Coord::from)
                .collect::<Vec<_>>(),
        );
        ring.close();
        Ok(ring)
    }

    fn cells_to_outlines(&self, cells: &[Self::Cell]) -> Result<MultiPolygon<f64>, Error> {
        Ok(cells.iter().copied().to_geom(true)?)
    }
}

/// parse the hexadecimal string representation of a H3 cell
pub fn parse_cell(s: &str) -> Result<CellIndex, Error> {
    let value = u64::from_str_radix(s.trim(), 16)
        .map_err(|_| Error::InvalidCellString(s.to_string()))?;
    Ok(CellIndex::try_from(value)?)
}

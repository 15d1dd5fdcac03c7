//! a square lattice grid for tests.
//!
//! Cell `(i, j)` has its center at the integer coordinate `(i, j)` and spans
//! one unit in both directions. The resolution is ignored.
use std::collections::{HashSet, VecDeque};
use std::fmt;

use geo_types::{coord, Coord, LineString, MultiPolygon, Polygon, Rect};
use h3o::Resolution;

use crate::error::Error;
use crate::grid::CellGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareCell(pub i64, pub i64);

impl fmt::Display for SquareCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

#[derive(Debug, Default)]
pub struct SquareGrid;

fn cell_rect(cell: &SquareCell) -> Rect<f64> {
    let (x, y) = (cell.0 as f64, cell.1 as f64);
    Rect::new(
        coord! { x: x - 0.5, y: y - 0.5 },
        coord! { x: x + 0.5, y: y + 0.5 },
    )
}

impl CellGrid for SquareGrid {
    type Cell = SquareCell;

    /// lattice points strictly inside the bounding box of the exterior ring
    fn polygon_to_cells(
        &self,
        polygon: &Polygon<f64>,
        _resolution: Resolution,
    ) -> Result<Vec<Self::Cell>, Error> {
        let coords = &polygon.exterior().0;
        if coords.is_empty() {
            return Ok(vec![]);
        }
        let (mut min, mut max) = (coords[0], coords[0]);
        for c in coords.iter() {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        let mut cells = vec![];
        for i in (min.x.floor() as i64)..=(max.x.ceil() as i64) {
            for j in (min.y.floor() as i64)..=(max.y.ceil() as i64) {
                let (x, y) = (i as f64, j as f64);
                if x > min.x && x < max.x && y > min.y && y < max.y {
                    cells.push(SquareCell(i, j));
                }
            }
        }
        Ok(cells)
    }

    fn coordinate_to_cell(
        &self,
        coord: Coord<f64>,
        _resolution: Resolution,
    ) -> Result<Self::Cell, Error> {
        Ok(SquareCell(coord.x.round() as i64, coord.y.round() as i64))
    }

    fn cell_to_boundary(&self, cell: &Self::Cell) -> Result<LineString<f64>, Error> {
        let (exterior, _) = cell_rect(cell).to_polygon().into_inner();
        Ok(exterior)
    }

    /// one rectangle per group of edge-connected cells
    fn cells_to_outlines(&self, cells: &[Self::Cell]) -> Result<MultiPolygon<f64>, Error> {
        let mut remaining: HashSet<SquareCell> = cells.iter().copied().collect();
        let mut polygons = vec![];
        for start in cells {
            if !remaining.remove(start) {
                continue;
            }
            let mut bounds = cell_rect(start);
            let mut queue = VecDeque::from([*start]);
            while let Some(cell) = queue.pop_front() {
                let r = cell_rect(&cell);
                bounds = Rect::new(
                    coord! { x: bounds.min().x.min(r.min().x), y: bounds.min().y.min(r.min().y) },
                    coord! { x: bounds.max().x.max(r.max().x), y: bounds.max().y.max(r.max().y) },
                );
                for neighbor in [
                    SquareCell(cell.0 - 1, cell.1),
                    SquareCell(cell.0 + 1, cell.1),
                    SquareCell(cell.0, cell.1 - 1),
                    SquareCell(cell.0, cell.1 + 1),
                ] {
                    if remaining.remove(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            polygons.push(bounds.to_polygon());
        }
        Ok(MultiPolygon::new(polygons))
    }
}

/// geojson rings of a rectangle
pub fn rect_rings(min: (f64, f64), max: (f64, f64)) -> Vec<Vec<Vec<f64>>> {
    vec![vec![
        vec![min.0, min.1],
        vec![max.0, min.1],
        vec![max.0, max.1],
        vec![min.0, max.1],
        vec![min.0, min.1],
    ]]
}

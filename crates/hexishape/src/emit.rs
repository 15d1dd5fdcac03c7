//! cells to geojson
//!
use geo_types::LineString;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, PolygonType, Value};

use crate::error::Error;
use crate::grid::CellGrid;
use crate::util::flatten;

fn build_feature(value: Value, id: Option<Id>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn ring_positions(ring: &LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn cell_polygon<G: CellGrid>(grid: &G, cell: &G::Cell) -> Result<PolygonType, Error> {
    Ok(vec![ring_positions(&grid.cell_to_boundary(cell)?)])
}

/// `Feature` with the `Polygon` outline of a single cell.
///
/// The `id` of the feature is the string representation of the cell.
pub fn cell_to_feature<G: CellGrid>(
    grid: &G,
    cell: &G::Cell,
    properties: JsonObject,
) -> Result<Feature, Error> {
    Ok(build_feature(
        Value::Polygon(cell_polygon(grid, cell)?),
        Some(Id::String(cell.to_string())),
        properties,
    ))
}

/// `Feature` with the merged outline of the area covered by all `cells`.
///
/// Multiple outlines result in a `MultiPolygon`, a single outline is returned
/// as `Polygon`. Without any cells the geometry is a `Polygon` without coordinates.
pub fn cell_set_to_feature<G: CellGrid>(
    grid: &G,
    cells: &[G::Cell],
    properties: JsonObject,
) -> Result<Feature, Error> {
    let cells = flatten([cells.iter().cloned()]);
    let value = if cells.is_empty() {
        Value::Polygon(vec![])
    } else {
        let mut outlines = grid.cells_to_outlines(&cells)?;
        match outlines.0.len() {
            0 => Value::Polygon(vec![]),
            1 => Value::from(&outlines.0.remove(0)),
            _ => Value::from(&outlines),
        }
    };
    Ok(build_feature(value, None, properties))
}

/// `Feature` with a `MultiPolygon` containing the outline of each cell.
///
/// In contrast to [`cell_set_to_feature`] neighboring cells are not merged and
/// a single cell still results in a `MultiPolygon`.
pub fn cell_set_to_multi_polygon_feature<G: CellGrid>(
    grid: &G,
    cells: &[G::Cell],
    properties: JsonObject,
) -> Result<Feature, Error> {
    let polygons = cells
        .iter()
        .map(|cell| cell_polygon(grid, cell))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(build_feature(Value::MultiPolygon(polygons), None, properties))
}

/// `FeatureCollection` with one feature per cell as created by [`cell_to_feature`].
///
/// The order of `cells` is kept. `properties` gets called for each cell, without it
/// all features get empty properties.
pub fn cell_set_to_feature_collection<G, F>(
    grid: &G,
    cells: &[G::Cell],
    properties: Option<F>,
) -> Result<FeatureCollection, Error>
where
    G: CellGrid,
    F: Fn(&G::Cell) -> JsonObject,
{
    let features = cells
        .iter()
        .map(|cell| {
            let props = properties.as_ref().map(|f| f(cell)).unwrap_or_default();
            cell_to_feature(grid, cell, props)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

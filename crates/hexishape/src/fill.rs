//! geojson (multi-)polygons to cells
//!
use geo_types::{Coord, LineString, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, PolygonType, Value};
use h3o::Resolution;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::Error;
use crate::grid::CellGrid;
use crate::util::{centroid, flatten};

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillOptions {
    /// use the cell containing the centroid of a polygon in case the polygon
    /// is too small to contain the center of any cell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ensure_output: bool,
}

impl FillOptions {
    pub fn ensure_output(mut self, ensure_output: bool) -> Self {
        self.ensure_output = ensure_output;
        self
    }
}

/// Cells at `resolution` covering a `Feature` or `FeatureCollection` with
/// `Polygon` or `MultiPolygon` geometries.
///
/// The returned cells are free of duplicates and ordered by their first occurrence.
pub fn fill_set<G: CellGrid>(
    grid: &G,
    geojson: &GeoJson,
    resolution: Resolution,
    options: FillOptions,
) -> Result<Vec<G::Cell>, Error> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fill_feature_collection(grid, fc, resolution, options),
        GeoJson::Feature(feature) => fill_feature(grid, feature, resolution, options),
        GeoJson::Geometry(_) => Err(Error::UnsupportedFeatureType("Geometry".to_string())),
    }
}

/// Same as [`fill_set`], but dispatching on the `type` member of untyped json.
///
/// A `FeatureCollection` lacking its `features` is rejected with
/// [`Error::MissingFeatures`], an empty `features` array results in no cells.
pub fn fill_json<G: CellGrid>(
    grid: &G,
    json: JsonValue,
    resolution: Resolution,
    options: FillOptions,
) -> Result<Vec<G::Cell>, Error> {
    let mut object = match json {
        JsonValue::Object(object) => object,
        other => return Err(Error::UnsupportedFeatureType(json_kind(&other).to_string())),
    };
    let feature_type = match object.get("type") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => return Err(Error::UnsupportedFeatureType(json_kind(other).to_string())),
        None => return Err(Error::UnsupportedFeatureType(String::new())),
    };

    match feature_type.as_str() {
        "FeatureCollection" => match object.remove("features") {
            Some(JsonValue::Array(features)) => {
                let cell_sets = features
                    .into_iter()
                    .map(|feature| fill_json(grid, feature, resolution, options))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(flatten(cell_sets))
            }
            _ => Err(Error::MissingFeatures),
        },
        "Feature" => fill_feature(
            grid,
            &Feature::from_json_object(object)?,
            resolution,
            options,
        ),
        _ => Err(Error::UnsupportedFeatureType(feature_type)),
    }
}

pub fn fill_feature_collection<G: CellGrid>(
    grid: &G,
    fc: &FeatureCollection,
    resolution: Resolution,
    options: FillOptions,
) -> Result<Vec<G::Cell>, Error> {
    let cell_sets = fc
        .features
        .iter()
        .map(|feature| fill_feature(grid, feature, resolution, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(flatten(cell_sets))
}

pub fn fill_feature<G: CellGrid>(
    grid: &G,
    feature: &Feature,
    resolution: Resolution,
    options: FillOptions,
) -> Result<Vec<G::Cell>, Error> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| Error::UnsupportedGeometryType("null".to_string()))?;

    // a polygon is handled as a multipolygon with a single member
    let polygons: Vec<&PolygonType> = match &geometry.value {
        Value::Polygon(rings) => vec![rings],
        Value::MultiPolygon(polygons) => polygons.iter().collect(),
        other => {
            return Err(Error::UnsupportedGeometryType(
                geometry_type_name(other).to_string(),
            ))
        }
    };

    let cell_sets = polygons
        .into_iter()
        .map(|rings| fill_polygon(grid, rings, resolution, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(flatten(cell_sets))
}

fn fill_polygon<G: CellGrid>(
    grid: &G,
    rings: &PolygonType,
    resolution: Resolution,
    options: FillOptions,
) -> Result<Vec<G::Cell>, Error> {
    let mut rings = rings
        .iter()
        .map(|ring| to_linestring(ring))
        .collect::<Result<Vec<_>, _>>()?;
    if rings.is_empty() {
        return Ok(vec![]);
    }

    let seed = if options.ensure_output {
        centroid(&rings)
    } else {
        None
    };

    let exterior = rings.remove(0);
    // rings with less than four positions can not enclose any cell center
    let cells = if exterior.0.len() < 4 {
        vec![]
    } else {
        grid.polygon_to_cells(&Polygon::new(exterior, rings), resolution)?
    };

    match seed {
        Some(coord) if cells.is_empty() => {
            debug!(
                "polygon contains no cell centers at resolution {}, using the cell at its centroid ({}, {})",
                resolution, coord.x, coord.y
            );
            Ok(vec![grid.coordinate_to_cell(coord, resolution)?])
        }
        _ => Ok(cells),
    }
}

fn to_linestring(positions: &[Vec<f64>]) -> Result<LineString<f64>, Error> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(Error::InvalidPosition(position.len())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::from)
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#![warn(
    clippy::all,
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    nonstandard_style
)]

//! Conversion between geojson polygon geometries and sets of hexagonal grid cells.
//!
//! The `fill` direction approximates (multi-)polygons by the cells whose centers
//! are located within them, the `emit` direction turns cells back into geojson
//! features. The grid itself is accessed through the [`grid::CellGrid`] trait,
//! [`grid::H3oGrid`] implements it for H3 using the `h3o` crate.

pub mod emit;
pub mod error;
pub mod fill;
pub mod grid;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use emit::{
    cell_set_to_feature, cell_set_to_feature_collection, cell_set_to_multi_polygon_feature,
    cell_to_feature,
};
pub use error::Error;
pub use fill::{fill_feature, fill_feature_collection, fill_json, fill_set, FillOptions};
pub use grid::{parse_cell, CellGrid, H3oGrid};

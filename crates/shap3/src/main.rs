use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use geojson::{GeoJson, JsonObject};
use h3o::CellIndex;
use hexishape::{
    cell_set_to_feature, cell_set_to_feature_collection, cell_set_to_multi_polygon_feature,
    fill_json, H3oGrid,
};
use mimalloc::MiMalloc;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::config::{Config, EmitConfig, EmitMode};
use crate::io::{parse_cells, read_input};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod build_info;
mod config;
mod io;

const SC_FILL: &str = "fill";
const SC_TO_GEOJSON: &str = "to-geojson";

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let config_arg = Arg::new("config")
        .short('c')
        .long("config")
        .help("YAML configuration file")
        .num_args(1);

    let app = Command::new(env!("CARGO_PKG_NAME"))
        .version(build_info::version())
        .long_version(build_info::long_version())
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand_required(true)
        .subcommand(
            Command::new(SC_FILL)
                .about("Fill geojson (multi-)polygons with h3 cells")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("h3_resolution")
                        .short('r')
                        .long("resolution")
                        .num_args(1),
                )
                .arg(
                    Arg::new("ensure_output")
                        .long("ensure-output")
                        .help("use the cell at the centroid for polygons too small to contain any cell")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("lines")
                        .long("lines")
                        .help("print one cell per line instead of a json array")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("INPUT")
                        .help("geojson file, '-' reads from stdin")
                        .default_value("-"),
                ),
        )
        .subcommand(
            Command::new(SC_TO_GEOJSON)
                .about("Convert h3 cells to geojson")
                .arg(config_arg)
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .help("merged, multipolygon or collection")
                        .num_args(1),
                )
                .arg(
                    Arg::new("INPUT")
                        .help("file with cells, '-' reads from stdin")
                        .default_value("-"),
                ),
        );

    let outcome = dispatch_command(app.get_matches());
    if let Err(e) = outcome.as_ref() {
        if let Some(e) = e.downcast_ref::<hexishape::Error>() {
            if e.is_invalid_input() {
                warn!("rejected input: {}", e);
            }
        }
    }
    outcome
}

fn dispatch_command(matches: ArgMatches) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    match matches.subcommand() {
        Some((SC_FILL, sc_matches)) => subcommand_fill(sc_matches, &mut writer)?,
        Some((SC_TO_GEOJSON, sc_matches)) => subcommand_to_geojson(sc_matches, &mut writer)?,
        _ => unreachable!("subcommand is required"),
    }
    writer.flush()?;
    Ok(())
}

fn load_config(sc_matches: &ArgMatches) -> Result<Config> {
    match sc_matches.get_one::<String>("config") {
        Some(path) => Config::from_file(Path::new(path)),
        None => Ok(Config::default()),
    }
}

fn subcommand_fill<W: Write>(sc_matches: &ArgMatches, writer: &mut W) -> Result<()> {
    let mut config = load_config(sc_matches)?;
    if let Some(r) = sc_matches.get_one::<String>("h3_resolution") {
        config.fill.resolution = Some(r.parse()?);
    }
    if sc_matches.get_flag("ensure_output") {
        config.fill.options.ensure_output = true;
    }
    config.validate()?;

    let input = sc_matches
        .get_one::<String>("INPUT")
        .map(String::as_str)
        .unwrap_or("-");
    let geojson: JsonValue = serde_json::from_str(&read_input(input)?)?;
    fill(
        geojson,
        &config,
        sc_matches.get_flag("lines"),
        writer,
    )
}

fn fill<W: Write>(geojson: JsonValue, config: &Config, lines: bool, writer: &mut W) -> Result<()> {
    let resolution = config.resolution()?;
    let cells = fill_json(&H3oGrid, geojson, resolution, config.fill.options)?;
    info!(
        "Filled geometries with {} cells at resolution {}",
        cells.len(),
        resolution
    );

    if lines {
        for cell in cells.iter() {
            writeln!(writer, "{cell}")?;
        }
    } else {
        let strings: Vec<_> = cells.iter().map(ToString::to_string).collect();
        serde_json::to_writer(&mut *writer, &strings)?;
        writeln!(writer)?;
    }
    Ok(())
}

fn subcommand_to_geojson<W: Write>(sc_matches: &ArgMatches, writer: &mut W) -> Result<()> {
    let mut config = load_config(sc_matches)?;
    if let Some(mode) = sc_matches.get_one::<String>("mode") {
        config.emit.mode = EmitMode::try_from(mode.as_str())?;
    }
    config.validate()?;

    let input = sc_matches
        .get_one::<String>("INPUT")
        .map(String::as_str)
        .unwrap_or("-");
    let cells = parse_cells(&read_input(input)?)?;
    info!("Read {} cells", cells.len());
    to_geojson(&cells, &config.emit, writer)
}

fn to_geojson<W: Write>(cells: &[CellIndex], config: &EmitConfig, writer: &mut W) -> Result<()> {
    let geojson = match config.mode {
        EmitMode::Merged => GeoJson::Feature(cell_set_to_feature(
            &H3oGrid,
            cells,
            config.properties.clone(),
        )?),
        EmitMode::MultiPolygon => GeoJson::Feature(cell_set_to_multi_polygon_feature(
            &H3oGrid,
            cells,
            config.properties.clone(),
        )?),
        EmitMode::Collection => {
            let cell_properties = |cell: &CellIndex| -> JsonObject {
                let mut properties = config.properties.clone();
                if let Some(name) = config.cell_property.as_ref() {
                    properties.insert(name.clone(), JsonValue::String(cell.to_string()));
                }
                properties
            };
            GeoJson::FeatureCollection(cell_set_to_feature_collection(
                &H3oGrid,
                cells,
                Some(cell_properties),
            )?)
        }
    };
    writer.write_all(geojson.to_string().as_bytes())?;
    writeln!(writer)?;
    Ok(())
}

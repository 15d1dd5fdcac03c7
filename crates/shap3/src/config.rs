use std::path::Path;

use anyhow::Context;
use geojson::JsonObject;
use h3o::Resolution;
use hexishape::FillOptions;
use serde::Deserialize;

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// a single feature with the merged outline of all cells
    #[default]
    Merged,

    /// a single multipolygon feature with the outline of each cell
    MultiPolygon,

    /// a featurecollection with one feature per cell
    Collection,
}

impl TryFrom<&str> for EmitMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "merged" => Ok(Self::Merged),
            "multipolygon" => Ok(Self::MultiPolygon),
            "collection" => Ok(Self::Collection),
            _ => Err(anyhow::anyhow!("unknown emit mode: {value}")),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct FillConfig {
    /// h3 resolution to fill geometries at
    pub resolution: Option<u8>,

    #[serde(flatten)]
    pub options: FillOptions,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct EmitConfig {
    #[serde(default)]
    pub mode: EmitMode,

    /// properties attached to the generated features
    #[serde(default)]
    pub properties: JsonObject,

    /// name of the property to store the cell in when emitting
    /// a featurecollection
    pub cell_property: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub fill: FillConfig,

    #[serde(default)]
    pub emit: EmitConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(r) = self.fill.resolution {
            Resolution::try_from(r)?;
        }
        if let Some(name) = self.emit.cell_property.as_ref() {
            if name.is_empty() {
                anyhow::bail!("cell_property must not be empty");
            }
        }
        Ok(())
    }

    pub fn resolution(&self) -> anyhow::Result<Resolution> {
        let r = self
            .fill
            .resolution
            .ok_or_else(|| anyhow::anyhow!("no h3 resolution given"))?;
        Ok(Resolution::try_from(r)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported feature type: {0:?}")]
    UnsupportedFeatureType(String),

    #[error("unsupported geometry type: {0:?}")]
    UnsupportedGeometryType(String),

    #[error("featurecollection without features")]
    MissingFeatures,

    #[error("invalid position: expected at least two ordinates, found {0}")]
    InvalidPosition(usize),

    #[error("not a hexadecimal cell string: {0:?}")]
    InvalidCellString(String),

    #[error(transparent)]
    InvalidCellIndex(#[from] h3o::error::InvalidCellIndex),

    #[error(transparent)]
    InvalidResolution(#[from] h3o::error::InvalidResolution),

    #[error(transparent)]
    InvalidLatLng(#[from] h3o::error::InvalidLatLng),

    #[error(transparent)]
    InvalidGeometry(#[from] h3o::error::InvalidGeometry),

    #[error(transparent)]
    OutlinerError(#[from] h3o::error::OutlinerError),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),
}

impl Error {
    /// errors caused by the structure of the input geojson
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFeatureType(_)
                | Self::UnsupportedGeometryType(_)
                | Self::MissingFeatures
                | Self::InvalidPosition(_)
                | Self::GeoJson(_)
        )
    }
}

pub mod app_config;
pub mod config;
pub mod filter;
pub mod geo;
pub mod pantry;
pub mod views;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{FilterState, ParseFilterError, SortKey, StatusFilter};
pub use geo::{haversine_miles, miles_to_meters, Coordinate, LatLngBounds, EARTH_RADIUS_MILES};
pub use pantry::{
    PantryRecord, PantryStatus, ADDRESS_PLACEHOLDER, NEVER_PLACEHOLDER, UNKNOWN_PLACEHOLDER,
};
pub use views::{load_views, resolve_view, MarkerStyle, ViewPreset, ViewsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read views file {path}: {source}")]
    ViewsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse views file: {0}")]
    ViewsFileParse(#[from] serde_yaml::Error),

    #[error("views validation failed: {0}")]
    Validation(String),

    #[error("unknown view preset: {0}")]
    UnknownView(String),
}

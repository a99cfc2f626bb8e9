//! Shared domain types and configuration for the listing front end.
//!
//! Everything here is a plain value: coordinates, the province/city/district
//! hierarchy, the location slice of a listing record, and the env-driven
//! [`AppConfig`].

mod app_config;
mod config;
pub mod geo;
pub mod listing;
pub mod region;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Coordinate, LocationPickerSeed, DEFAULT_COORDINATE};
pub use listing::{
    Listing, ListingAttributes, ListingLocationFields, ListingPayload, ListingStatus,
};
pub use region::{RegionNode, RegionSelection, RegionTree, TreeShape};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

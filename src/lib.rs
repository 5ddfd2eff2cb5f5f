pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};
pub use crate::config::file::FileConfig;

pub use crate::adapters::{HttpStore, JsonFileStore};
pub use crate::core::compare::ComparisonEngine;
pub use crate::core::directory::LocationDirectory;
pub use crate::core::scoring::classify;
pub use crate::domain::model::{
    AirQualityRecord, ComparisonResult, LocationRecord, NeighborhoodScore, PollutantReading,
    Pollutants, PollutionScore,
};
pub use crate::domain::ports::{AirQualityStore, ConfigProvider};
pub use crate::utils::error::{BreatheError, Result};

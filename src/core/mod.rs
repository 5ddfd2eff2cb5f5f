pub mod compare;
pub mod directory;
pub mod scoring;

pub use crate::domain::model::{
    AirQualityRecord, ComparisonResult, LocationRecord, NeighborhoodScore, PollutantReading,
    Pollutants, PollutionScore,
};
pub use crate::domain::ports::{AirQualityStore, ConfigProvider};
pub use crate::utils::error::Result;

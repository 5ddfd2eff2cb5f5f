use crate::core::{AirQualityRecord, AirQualityStore, PollutantReading};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// File-backed record store: a JSON array of air-quality documents loaded
/// once and queried in memory. Used for offline operation and tests.
pub struct JsonFileStore {
    records: Vec<AirQualityRecord>,
}

impl JsonFileStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)?;
        let records: Vec<AirQualityRecord> = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded {} air quality records", records.len());
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<AirQualityRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AirQualityStore for JsonFileStore {
    // borough and neighborhood match case-insensitively, year exactly
    async fn find_reading(
        &self,
        borough: &str,
        neighborhood: &str,
        year: i32,
    ) -> Result<Option<PollutantReading>> {
        let borough = borough.trim();
        let neighborhood = neighborhood.trim();

        let reading = self
            .records
            .iter()
            .find(|record| {
                record.year == year
                    && record.borough.trim().eq_ignore_ascii_case(borough)
                    && record.neighborhood.trim().eq_ignore_ascii_case(neighborhood)
            })
            .map(|record| PollutantReading {
                pm25: record.pollutants.pm2_5,
                no2: record.pollutants.no2,
            });

        Ok(reading)
    }
}

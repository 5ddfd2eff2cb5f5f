use crate::core::{AirQualityRecord, AirQualityStore, PollutantReading};
use crate::utils::error::{BreatheError, Result};
use crate::utils::validation;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Record store reached over HTTP: one GET per lookup against a document
/// endpoint, with the per-request timeout applied at the client. A 404 or
/// a JSON `null` body means no document for that query.
pub struct HttpStore {
    client: Client,
    endpoint: String,
}

impl HttpStore {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        validation::validate_url("store.endpoint", endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BreatheError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    async fn fetch_once(
        &self,
        borough: &str,
        neighborhood: &str,
        year: i32,
    ) -> Result<Option<PollutantReading>> {
        tracing::debug!("GET {} for {}, {} ({})", self.endpoint, neighborhood, borough, year);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("borough", borough), ("neighborhood", neighborhood)])
            .query(&[("year", year)])
            .send()
            .await
            .map_err(|e| BreatheError::UpstreamUnavailable {
                message: format!("air quality store request failed: {}", e),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(BreatheError::UpstreamUnavailable {
                message: format!(
                    "air quality store returned status {}",
                    response.status()
                ),
            });
        }

        let record: Option<AirQualityRecord> =
            response
                .json()
                .await
                .map_err(|e| BreatheError::UpstreamUnavailable {
                    message: format!("air quality store returned a malformed document: {}", e),
                })?;

        Ok(record.map(|record| PollutantReading {
            pm25: record.pollutants.pm2_5,
            no2: record.pollutants.no2,
        }))
    }
}

#[async_trait]
impl AirQualityStore for HttpStore {
    async fn find_reading(
        &self,
        borough: &str,
        neighborhood: &str,
        year: i32,
    ) -> Result<Option<PollutantReading>> {
        match self.fetch_once(borough, neighborhood, year).await {
            Err(e) if e.is_transient() => {
                tracing::warn!("Retrying after transient store error: {}", e);
                self.fetch_once(borough, neighborhood, year).await
            }
            other => other,
        }
    }
}

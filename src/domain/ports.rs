use crate::domain::model::PollutantReading;
use crate::utils::error::Result;
use async_trait::async_trait;

/// External document store holding air-quality readings. `Ok(None)` means
/// no document for that (borough, neighborhood, year); transport and
/// availability failures are `Err(UpstreamUnavailable)`.
#[async_trait]
pub trait AirQualityStore: Send + Sync {
    async fn find_reading(
        &self,
        borough: &str,
        neighborhood: &str,
        year: i32,
    ) -> Result<Option<PollutantReading>>;
}

pub trait ConfigProvider: Send + Sync {
    fn geojson_path(&self) -> &str;
    fn data_year(&self) -> i32;
    fn request_timeout_secs(&self) -> u64;
}

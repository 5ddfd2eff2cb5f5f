use crate::core::directory::LocationDirectory;
use crate::core::scoring::classify;
use crate::core::{AirQualityStore, ComparisonResult, ConfigProvider, NeighborhoodScore};
use crate::utils::error::{BreatheError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Composes the location directory, the record store, and the classifier
/// to answer score and comparison queries. Owns no persistent state of
/// its own; the directory is shared read-only.
pub struct ComparisonEngine<S: AirQualityStore + ?Sized, C: ConfigProvider> {
    directory: Arc<LocationDirectory>,
    store: Arc<S>,
    config: C,
}

impl<S, C> ComparisonEngine<S, C>
where
    S: AirQualityStore + ?Sized + 'static,
    C: ConfigProvider,
{
    pub fn new(directory: Arc<LocationDirectory>, store: Arc<S>, config: C) -> Self {
        Self {
            directory,
            store,
            config,
        }
    }

    /// Full lookup for a single neighborhood: resolve, fetch the stored
    /// reading for the configured year, classify.
    pub async fn score(&self, raw_name: &str) -> Result<NeighborhoodScore> {
        lookup_score(
            &self.directory,
            Arc::clone(&self.store),
            raw_name,
            self.config.data_year(),
            self.request_timeout(),
        )
        .await
    }

    /// Per-name results for a batch of neighborhood names, same length and
    /// order as the input. Names are processed independently and
    /// concurrently; a failure for one name becomes a `success: false`
    /// entry and never aborts the rest.
    pub async fn compare(&self, raw_names: &[String]) -> Result<Vec<ComparisonResult>> {
        if raw_names.is_empty() {
            return Err(BreatheError::InvalidArgument {
                message: "at least one neighborhood name must be supplied".to_string(),
            });
        }

        let year = self.config.data_year();
        let request_timeout = self.request_timeout();

        let mut handles = Vec::with_capacity(raw_names.len());
        for raw_name in raw_names {
            let directory = Arc::clone(&self.directory);
            let store = Arc::clone(&self.store);
            let name = raw_name.clone();

            handles.push((
                raw_name.clone(),
                tokio::spawn(async move {
                    let outcome =
                        lookup_score(&directory, store, &name, year, request_timeout).await;
                    match outcome {
                        Ok(score) => ComparisonResult::success(name, score),
                        Err(e) => ComparisonResult::failure(name, e.to_string()),
                    }
                }),
            ));
        }

        // join in submission order so the output ordering matches the
        // input regardless of completion order
        let mut results = Vec::with_capacity(handles.len());
        for (input_name, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!("Comparison task for '{}' failed: {}", input_name, e);
                    results.push(ComparisonResult::failure(
                        input_name,
                        format!("comparison task failed: {}", e),
                    ));
                }
            }
        }

        Ok(results)
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs())
    }
}

async fn lookup_score<S: AirQualityStore + ?Sized>(
    directory: &LocationDirectory,
    store: Arc<S>,
    raw_name: &str,
    year: i32,
    request_timeout: Duration,
) -> Result<NeighborhoodScore> {
    let location = directory.resolve(raw_name)?;

    tracing::debug!(
        "Fetching air quality reading for {}, {} ({})",
        location.neighborhood,
        location.borough,
        year
    );

    let reading = match timeout(
        request_timeout,
        store.find_reading(&location.borough, &location.neighborhood, year),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => {
            return Err(BreatheError::UpstreamUnavailable {
                message: format!(
                    "air quality lookup timed out for {}, {}",
                    location.neighborhood, location.borough
                ),
            })
        }
    };

    let reading = reading.ok_or_else(|| BreatheError::NotFound {
        message: format!(
            "no air quality reading for {}, {} in {}",
            location.neighborhood, location.borough, year
        ),
    })?;

    let overall_risk = classify(reading.pm25, reading.no2)?;

    Ok(NeighborhoodScore {
        neighborhood: location.neighborhood,
        borough: location.borough,
        pm25: reading.pm25,
        no2: reading.no2,
        overall_risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PollutantReading, PollutionScore};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockStore {
        readings: HashMap<String, PollutantReading>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                readings: HashMap::new(),
                fail: false,
                delay: None,
            }
        }

        fn with_reading(mut self, neighborhood: &str, pm25: f64, no2: f64) -> Self {
            self.readings
                .insert(neighborhood.to_lowercase(), PollutantReading { pm25, no2 });
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl AirQualityStore for MockStore {
        async fn find_reading(
            &self,
            _borough: &str,
            neighborhood: &str,
            _year: i32,
        ) -> crate::utils::error::Result<Option<PollutantReading>> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(BreatheError::UpstreamUnavailable {
                    message: "store connection refused".to_string(),
                });
            }
            Ok(self.readings.get(&neighborhood.to_lowercase()).copied())
        }
    }

    struct MockConfig {
        year: i32,
        timeout_secs: u64,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                year: 2023,
                timeout_secs: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn geojson_path(&self) -> &str {
            "unused"
        }

        fn data_year(&self) -> i32 {
            self.year
        }

        fn request_timeout_secs(&self) -> u64 {
            self.timeout_secs
        }
    }

    fn directory() -> Arc<LocationDirectory> {
        let geojson = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                { "properties": { "ntaname": "Harlem", "boro_name": "Manhattan" } },
                { "properties": { "ntaname": "Astoria", "boro_name": "Queens" } }
            ]
        });
        Arc::new(LocationDirectory::from_geojson(&geojson).unwrap())
    }

    fn engine(store: MockStore) -> ComparisonEngine<MockStore, MockConfig> {
        ComparisonEngine::new(directory(), Arc::new(store), MockConfig::new())
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_compare_preserves_order_and_isolates_failures() {
        let store = MockStore::new().with_reading("Harlem", 7.0, 20.0);
        let engine = engine(store);

        let results = engine.compare(&names(&["Harlem", "Atlantis"])).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].input_name, "Harlem");
        assert!(results[0].success);
        assert_eq!(results[0].overall_risk, Some(PollutionScore::Safe));
        assert_eq!(results[0].pm25.as_deref(), Some("7.00"));
        assert_eq!(results[0].no2.as_deref(), Some("20.00"));

        assert_eq!(results[1].input_name, "Atlantis");
        assert!(!results[1].success);
        assert!(results[1].overall_risk.is_none());
        assert!(results[1]
            .error
            .as_ref()
            .unwrap()
            .contains("not recognized"));
    }

    #[tokio::test]
    async fn test_compare_duplicates_are_processed_independently() {
        let store = MockStore::new().with_reading("Harlem", 10.0, 30.0);
        let engine = engine(store);

        let results = engine.compare(&names(&["Harlem", "Harlem"])).await.unwrap();

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.success);
            assert_eq!(result.overall_risk, Some(PollutionScore::Moderate));
        }
    }

    #[tokio::test]
    async fn test_compare_rejects_empty_input() {
        let engine = engine(MockStore::new());
        assert!(matches!(
            engine.compare(&[]).await,
            Err(BreatheError::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_reading_is_a_per_item_failure() {
        let engine = engine(MockStore::new());

        let results = engine.compare(&names(&["Harlem"])).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0]
            .error
            .as_ref()
            .unwrap()
            .contains("no air quality reading"));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_abort_the_batch() {
        let store = MockStore::new().failing();
        let engine = engine(store);

        let results = engine
            .compare(&names(&["Harlem", "Astoria", "Atlantis"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| !r.success));
        assert!(results[0]
            .error
            .as_ref()
            .unwrap()
            .contains("connection refused"));
        assert!(results[2]
            .error
            .as_ref()
            .unwrap()
            .contains("not recognized"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_surfaces_as_per_item_timeout() {
        let store = MockStore::new()
            .with_reading("Harlem", 7.0, 20.0)
            .with_delay(Duration::from_secs(30));
        let engine = engine(store);

        let results = engine.compare(&names(&["Harlem"])).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].error.as_ref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_score_returns_raw_values() {
        let store = MockStore::new().with_reading("Astoria", 11.25, 33.5);
        let engine = engine(store);

        let score = engine.score("astoria").await.unwrap();
        assert_eq!(score.neighborhood, "Astoria");
        assert_eq!(score.borough, "Queens");
        assert_eq!(score.pm25, 11.25);
        assert_eq!(score.no2, 33.5);
        assert_eq!(score.overall_risk, PollutionScore::Moderate);
    }

    #[tokio::test]
    async fn test_score_propagates_not_found() {
        let engine = engine(MockStore::new());
        assert!(matches!(
            engine.score("Atlantis").await,
            Err(BreatheError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_name_in_batch_is_a_per_item_failure() {
        let store = MockStore::new().with_reading("Harlem", 7.0, 20.0);
        let engine = engine(store);

        let results = engine.compare(&names(&["  ", "Harlem"])).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert!(results[1].success);
    }
}

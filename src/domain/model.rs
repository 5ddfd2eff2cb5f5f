use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level categorical risk label derived from PM2.5 and NO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollutionScore {
    Safe,
    Moderate,
    High,
}

impl fmt::Display for PollutionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PollutionScore::Safe => "Safe",
            PollutionScore::Moderate => "Moderate",
            PollutionScore::High => "High",
        };
        write!(f, "{}", label)
    }
}

/// Canonical neighborhood/borough pair, as published in the geographic
/// dataset. Immutable once the directory is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    pub neighborhood: String,
    pub borough: String,
}

/// A validated pollutant pair, built per request from stored documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutantReading {
    pub pm25: f64,
    pub no2: f64,
}

/// Stored air-quality document. Field names match the seeded collection:
/// camelCase envelope, upper-case pollutant keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityRecord {
    pub borough: String,
    pub neighborhood: String,
    pub year: i32,
    pub pollutants: Pollutants,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pollution_score: Option<PollutionScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pollutants {
    #[serde(rename = "PM2_5")]
    pub pm2_5: f64,
    #[serde(rename = "NO2")]
    pub no2: f64,
    #[serde(rename = "Ozone", default, skip_serializing_if = "Option::is_none")]
    pub ozone: Option<f64>,
}

/// Single-neighborhood lookup result. Numeric fields stay raw here;
/// presentation formatting belongs to the consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodScore {
    pub neighborhood: String,
    pub borough: String,
    pub pm25: f64,
    pub no2: f64,
    pub overall_risk: PollutionScore,
}

/// Per-name entry of a comparison batch. Consumed directly by a view, so
/// pm25/no2 are pre-formatted to two decimals and absent fields are
/// omitted from the JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub input_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borough: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_risk: Option<PollutionScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComparisonResult {
    pub fn success(input_name: String, score: NeighborhoodScore) -> Self {
        Self {
            input_name,
            success: true,
            neighborhood: Some(score.neighborhood),
            borough: Some(score.borough),
            pm25: Some(format!("{:.2}", score.pm25)),
            no2: Some(format!("{:.2}", score.no2)),
            overall_risk: Some(score.overall_risk),
            error: None,
        }
    }

    pub fn failure(input_name: String, error: String) -> Self {
        Self {
            input_name,
            success: false,
            neighborhood: None,
            borough: None,
            pm25: None,
            no2: None,
            overall_risk: None,
            error: Some(error),
        }
    }
}

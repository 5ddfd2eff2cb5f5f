use crate::core::PollutionScore;
use crate::utils::error::Result;
use crate::utils::validation;

/// Maps a (PM2.5, NO2) pair to a risk category using combined EPA-like
/// thresholds, first match wins. Pure and deterministic.
pub fn classify(pm25: f64, no2: f64) -> Result<PollutionScore> {
    let pm25 = validation::check_pollutant("PM2.5", pm25)?;
    let no2 = validation::check_pollutant("NO2", no2)?;

    if pm25 <= 7.0 && no2 <= 20.0 {
        return Ok(PollutionScore::Safe);
    }

    if pm25 <= 12.0 && no2 <= 35.0 {
        return Ok(PollutionScore::Moderate);
    }

    Ok(PollutionScore::High)
}

use crate::utils::error::{BreatheError, Result};
use chrono::{Datelike, Utc};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Requires a non-empty string once trimmed, and returns the trimmed value.
pub fn check_string(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BreatheError::InvalidArgument {
            message: format!("{} cannot be an empty string or just spaces", field_name),
        });
    }
    Ok(trimmed.to_string())
}

/// Pollutant concentrations must be finite and non-negative.
pub fn check_pollutant(field_name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(BreatheError::InvalidArgument {
            message: format!("{} must be a finite, non-negative number", field_name),
        });
    }
    Ok(value)
}

pub fn check_year(field_name: &str, year: i32) -> Result<i32> {
    let current_year = Utc::now().year();
    if year < 2000 || year > current_year {
        return Err(BreatheError::InvalidArgument {
            message: format!(
                "{} must be between 2000 and {}",
                field_name, current_year
            ),
        });
    }
    Ok(year)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BreatheError::Config {
            message: format!("{}: URL cannot be empty", field_name),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BreatheError::Config {
                message: format!("{}: unsupported URL scheme: {}", field_name, scheme),
            }),
        },
        Err(e) => Err(BreatheError::Config {
            message: format!("{}: invalid URL format: {}", field_name, e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BreatheError::Config {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(BreatheError::Config {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_min(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(BreatheError::Config {
            message: format!("{}: value must be at least {}", field_name, min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_string() {
        assert_eq!(check_string("Neighborhood", "  Harlem ").unwrap(), "Harlem");
        assert!(check_string("Neighborhood", "").is_err());
        assert!(check_string("Neighborhood", "   ").is_err());
    }

    #[test]
    fn test_check_pollutant() {
        assert_eq!(check_pollutant("PM2.5", 7.0).unwrap(), 7.0);
        assert_eq!(check_pollutant("PM2.5", 0.0).unwrap(), 0.0);
        assert!(check_pollutant("PM2.5", -1.0).is_err());
        assert!(check_pollutant("PM2.5", f64::NAN).is_err());
        assert!(check_pollutant("NO2", f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_year() {
        assert!(check_year("year", 2023).is_ok());
        assert!(check_year("year", 1999).is_err());
        assert!(check_year("year", 9999).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.endpoint", "https://example.com").is_ok());
        assert!(validate_url("store.endpoint", "http://example.com").is_ok());
        assert!(validate_url("store.endpoint", "").is_err());
        assert!(validate_url("store.endpoint", "invalid-url").is_err());
        assert!(validate_url("store.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_min() {
        assert!(validate_min("timeout_seconds", 5, 1).is_ok());
        assert!(validate_min("timeout_seconds", 0, 1).is_err());
    }
}

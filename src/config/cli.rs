use crate::core::ConfigProvider;
use crate::utils::error::{BreatheError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "breathewatch")]
#[command(about = "Neighborhood air quality lookup and comparison")]
pub struct CliConfig {
    #[arg(long, default_value = "./data/neighborhoods.geojson")]
    pub geojson: String,

    /// JSON file of air quality records (offline store)
    #[arg(long, conflicts_with = "endpoint")]
    pub data: Option<String>,

    /// HTTP endpoint of the air quality record store
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, default_value = "2023")]
    pub year: i32,

    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    /// TOML configuration file; replaces the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON-formatted logs")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a neighborhood name to its canonical (neighborhood, borough)
    Resolve {
        name: String,
        /// Allow a looser substring match instead of the exact lookup
        #[arg(long)]
        partial: bool,
    },
    /// Look up the pollution score for one neighborhood
    Score { name: String },
    /// Compare two or more neighborhoods
    Compare {
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.config.is_some() {
            // the file carries its own validation
            return Ok(());
        }

        validation::validate_path("geojson", &self.geojson)?;
        validation::check_year("year", self.year)?;
        validation::validate_min("timeout_secs", self.timeout_secs, 1)?;

        match (&self.data, &self.endpoint) {
            (Some(path), None) => validation::validate_path("data", path),
            (None, Some(endpoint)) => validation::validate_url("endpoint", endpoint),
            (None, None) => Err(BreatheError::Config {
                message: "either --data or --endpoint must be supplied".to_string(),
            }),
            (Some(_), Some(_)) => Err(BreatheError::Config {
                message: "--data and --endpoint are mutually exclusive".to_string(),
            }),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn geojson_path(&self) -> &str {
        &self.geojson
    }

    fn data_year(&self) -> i32 {
        self.year
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

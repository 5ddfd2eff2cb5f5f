use crate::core::ConfigProvider;
use crate::utils::error::{BreatheError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML file configuration, the deployment-side alternative to CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub directory: DirectoryConfig,
    pub store: StoreConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub geojson_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub data_path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Json,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub year: i32,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BreatheError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BreatheError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(10)
    }
}

/// Replaces `${VAR_NAME}` references with environment values so endpoints
/// and paths can be injected at deploy time. Unset variables are left as
/// written.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("directory.geojson_path", &self.directory.geojson_path)?;
        validation::check_year("query.year", self.query.year)?;

        if let Some(timeout) = self.store.timeout_seconds {
            validation::validate_min("store.timeout_seconds", timeout, 1)?;
        }

        match self.store.kind {
            StoreKind::Json => match &self.store.data_path {
                Some(path) => validation::validate_path("store.data_path", path),
                None => Err(BreatheError::Config {
                    message: "store.data_path is required when store.kind = \"json\""
                        .to_string(),
                }),
            },
            StoreKind::Http => match &self.store.endpoint {
                Some(endpoint) => validation::validate_url("store.endpoint", endpoint),
                None => Err(BreatheError::Config {
                    message: "store.endpoint is required when store.kind = \"http\""
                        .to_string(),
                }),
            },
        }
    }
}

impl ConfigProvider for FileConfig {
    fn geojson_path(&self) -> &str {
        &self.directory.geojson_path
    }

    fn data_year(&self) -> i32 {
        self.query.year
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_seconds()
    }
}

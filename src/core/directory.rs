use crate::core::LocationRecord;
use crate::utils::error::{BreatheError, Result};
use crate::utils::validation;
use regex::RegexBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Property names probed on each feature, in order. Published datasets
/// disagree on the key names, so the same fallback chain the seed data
/// was built with is used here.
const NEIGHBORHOOD_KEYS: [&str; 4] = ["ntaname", "nta_name", "neighborhood", "name"];
const BOROUGH_KEYS: [&str; 3] = ["boro_name", "boroname", "borough"];

/// In-memory neighborhood→borough lookup table, built once at startup from
/// a GeoJSON feature collection and read-only afterwards.
pub struct LocationDirectory {
    // load order is preserved so partial matching is deterministic
    records: Vec<LocationRecord>,
    by_key: HashMap<String, usize>,
}

impl LocationDirectory {
    /// Reads and parses the dataset file. Any failure here is a startup
    /// precondition violation; the caller must not serve lookups.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)?;
        let geojson: Value = serde_json::from_str(&raw)?;
        Self::from_geojson(&geojson)
    }

    /// Builds the directory from an already-parsed feature collection.
    /// Features missing a neighborhood or borough property are skipped
    /// with a warning; an empty result fails the load.
    pub fn from_geojson(geojson: &Value) -> Result<Self> {
        let features = geojson
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| BreatheError::UpstreamUnavailable {
                message: "location dataset has no feature collection".to_string(),
            })?;

        let mut records = Vec::new();
        let mut by_key = HashMap::new();

        for (index, feature) in features.iter().enumerate() {
            let properties = match feature.get("properties").and_then(Value::as_object) {
                Some(props) => props,
                None => {
                    tracing::warn!("Skipping feature {} without properties", index);
                    continue;
                }
            };

            let neighborhood = first_string(properties, &NEIGHBORHOOD_KEYS);
            let borough = first_string(properties, &BOROUGH_KEYS);

            let (neighborhood, borough) = match (neighborhood, borough) {
                (Some(n), Some(b)) => (n, b),
                _ => {
                    tracing::warn!(
                        "Skipping feature {} missing neighborhood or borough name",
                        index
                    );
                    continue;
                }
            };

            let key = normalize(&neighborhood);
            if by_key.contains_key(&key) {
                tracing::debug!("Duplicate neighborhood '{}', keeping first", neighborhood);
                continue;
            }

            by_key.insert(key, records.len());
            records.push(LocationRecord {
                neighborhood,
                borough,
            });
        }

        if records.is_empty() {
            return Err(BreatheError::UpstreamUnavailable {
                message: "location dataset yielded no usable neighborhood records".to_string(),
            });
        }

        Ok(Self { records, by_key })
    }

    /// Exact lookup on the normalized neighborhood name.
    pub fn resolve(&self, raw_name: &str) -> Result<LocationRecord> {
        let name = validation::check_string("Neighborhood", raw_name)?;
        let key = normalize(&name);

        match self.by_key.get(&key) {
            Some(&index) => Ok(self.records[index].clone()),
            None => Err(BreatheError::NotFound {
                message: format!("neighborhood not recognized: {}", name),
            }),
        }
    }

    /// Looser, case-insensitive substring match over canonical names,
    /// first match in load order. Not used by the default resolution
    /// path; callers opt in explicitly.
    pub fn resolve_partial(&self, raw_name: &str) -> Result<LocationRecord> {
        let name = validation::check_string("Neighborhood", raw_name)?;
        let pattern = RegexBuilder::new(&regex::escape(&name))
            .case_insensitive(true)
            .build()
            .map_err(|e| BreatheError::InvalidArgument {
                message: format!("Neighborhood produced an invalid pattern: {}", e),
            })?;

        self.records
            .iter()
            .find(|record| pattern.is_match(&record.neighborhood))
            .cloned()
            .ok_or_else(|| BreatheError::NotFound {
                message: format!("neighborhood not recognized: {}", name),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn first_string(
    properties: &serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

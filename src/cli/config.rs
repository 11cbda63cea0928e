use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Overrides for the combined list header; unset fields keep their defaults
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct HeaderConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ResolverConfig {
    /// DoH JSON endpoint, e.g. "https://dns.google/resolve"
    pub endpoint: Option<String>,
    /// Per-lookup timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Maximum number of lookups in flight
    pub concurrency: Option<usize>,
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self, FilterError> {
        let content = fs::read_to_string(path).map_err(|source| FilterError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        toml::from_str(&content).map_err(|source| FilterError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }
}

use thiserror::Error;

use std::{path::PathBuf, time::Duration};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("lookup for {domain} failed: {source}")]
    LookupRequest {
        domain: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("lookup for {domain} timed out after {timeout:?}")]
    LookupTimeout { domain: String, timeout: Duration },

    #[error("lookup for {domain} returned HTTP {status}")]
    LookupHttp { domain: String, status: u16 },

    #[error("lookup for {domain} returned a malformed response: {source}")]
    LookupMalformed {
        domain: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("lookup for {domain} returned DNS status {status}")]
    LookupStatus { domain: String, status: u32 },

    #[error("entry '{entry}' has no domain left after stripping list syntax")]
    EmptyDomain { entry: String },

    #[error("none of the {count} target file(s) could be processed")]
    NoTargetsProcessed { count: usize },
}

// Resolved run configuration shared by the pipeline stages
use std::{path::PathBuf, time::Duration};

use crate::{
    list::Variant,
    net::{resolver::DEFAULT_DOH_ENDPOINT, validate::DEFAULT_LOOKUP_TIMEOUT},
    pipeline::Header,
};

pub const DEFAULT_BLOCKLISTS_DIR: &str = "BlockLists/downloads";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Everything a run needs after CLI arguments and config are merged
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub targets: Vec<PathBuf>,
    pub blocklists_dir: PathBuf,
    pub output_dir: PathBuf,
    pub variant: Variant,
    pub header: Header,
    pub resolver: ResolverSettings,
}

impl Settings {
    /// Settings with defaults for everything but the targets
    pub fn with_targets(targets: Vec<PathBuf>) -> Self {
        Self {
            targets,
            blocklists_dir: PathBuf::from(DEFAULT_BLOCKLISTS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            variant: Variant::default(),
            header: Header::default(),
            resolver: ResolverSettings::default(),
        }
    }
}

/// DoH lookup parameters used by the extended variant
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    pub endpoint: String,
    pub timeout: Duration,
    /// Maximum number of lookups in flight
    pub concurrency: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            concurrency: 1,
        }
    }
}

use std::time::Duration;

use crate::error::FilterError;
use crate::list::Variant;
use crate::settings::Settings;

use super::args::Args;
use super::config::ConfigFile;

/// Merge command line arguments and the optional config file into settings
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load complete settings from CLI arguments
    pub fn load(args: &Args) -> Result<Settings, FilterError> {
        let config = match args.config.as_ref() {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::merge(args, config)
    }

    fn merge(args: &Args, config: ConfigFile) -> Result<Settings, FilterError> {
        let mut settings = Settings::with_targets(args.targets.clone());
        settings.blocklists_dir = args.blocklists_dir.clone();
        settings.output_dir = args.output_dir.clone();
        settings.variant = if args.validate {
            Variant::Extended
        } else {
            Variant::Simple
        };

        let header = config.header;
        if let Some(title) = header.title {
            settings.header.title = title;
        }
        if let Some(description) = header.description {
            settings.header.description = description;
        }
        if let Some(homepage) = header.homepage {
            settings.header.homepage = homepage;
        }

        let resolver = config.resolver;
        if let Some(endpoint) = resolver.endpoint {
            settings.resolver.endpoint = endpoint;
        }
        if let Some(secs) = resolver.timeout_secs {
            if secs == 0 {
                return Err(FilterError::InvalidConfig {
                    key: "resolver.timeout_secs".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            settings.resolver.timeout = Duration::from_secs(secs);
        }
        if let Some(concurrency) = resolver.concurrency {
            if concurrency == 0 {
                return Err(FilterError::InvalidConfig {
                    key: "resolver.concurrency".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            settings.resolver.concurrency = concurrency;
        }

        Ok(settings)
    }
}

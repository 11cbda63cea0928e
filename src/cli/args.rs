use std::path::PathBuf;

use clap::Parser;

use crate::settings::{DEFAULT_BLOCKLISTS_DIR, DEFAULT_OUTPUT_DIR};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extract filter list entries that existing blocklists do not already cover"
)]
pub struct Args {
    /// Filter lists to check (one or more)
    #[arg(required = true, value_name = "TARGET")]
    pub targets: Vec<PathBuf>,

    /// Directory holding the existing blocklists
    #[arg(
        short = 'b',
        long = "blocklists-dir",
        value_name = "DIR",
        default_value = DEFAULT_BLOCKLISTS_DIR
    )]
    pub blocklists_dir: PathBuf,

    /// Directory the filter files are written to
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Skip `@@` lines in existing blocklists and keep only new entries that resolve over DoH
    #[arg(long = "validate")]
    pub validate: bool,

    /// Path to configuration file (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

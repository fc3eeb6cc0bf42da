//! Command line arguments
//!
//! The only required argument is the number of photos to attempt. Everything
//! else is optional and overrides the defaults (or the `--config` file).

use crate::config::{Config, RenamePolicy};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Download random hikr.org photos and name them after their post titles
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of photos to attempt
    pub count: usize,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for images (must exist)
    #[arg(long)]
    pub img_dir: Option<PathBuf>,

    /// Directory for post pages (must exist)
    #[arg(long)]
    pub html_dir: Option<PathBuf>,

    /// Seed for photo sampling, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Pause between photos in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// What to do when the title is already taken: overwrite, rename or skip
    #[arg(long)]
    pub rename_policy: Option<RenamePolicy>,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Build the run configuration: defaults, then the config file, then flags
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.img_dir {
            config.img_dir = dir.clone();
        }
        if let Some(dir) = &self.html_dir {
            config.html_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.delay_ms {
            config.request_delay = Duration::from_millis(ms);
        }
        if let Some(policy) = self.rename_policy {
            config.rename_policy = policy;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default tracing filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

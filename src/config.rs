//! Configuration types for hikr-dl

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for [`PhotoDownloader`](crate::PhotoDownloader)
///
/// Every field has a default, so `Config::default()` reproduces the plain
/// `hikr-dl <N>` behavior: `img/` and `html/` in the working directory, the
/// public hikr hosts, and an overwriting rename.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Directory receiving images (default: "img")
    #[serde(default = "default_img_dir")]
    pub img_dir: PathBuf,

    /// Directory receiving post pages (default: "html")
    #[serde(default = "default_html_dir")]
    pub html_dir: PathBuf,

    /// Scheme and host serving image files (default: "https://f.hikr.org")
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Scheme and host serving post pages (default: "https://www.hikr.org")
    #[serde(default = "default_post_base_url")]
    pub post_base_url: String,

    /// Smallest photo ID that can be sampled (default: 2000000)
    #[serde(default = "default_id_lower_bound")]
    pub id_lower_bound: u32,

    /// Number of consecutive IDs in the sampling range (default: 10000)
    #[serde(default = "default_id_span")]
    pub id_span: u32,

    /// Fixed seed for photo sampling (None = seeded from the clock)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Total timeout for a single HTTP request (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Timeout for establishing a connection (default: 10 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Pause between iterations to go easy on the site (default: 500 ms)
    #[serde(default = "default_request_delay", with = "millis_serde")]
    pub request_delay: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// What to do when `<title>.jpg` already exists
    #[serde(default)]
    pub rename_policy: RenamePolicy,

    /// Retry settings for transport failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            img_dir: default_img_dir(),
            html_dir: default_html_dir(),
            image_base_url: default_image_base_url(),
            post_base_url: default_post_base_url(),
            id_lower_bound: default_id_lower_bound(),
            id_span: default_id_span(),
            seed: None,
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            request_delay: default_request_delay(),
            user_agent: default_user_agent(),
            rename_policy: RenamePolicy::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// Missing keys fall back to their defaults. The result is validated
    /// before it is returned.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read config file '{}': {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("image_base_url", &self.image_base_url),
            ("post_base_url", &self.post_base_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| Error::config(key, format!("invalid URL '{}': {}", value, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::config(
                    key,
                    format!("unsupported scheme '{}' in '{}'", parsed.scheme(), value),
                ));
            }
        }

        if self.id_span == 0 {
            return Err(Error::config("id_span", "must be greater than zero"));
        }
        if self.id_lower_bound.checked_add(self.id_span - 1).is_none() {
            return Err(Error::config(
                "id_span",
                "sampling range overflows a 32-bit photo ID",
            ));
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(Error::config(
                "retry.backoff_multiplier",
                "must be at least 1.0",
            ));
        }

        Ok(())
    }
}

/// Retry configuration for transport failures
///
/// HTTP statuses are never retried; only DNS, connection and timeout failures.
#[derive(Clone, Debug, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try (default: 2)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 10 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A configuration that never retries
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }
}

/// How to rename an image onto a title that is already taken
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenamePolicy {
    /// Replace the existing file (default)
    #[default]
    Overwrite,
    /// Append (1), (2), etc. to the file name
    Rename,
    /// Keep the existing file and discard the new download
    Skip,
}

impl std::str::FromStr for RenamePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(RenamePolicy::Overwrite),
            "rename" => Ok(RenamePolicy::Rename),
            "skip" => Ok(RenamePolicy::Skip),
            other => Err(format!(
                "unknown rename policy '{}' (expected overwrite, rename or skip)",
                other
            )),
        }
    }
}

fn default_img_dir() -> PathBuf {
    PathBuf::from("img")
}

fn default_html_dir() -> PathBuf {
    PathBuf::from("html")
}

fn default_image_base_url() -> String {
    "https://f.hikr.org".to_string()
}

fn default_post_base_url() -> String {
    "https://www.hikr.org".to_string()
}

fn default_id_lower_bound() -> u32 {
    2_000_000
}

fn default_id_span() -> u32 {
    10_000
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_request_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    2
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Durations given in whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Durations given in milliseconds
mod millis_serde {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

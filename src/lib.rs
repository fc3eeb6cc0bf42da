//! # hikr-dl
//!
//! Downloads randomly sampled photos from [hikr.org](https://www.hikr.org) and
//! names each image after the title of its post.
//!
//! For every one of N sampled photo IDs the downloader fetches the image and
//! its post page, pulls the title out of the page, and renames the image to
//! `<title>.jpg`. Photos that are gone (404) or unreachable are skipped, so a
//! run may save fewer than N images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hikr_dl::{Config, PhotoDownloader};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // img/ and html/ must already exist
//!     let mut downloader = PhotoDownloader::new(Config::default())?;
//!     let summary = downloader.run(5).await?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Command line interface
pub mod cli;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Post title extraction
pub mod extract;
/// HTTP downloading
pub mod fetcher;
/// Photo ID sampling
pub mod ids;
/// The download loop
pub mod orchestrator;
/// Retry logic with exponential backoff
pub mod retry;
/// Core types
pub mod types;
/// Photo and post URLs
pub mod urls;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, RenamePolicy, RetryConfig};
pub use error::{Error, ExtractError, Result};
pub use extract::extract_title;
pub use fetcher::{Fetcher, HttpFetcher};
pub use ids::IdGenerator;
pub use orchestrator::PhotoDownloader;
pub use types::{
    DownloadTarget, FetchResult, FetchStatus, IterationOutcome, PhotoId, Resource, RunSummary,
    SkipReason,
};
pub use urls::UrlTemplates;

//! Core types for hikr-dl

use crate::error::ExtractError;
use reqwest::StatusCode;
use std::path::PathBuf;

/// Numeric identifier of a photo on hikr
///
/// The same ID addresses both the image file and its post page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhotoId(pub u32);

impl PhotoId {
    /// Get the inner value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for PhotoId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A URL and the file its body is written to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Source URL
    pub url: String,
    /// Destination path on disk
    pub path: PathBuf,
}

impl DownloadTarget {
    /// Create a new download target
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}

/// How a single fetch ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    /// The server answered; the body (possibly an error page) was written to disk
    Http(StatusCode),
    /// No usable response: DNS, connect, timeout or a broken body stream
    Transport(String),
}

/// Outcome of [`Fetcher::fetch`](crate::fetcher::Fetcher::fetch)
///
/// The destination file always exists once a fetch has returned, whatever the
/// status; removing it after a failure is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResult {
    /// Final status of the request
    pub status: FetchStatus,
    /// Bytes written to the destination file
    pub bytes_written: u64,
}

impl FetchResult {
    /// The server answered with `status`
    pub fn http(status: StatusCode, bytes_written: u64) -> Self {
        Self {
            status: FetchStatus::Http(status),
            bytes_written,
        }
    }

    /// The request failed below HTTP
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Transport(message.into()),
            bytes_written: 0,
        }
    }

    /// True if the server reported 404 Not Found
    pub fn is_not_found(&self) -> bool {
        matches!(self.status, FetchStatus::Http(StatusCode::NOT_FOUND))
    }

    /// True if the server answered with a 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self.status, FetchStatus::Http(status) if status.is_success())
    }

    /// True if no HTTP response was obtained
    pub fn is_transport_failure(&self) -> bool {
        matches!(self.status, FetchStatus::Transport(_))
    }
}

/// Which of the two downloads of an iteration a failure refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// The image file
    Image,
    /// The post page
    Post,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Image => write!(f, "image"),
            Resource::Post => write!(f, "post page"),
        }
    }
}

/// Why an iteration produced no title-named image
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The server returned 404 for the image or the post page
    NotFound(Resource),
    /// The image or post page could not be fetched at all
    Transport {
        /// The download that failed
        resource: Resource,
        /// Transport error message
        message: String,
    },
    /// The post page did not yield a title
    Extraction(ExtractError),
    /// The title cannot be turned into a file name
    InvalidTitle(String),
    /// `<title>.jpg` exists and the rename policy keeps it
    Collision(PathBuf),
    /// The rename itself failed
    RenameFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotFound(resource) => write!(f, "{} not found", resource),
            SkipReason::Transport { resource, message } => {
                write!(f, "{} download failed: {}", resource, message)
            }
            SkipReason::Extraction(e) => write!(f, "{}", e),
            SkipReason::InvalidTitle(reason) => write!(f, "invalid title: {}", reason),
            SkipReason::Collision(path) => write!(f, "{} already exists", path.display()),
            SkipReason::RenameFailed(reason) => write!(f, "rename failed: {}", reason),
        }
    }
}

/// Result of one loop iteration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The image was saved under its title
    Saved {
        /// Loop index
        index: usize,
        /// Sampled photo ID
        photo_id: PhotoId,
        /// Title taken from the post page
        title: String,
        /// Final image path
        path: PathBuf,
    },
    /// Nothing was saved for this iteration
    Skipped {
        /// Loop index
        index: usize,
        /// Sampled photo ID
        photo_id: PhotoId,
        /// Why the iteration was skipped
        reason: SkipReason,
    },
}

impl IterationOutcome {
    /// True if the iteration saved an image
    pub fn is_saved(&self) -> bool {
        matches!(self, IterationOutcome::Saved { .. })
    }
}

/// Summary of a whole run
///
/// `outcomes` has one entry per attempted iteration; skipped iterations are not
/// replaced by fresh samples, so fewer than `requested` images may be saved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of iterations requested on the command line
    pub requested: usize,
    /// Per-iteration outcomes, in loop order
    pub outcomes: Vec<IterationOutcome>,
}

impl RunSummary {
    /// Number of images saved under their title
    pub fn saved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    /// Number of iterations that were skipped
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.saved()
    }

    /// Paths of all saved images
    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                IterationOutcome::Saved { path, .. } => Some(path),
                IterationOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requested, {} saved, {} skipped",
            self.requested,
            self.saved(),
            self.skipped()
        )
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_result_classification() {
        let not_found = FetchResult::http(StatusCode::NOT_FOUND, 120);
        assert!(not_found.is_not_found());
        assert!(!not_found.is_success());
        assert!(!not_found.is_transport_failure());

        let ok = FetchResult::http(StatusCode::OK, 4096);
        assert!(ok.is_success());
        assert!(!ok.is_not_found());

        let server_error = FetchResult::http(StatusCode::INTERNAL_SERVER_ERROR, 0);
        assert!(!server_error.is_success());
        assert!(!server_error.is_not_found());

        let transport = FetchResult::transport("connection refused");
        assert!(transport.is_transport_failure());
        assert!(!transport.is_not_found());
        assert_eq!(transport.bytes_written, 0);
    }

    #[test]
    fn test_run_summary_counts() {
        let summary = RunSummary {
            requested: 3,
            outcomes: vec![
                IterationOutcome::Saved {
                    index: 0,
                    photo_id: PhotoId(2_000_001),
                    title: "Piz Palü".to_string(),
                    path: PathBuf::from("img/Piz Palü.jpg"),
                },
                IterationOutcome::Skipped {
                    index: 1,
                    photo_id: PhotoId(2_000_002),
                    reason: SkipReason::NotFound(Resource::Image),
                },
                IterationOutcome::Skipped {
                    index: 2,
                    photo_id: PhotoId(2_000_003),
                    reason: SkipReason::Extraction(ExtractError::MarkerNotFound),
                },
            ],
        };

        assert_eq!(summary.saved(), 1);
        assert_eq!(summary.skipped(), 2);
        assert_eq!(
            summary.saved_paths(),
            vec![&PathBuf::from("img/Piz Palü.jpg")]
        );
        assert_eq!(summary.to_string(), "3 requested, 1 saved, 2 skipped");
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::NotFound(Resource::Post).to_string(),
            "post page not found"
        );
        assert_eq!(
            SkipReason::Transport {
                resource: Resource::Image,
                message: "timed out".to_string()
            }
            .to_string(),
            "image download failed: timed out"
        );
    }
}

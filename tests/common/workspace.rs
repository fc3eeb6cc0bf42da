//! Temporary img/ and html/ directories wired to a mock server

use hikr_dl::{Config, IdGenerator, PhotoId, RetryConfig};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;

/// Fixed sampling seed so tests know which IDs a run will draw
pub const SEED: u64 = 0x6869_6b72;

/// Working directory with `img/` and `html/` already created
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::create_dir(dir.path().join("img")).expect("create img dir");
        std::fs::create_dir(dir.path().join("html")).expect("create html dir");
        Self { dir }
    }

    pub fn img(&self, name: &str) -> PathBuf {
        self.dir.path().join("img").join(name)
    }

    pub fn html(&self, name: &str) -> PathBuf {
        self.dir.path().join("html").join(name)
    }

    /// Names of all files in `img/`, sorted
    pub fn img_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path().join("img"))
            .expect("read img dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Config pointing both hosts at `server`, with no delays or retries
    pub fn config(&self, server: &MockServer) -> Config {
        Config {
            img_dir: self.dir.path().join("img"),
            html_dir: self.dir.path().join("html"),
            image_base_url: server.uri(),
            post_base_url: server.uri(),
            seed: Some(SEED),
            timeout: Duration::from_secs(5),
            request_delay: Duration::ZERO,
            retry: RetryConfig::disabled(),
            ..Default::default()
        }
    }
}

/// The IDs a run with [`SEED`] draws, in order
pub fn sampled_ids(count: usize) -> Vec<PhotoId> {
    let defaults = Config::default();
    IdGenerator::with_seed(defaults.id_lower_bound, defaults.id_span, SEED)
        .expect("valid range")
        .generate(count)
        .expect("allocate ids")
}

//! The download loop
//!
//! One strictly sequential pass over N sampled photo IDs. Each iteration:
//!
//! 1. builds the image and post URLs for its ID,
//! 2. downloads them to `img/img<i>.jpg` and `html/post<i>.html`,
//! 3. skips (removing both files) on a 404 or transport failure,
//! 4. extracts the title from the saved post page,
//! 5. renames the image to `img/<title>.jpg`.
//!
//! Skipped iterations are not replaced, so a run of N may save fewer than N
//! images. The post page stays on disk once it has been read.

use crate::config::{Config, RenamePolicy};
use crate::error::{Error, Result};
use crate::extract::extract_title;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::ids::IdGenerator;
use crate::types::{
    DownloadTarget, FetchResult, FetchStatus, IterationOutcome, PhotoId, Resource, RunSummary,
    SkipReason,
};
use crate::urls::UrlTemplates;
use crate::utils::{
    ensure_directory, is_transient_image_name, next_free_path, remove_transient,
    resolve_destination, title_file_name, transient_image_name,
};
use std::path::{Path, PathBuf};


/// Downloads randomly sampled photos and names them after their post titles
pub struct PhotoDownloader<F: Fetcher = HttpFetcher> {
    config: Config,
    fetcher: F,
    urls: UrlTemplates,
    ids: IdGenerator,
}

impl PhotoDownloader<HttpFetcher> {
    /// Create a downloader using the real HTTP client
    ///
    /// Fails with [`Error::ClientInit`] if the client cannot be built, or as
    /// [`with_fetcher`](Self::with_fetcher) does for an invalid config.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> PhotoDownloader<F> {
    /// Create a downloader around any [`Fetcher`]
    ///
    /// Validates `config` first.
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self> {
        config.validate()?;

        let ids = match config.seed {
            Some(seed) => IdGenerator::with_seed(config.id_lower_bound, config.id_span, seed)?,
            None => IdGenerator::from_clock(config.id_lower_bound, config.id_span)?,
        };
        let urls = UrlTemplates::new(&config.image_base_url, &config.post_base_url);

        Ok(Self {
            config,
            fetcher,
            urls,
            ids,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attempt `count` downloads
    ///
    /// Returns `Err` only for conditions that abort the whole run: missing
    /// working directories, an unallocatable ID list, a local file that cannot
    /// be created, or a downloaded post page that cannot be read back. Every
    /// other failure is recorded as a skipped iteration.
    pub async fn run(&mut self, count: usize) -> Result<RunSummary> {
        ensure_directory(&self.config.img_dir)?;
        ensure_directory(&self.config.html_dir)?;

        let mut outcomes = Vec::new();
        outcomes
            .try_reserve_exact(count)
            .map_err(|_| Error::IdAllocation { requested: count })?;
        let ids = self.ids.generate(count)?;
        let mut summary = RunSummary {
            requested: count,
            outcomes,
        };

        for (index, photo_id) in ids.into_iter().enumerate() {
            if index > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            let outcome = self.process(index, photo_id).await?;
            match &outcome {
                IterationOutcome::Saved { title, path, .. } => {
                    tracing::info!(
                        iteration = index,
                        photo_id = %photo_id,
                        title = %title,
                        path = %path.display(),
                        "Saved photo"
                    );
                }
                IterationOutcome::Skipped { reason, .. } => {
                    tracing::warn!(
                        iteration = index,
                        photo_id = %photo_id,
                        reason = %reason,
                        "Skipped photo"
                    );
                }
            }
            summary.outcomes.push(outcome);
        }

        tracing::info!(
            requested = summary.requested,
            saved = summary.saved(),
            skipped = summary.skipped(),
            "Run complete"
        );
        Ok(summary)
    }

    /// Run a single iteration for `photo_id` at loop position `index`
    pub async fn process(&self, index: usize, photo_id: PhotoId) -> Result<IterationOutcome> {
        let image = DownloadTarget::new(self.urls.image_url(photo_id), self.image_path(index));
        let post = DownloadTarget::new(self.urls.post_url(photo_id), self.post_path(index));

        tracing::debug!(iteration = index, photo_id = %photo_id, "Fetching photo");
        let image_result = self.fetcher.fetch(&image).await?;
        let post_result = self.fetcher.fetch(&post).await?;

        let skipped = |reason| IterationOutcome::Skipped {
            index,
            photo_id,
            reason,
        };

        if let Some(reason) = fetch_skip_reason(&image_result, &post_result) {
            remove_transient(&image.path).await;
            remove_transient(&post.path).await;
            return Ok(skipped(reason));
        }

        let html = tokio::fs::read(&post.path)
            .await
            .map_err(|source| Error::PostPageUnreadable {
                path: post.path.clone(),
                source,
            })?;

        let title = match extract_title(&html) {
            Ok(title) => title,
            Err(e) => {
                remove_transient(&image.path).await;
                return Ok(skipped(SkipReason::Extraction(e)));
            }
        };

        match self.save_image(&image.path, &title).await {
            Ok(path) => Ok(IterationOutcome::Saved {
                index,
                photo_id,
                title,
                path,
            }),
            Err(e) => {
                remove_transient(&image.path).await;
                let reason = match e {
                    Error::InvalidTitle { reason, .. } => SkipReason::InvalidTitle(reason),
                    Error::FileCollision { path } => SkipReason::Collision(path),
                    other => SkipReason::RenameFailed(other.to_string()),
                };
                Ok(skipped(reason))
            }
        }
    }

    /// Move the transient image to `<img_dir>/<title>.jpg`
    ///
    /// A title that spells a transient name (`img<digits>`) would be clobbered
    /// by a later iteration's download, so it only gets through with a suffix
    /// under [`RenamePolicy::Rename`].
    async fn save_image(&self, transient: &Path, title: &str) -> Result<PathBuf> {
        let file_name = title_file_name(title)?;
        let desired = self.config.img_dir.join(&file_name);
        let destination = if is_transient_image_name(&file_name) {
            match self.config.rename_policy {
                RenamePolicy::Rename => next_free_path(&desired)?,
                RenamePolicy::Overwrite | RenamePolicy::Skip => {
                    return Err(Error::InvalidTitle {
                        title: title.to_string(),
                        reason: "title matches a temporary download name".to_string(),
                    });
                }
            }
        } else {
            resolve_destination(&desired, self.config.rename_policy)?
        };

        tokio::fs::rename(transient, &destination)
            .await
            .map_err(|e| Error::Rename {
                from: transient.to_path_buf(),
                to: destination.clone(),
                reason: e.to_string(),
            })?;

        Ok(destination)
    }

    fn image_path(&self, index: usize) -> PathBuf {
        self.config.img_dir.join(transient_image_name(index))
    }

    fn post_path(&self, index: usize) -> PathBuf {
        self.config.html_dir.join(format!("post{}.html", index))
    }
}

/// Decide from the two fetch results whether the iteration must be skipped
///
/// Only 404s and transport failures skip; other statuses (500 and friends)
/// carry on and are left to the title extractor.
fn fetch_skip_reason(image: &FetchResult, post: &FetchResult) -> Option<SkipReason> {
    for (resource, result) in [(Resource::Image, image), (Resource::Post, post)] {
        if result.is_not_found() {
            return Some(SkipReason::NotFound(resource));
        }
        if let FetchStatus::Transport(message) = &result.status {
            return Some(SkipReason::Transport {
                resource,
                message: message.clone(),
            });
        }
    }
    None
}

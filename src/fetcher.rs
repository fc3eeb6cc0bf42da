//! Downloading URLs to files
//!
//! [`Fetcher`] is the seam between the download loop and the network. The
//! production implementation, [`HttpFetcher`], streams response bodies to disk
//! with a single reusable `reqwest::Client`.

use crate::config::{Config, RetryConfig};
use crate::error::{Error, Result};
use crate::retry::with_retry;
use crate::types::{DownloadTarget, FetchResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Downloads a URL into a file
///
/// Contract:
/// - the destination file exists when `fetch` returns `Ok`, whatever the status
///   (it may be empty or hold an error page);
/// - non-2xx responses are reported through [`FetchResult::status`], never as `Err`;
/// - transport failures are reported as [`FetchStatus::Transport`](crate::types::FetchStatus::Transport);
/// - `Err` is reserved for local failures such as an uncreatable destination.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `target.url` into `target.path`
    async fn fetch(&self, target: &DownloadTarget) -> Result<FetchResult>;
}

/// [`Fetcher`] backed by a shared `reqwest::Client`
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpFetcher {
    /// Build the HTTP client from the timeouts and user agent in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
        })
    }

    /// One request, body streamed into a freshly truncated destination
    async fn attempt(&self, target: &DownloadTarget) -> Result<(StatusCode, u64)> {
        let mut file = File::create(&target.path).await?;
        let mut response = self.client.get(&target.url).send().await?;
        let status = response.status();

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok((status, written))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &DownloadTarget) -> Result<FetchResult> {
        match with_retry(&self.retry, || self.attempt(target)).await {
            Ok((status, bytes)) => {
                if status.is_success() {
                    tracing::info!(url = %target.url, status = status.as_u16(), bytes, "Downloaded");
                } else {
                    tracing::warn!(url = %target.url, status = status.as_u16(), "Download returned error status");
                }
                Ok(FetchResult::http(status, bytes))
            }
            Err(Error::Network(e)) => {
                let message = describe_transport_error(&e);
                tracing::warn!(url = %target.url, error = %message, "Download failed");
                Ok(FetchResult::transport(message))
            }
            Err(e) => Err(e),
        }
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

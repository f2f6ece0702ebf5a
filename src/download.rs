//! Artifact download over HTTP for the pinned server release.
//!
//! Provides a trait-based abstraction for fetching release assets as raw
//! bytes, enabling dependency injection for testing. A single GET per
//! artifact, no retries; any transport failure is surfaced to the caller.

use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout for artifact downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching release artifacts.
///
/// The abstraction allows tests to exercise the setup flow without network
/// access.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactDownloader {
    /// Fetch `url` and return the response body as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with a
    /// non-success status, or the body cannot be read in full.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Errors arising from artifact download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed or the body could not be read.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested artifact was not found (HTTP 404).
    #[error("artifact not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },
}

/// HTTP-based downloader using `ureq`.
#[derive(Debug, Default)]
pub struct HttpDownloader;

impl ArtifactDownloader for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_vec()
            .map_err(|e| DownloadError::HttpError {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

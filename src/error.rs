//! Error types for the server APK setup flow.
//!
//! Every variant is fatal to the `ensure_artifacts` call that produced it:
//! callers treat any error as "setup did not complete" and abort their own
//! workflow. The variants distinguish the failure stage so operators can
//! tell a transport failure from a corrupted download from a write that
//! silently went missing.

use crate::digest::Sha512Digest;
use crate::download::DownloadError;
use crate::release::ArtifactKind;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while ensuring the server APK pair is installed.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// Fetching an artifact over HTTP failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// A fetched artifact's digest does not match the pinned expectation.
    #[error("bad {artifact} SHA-512 fingerprint: expected {expected}, got {actual}")]
    DigestMismatch {
        /// Which artifact failed verification.
        artifact: ArtifactKind,
        /// The digest the release descriptor expects.
        expected: Sha512Digest,
        /// The digest computed over the fetched bytes.
        actual: Sha512Digest,
    },

    /// A digest string is not a valid 128-character lowercase hex value.
    #[error("invalid SHA-512 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A destination file is missing even though the install step reported
    /// success.
    #[error("{artifact} missing at {path} after install")]
    MissingAfterInstall {
        /// Which artifact vanished.
        artifact: ArtifactKind,
        /// The destination path that should exist.
        path: Utf8PathBuf,
    },

    /// No platform data directory is available to anchor the install root.
    #[error("no local data directory available for the install root")]
    InstallRootUnavailable,
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;

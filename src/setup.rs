//! Verify-or-fetch orchestration for the server APK pair.
//!
//! [`ensure_artifacts`] is the entry point the automation driver calls
//! before starting a session: it probes both APKs against the pinned
//! digests, downloads and verifies the pair when anything is missing or
//! stale, and re-checks the destination files before reporting success.
//! Every failure is fatal to the single call; there are no retries and no
//! partial-success states.

use crate::digest::sha512_digest;
use crate::download::{ArtifactDownloader, HttpDownloader};
use crate::error::{InstallerError, Result};
use crate::probe::artifact_is_valid;
use crate::release::ReleaseDescriptor;
use camino::Utf8Path;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;

/// Ensure both APKs exist locally and match the pinned digests.
///
/// Files that already verify are left untouched and no network access
/// happens. Anything missing or stale triggers a download of the full
/// pair: both payloads are fetched and digest-checked before the first
/// byte is written, then persisted with 0644 permissions.
///
/// # Errors
///
/// Returns an error when a download fails, a fetched artifact's digest
/// does not match the pinned expectation, a filesystem operation fails, or
/// a destination file is missing after the install step.
pub fn ensure_artifacts(release: &ReleaseDescriptor) -> Result<()> {
    ensure_artifacts_with(release, &HttpDownloader)
}

/// Testable inner function with an injected downloader.
///
/// The production entry point [`ensure_artifacts`] delegates here with
/// [`HttpDownloader`]; tests inject mocks.
///
/// # Errors
///
/// Same conditions as [`ensure_artifacts`].
pub fn ensure_artifacts_with(
    release: &ReleaseDescriptor,
    downloader: &dyn ArtifactDownloader,
) -> Result<()> {
    if pair_is_valid(release)? {
        info!("UiAutomator2 APKs exist and match the pinned digests, skipping download");
        return Ok(());
    }
    download_pair(release, downloader)?;

    // Guard against a write that reported success but left no file behind.
    for spec in release.artifacts() {
        if !file_exists(spec.destination())? {
            return Err(InstallerError::MissingAfterInstall {
                artifact: spec.kind(),
                path: spec.destination().to_owned(),
            });
        }
    }
    Ok(())
}

/// Existence-only check of both destination files.
///
/// Cheaper than [`ensure_artifacts`] for callers that only need a
/// post-setup sanity check; performs no digest verification.
///
/// # Errors
///
/// Returns [`InstallerError::Io`] for filesystem failures other than "no
/// such file".
pub fn is_installed(release: &ReleaseDescriptor) -> Result<bool> {
    for spec in release.artifacts() {
        if !file_exists(spec.destination())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether both on-disk artifacts hash to their expected digests.
fn pair_is_valid(release: &ReleaseDescriptor) -> Result<bool> {
    for spec in release.artifacts() {
        if !artifact_is_valid(spec.destination(), spec.expected_digest())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Download both artifacts, verify both digests, then persist both.
///
/// Verification of the whole pair completes before the first write, so a
/// mismatch on either artifact leaves the disk untouched.
fn download_pair(
    release: &ReleaseDescriptor,
    downloader: &dyn ArtifactDownloader,
) -> Result<()> {
    fs::create_dir_all(release.install_dir().as_std_path())?;

    let mut payloads = Vec::with_capacity(2);
    for spec in release.artifacts() {
        info!(
            "downloading {} {}: {}",
            spec.kind(),
            release.version(),
            spec.url()
        );
        payloads.push((spec, downloader.fetch(spec.url())?));
    }

    for (spec, bytes) in &payloads {
        let actual = sha512_digest(bytes);
        if actual != *spec.expected_digest() {
            error!("bad {} SHA-512 fingerprint: {actual}", spec.kind());
            return Err(InstallerError::DigestMismatch {
                artifact: spec.kind(),
                expected: spec.expected_digest().clone(),
                actual,
            });
        }
    }

    for (spec, bytes) in &payloads {
        fs::write(spec.destination().as_std_path(), bytes)?;
        set_artifact_permissions(spec.destination())?;
    }
    info!("UiAutomator2 APKs downloaded");
    Ok(())
}

/// Report whether `path` exists, propagating unexpected filesystem errors.
fn file_exists(path: &Utf8Path) -> Result<bool> {
    match fs::metadata(path.as_std_path()) {
        Ok(_) => Ok(true),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// Set owner-read-write, group/other-read bits on an installed artifact.
#[cfg(unix)]
fn set_artifact_permissions(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path.as_std_path(), fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_artifact_permissions(_path: &Utf8Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;

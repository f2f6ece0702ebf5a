//! Setup routine for the UiAutomator2 server APK pair.
//!
//! The surrounding automation driver pushes two APKs to the device under
//! test: the UiAutomator2 server and the instrumentation bundle that starts
//! it. This crate guarantees both are present on local disk and
//! byte-identical to the pinned release before a session begins. Files
//! whose SHA-512 digests already match are left alone and no network access
//! happens; anything missing or stale is downloaded from the GitHub
//! release, verified against the pinned digests, and persisted with 0644
//! permissions.
//!
//! # Modules
//!
//! - [`digest`] - SHA-512 digest newtype and computation
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`download`] - Artifact download trait and HTTP implementation
//! - [`error`] - Semantic error types
//! - [`probe`] - On-disk artifact validation
//! - [`release`] - Pinned release descriptor and artifact metadata
//! - [`setup`] - Verify-or-fetch orchestration

pub mod digest;
pub mod dirs;
pub mod download;
pub mod error;
pub mod probe;
pub mod release;
pub mod setup;

#[cfg(test)]
mod test_utils;

pub use error::{InstallerError, Result};
pub use release::{ArtifactKind, ArtifactSpec, ReleaseDescriptor};
pub use setup::{ensure_artifacts, ensure_artifacts_with, is_installed};

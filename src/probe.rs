//! On-disk artifact validation.
//!
//! An artifact already on disk is trusted only when its recomputed SHA-512
//! digest matches the pinned expectation; existence alone proves nothing.

use crate::digest::{Sha512Digest, sha512_digest};
use crate::error::Result;
use camino::Utf8Path;
use std::io::ErrorKind;

/// Check whether the file at `path` exists and hashes to `expected`.
///
/// A missing file is a normal `false`, not an error. The check reads the
/// full file once.
///
/// # Errors
///
/// Returns [`InstallerError::Io`](crate::error::InstallerError::Io) for
/// filesystem failures other than "no such file", such as permission
/// denied.
pub fn artifact_is_valid(path: &Utf8Path, expected: &Sha512Digest) -> Result<bool> {
    let bytes = match std::fs::read(path.as_std_path()) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(error.into()),
    };
    Ok(sha512_digest(&bytes) == *expected)
}

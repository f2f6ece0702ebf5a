//! SHA-512 digest newtype and computation for artifact verification.
//!
//! Validates that stored digest values are 128-character lowercase
//! hexadecimal strings, and computes matching digests over fetched or
//! on-disk artifact bytes.

use crate::error::{InstallerError, Result};
use sha2::{Digest, Sha512};
use std::fmt;

/// Expected length of a hex-encoded SHA-512 digest.
const DIGEST_HEX_LEN: usize = 128;

/// A validated hex-encoded SHA-512 digest string.
///
/// # Examples
///
/// ```
/// use ui2_installer::digest::Sha512Digest;
///
/// let hex = "a".repeat(128);
/// let digest: Sha512Digest = hex.as_str().try_into().unwrap();
/// assert_eq!(digest.as_str().len(), 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha512Digest(String);

impl Sha512Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha512Digest {
    type Error = InstallerError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha512(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha512Digest {
    type Error = InstallerError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha512(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha512Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha512Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the SHA-512 digest of `bytes` as lowercase hex.
///
/// Deterministic for identical input. The empty sequence is valid and
/// yields the digest of zero-length data.
#[must_use]
pub fn sha512_digest(bytes: &[u8]) -> Sha512Digest {
    let mut hasher = Sha512::new();
    hasher.update(bytes);
    Sha512Digest(format!("{:x}", hasher.finalize()))
}

/// Validate that `value` is a well-formed hex-encoded SHA-512 digest.
fn validate_sha512(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(InstallerError::InvalidDigest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(InstallerError::InvalidDigest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(InstallerError::InvalidDigest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}

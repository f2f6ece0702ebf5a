//! Directory resolution abstraction for platform-specific paths.
//!
//! The install root defaults to the per-user local data directory (for
//! example, `~/.local/share` on many Linux distributions, `~/Library/
//! Application Support` on macOS, and the Local AppData directory on
//! Windows) with a `uiautomator2` subdirectory. The trait indirection lets
//! tests resolve against a temporary directory instead of the real home.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;

/// Subdirectory of the data directory that holds the APK pair.
const INSTALL_SUBDIR: &str = "uiautomator2";

/// Provider of platform base directories.
pub trait BaseDirs {
    /// The per-user local data directory, if one can be determined.
    fn data_local_dir(&self) -> Option<Utf8PathBuf>;
}

/// [`BaseDirs`] implementation backed by the operating system.
#[derive(Debug, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn data_local_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .and_then(|path| Utf8PathBuf::try_from(path).ok())
    }
}

/// Resolve the default install root for the APK pair.
///
/// # Errors
///
/// Returns [`InstallerError::InstallRootUnavailable`] when the platform
/// reports no usable data directory.
pub fn default_install_dir(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    dirs.data_local_dir()
        .map(|dir| dir.join(INSTALL_SUBDIR))
        .ok_or(InstallerError::InstallRootUnavailable)
}

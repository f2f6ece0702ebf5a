//! Pinned release descriptor for the UiAutomator2 server APK pair.
//!
//! The driver tracks exactly one known-good server release at a time.
//! `SERVER_VERSION`, `SERVER_APK_SHA512`, and `TEST_APK_SHA512` must be
//! updated together for every server release.

use crate::digest::Sha512Digest;
use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// The GitHub repository that publishes server releases.
const GITHUB_REPO: &str = "appium/appium-uiautomator2-server";

/// The pinned server release tag.
const SERVER_VERSION: &str = "v0.0.5";

/// SHA-512 digest of the pinned server APK.
const SERVER_APK_SHA512: &str = "0df3eb4eb681d3b18071b84f771c280b048c1e0dbe022c4153b19d7142ef54a192cd0cb24c1a0747ee978a2e8e72df6549418ad89b0edaa4be0e1b9d8834f793";

/// SHA-512 digest of the pinned instrumentation test APK.
const TEST_APK_SHA512: &str = "2523fc9edd99fb580b3f9f46e29cd4c5f1f4fc3d9d30d5b5d4d7745fa97c2d8bbd0f2de6aedd87339a72fb1bc65db5de6e7fcb6c5dfa86836e8159bf2a0a23da";

/// Which of the two managed APKs an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The UiAutomator2 server APK installed on the device under test.
    Server,
    /// The instrumentation APK that launches the server.
    TestBundle,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server APK"),
            Self::TestBundle => write!(f, "server test APK"),
        }
    }
}

/// One artifact of a release: where to fetch it, the digest it must have,
/// and where it lands on disk.
#[derive(Debug, Clone)]
pub struct ArtifactSpec {
    kind: ArtifactKind,
    url: String,
    expected_digest: Sha512Digest,
    destination: Utf8PathBuf,
}

impl ArtifactSpec {
    /// Create an artifact spec from explicit parts.
    #[must_use]
    pub fn new(
        kind: ArtifactKind,
        url: String,
        expected_digest: Sha512Digest,
        destination: Utf8PathBuf,
    ) -> Self {
        Self {
            kind,
            url,
            expected_digest,
            destination,
        }
    }

    /// Which APK this spec describes.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// The download URL for this artifact.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The digest the downloaded or on-disk bytes must hash to.
    #[must_use]
    pub fn expected_digest(&self) -> &Sha512Digest {
        &self.expected_digest
    }

    /// The local path this artifact is persisted at.
    #[must_use]
    pub fn destination(&self) -> &Utf8Path {
        &self.destination
    }
}

/// The fixed set of version, URLs, expected digests, and destination paths
/// describing one server release.
///
/// Constructed once at startup and passed to the setup entry points; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ReleaseDescriptor {
    version: String,
    install_dir: Utf8PathBuf,
    server: ArtifactSpec,
    test_bundle: ArtifactSpec,
}

impl ReleaseDescriptor {
    /// Describe the pinned release with both APKs rooted at `install_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidDigest`](crate::error::InstallerError::InvalidDigest)
    /// if a compiled-in digest constant is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ui2_installer::release::ReleaseDescriptor;
    ///
    /// let release = ReleaseDescriptor::pinned("/tmp/uiautomator2").unwrap();
    /// assert!(release.server().url().contains(release.version()));
    /// ```
    pub fn pinned(install_dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        let install_dir = install_dir.into();
        let server_name = format!("appium-uiautomator2-server-{SERVER_VERSION}.apk");
        let test_name = "appium-uiautomator2-server-debug-androidTest.apk";
        let server = ArtifactSpec::new(
            ArtifactKind::Server,
            asset_url(SERVER_VERSION, &server_name),
            Sha512Digest::try_from(SERVER_APK_SHA512)?,
            install_dir.join(&server_name),
        );
        let test_bundle = ArtifactSpec::new(
            ArtifactKind::TestBundle,
            asset_url(SERVER_VERSION, test_name),
            Sha512Digest::try_from(TEST_APK_SHA512)?,
            install_dir.join(test_name),
        );
        Ok(Self {
            version: SERVER_VERSION.to_owned(),
            install_dir,
            server,
            test_bundle,
        })
    }

    /// Assemble a descriptor from explicit parts.
    ///
    /// Both destinations are expected to live under `install_dir`; the
    /// setup flow creates that directory before writing.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        install_dir: Utf8PathBuf,
        server: ArtifactSpec,
        test_bundle: ArtifactSpec,
    ) -> Self {
        Self {
            version: version.into(),
            install_dir,
            server,
            test_bundle,
        }
    }

    /// The release tag both artifacts are pinned to.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The directory both artifacts are persisted under.
    #[must_use]
    pub fn install_dir(&self) -> &Utf8Path {
        &self.install_dir
    }

    /// The server APK spec.
    #[must_use]
    pub fn server(&self) -> &ArtifactSpec {
        &self.server
    }

    /// The instrumentation test APK spec.
    #[must_use]
    pub fn test_bundle(&self) -> &ArtifactSpec {
        &self.test_bundle
    }

    /// Both artifact specs, server first.
    #[must_use]
    pub fn artifacts(&self) -> [&ArtifactSpec; 2] {
        [&self.server, &self.test_bundle]
    }

    /// The local path of the server APK.
    #[must_use]
    pub fn server_apk_path(&self) -> &Utf8Path {
        self.server.destination()
    }

    /// The local path of the instrumentation test APK.
    #[must_use]
    pub fn test_apk_path(&self) -> &Utf8Path {
        self.test_bundle.destination()
    }
}

/// Construct the GitHub release asset URL for a given filename.
fn asset_url(version: &str, filename: &str) -> String {
    format!("https://github.com/{GITHUB_REPO}/releases/download/{version}/{filename}")
}

//! Shared test fixtures for the installer crate.

use crate::digest::sha512_digest;
use crate::release::{ArtifactKind, ArtifactSpec, ReleaseDescriptor};
use camino::Utf8Path;

/// Byte payload standing in for the server APK.
pub const SERVER_PAYLOAD: &[u8] = b"server apk bytes";

/// Byte payload standing in for the instrumentation test APK.
pub const TEST_PAYLOAD: &[u8] = b"server test apk bytes";

/// Fetch URL the fixture descriptor uses for the server APK.
pub const SERVER_URL: &str = "https://releases.test/server.apk";

/// Fetch URL the fixture descriptor uses for the test APK.
pub const TEST_URL: &str = "https://releases.test/server-test.apk";

/// Build a descriptor whose expected digests match the fixture payloads.
pub fn test_release(install_dir: &Utf8Path) -> ReleaseDescriptor {
    ReleaseDescriptor::new(
        "v9.9.9",
        install_dir.to_owned(),
        ArtifactSpec::new(
            ArtifactKind::Server,
            SERVER_URL.to_owned(),
            sha512_digest(SERVER_PAYLOAD),
            install_dir.join("server.apk"),
        ),
        ArtifactSpec::new(
            ArtifactKind::TestBundle,
            TEST_URL.to_owned(),
            sha512_digest(TEST_PAYLOAD),
            install_dir.join("server-test.apk"),
        ),
    )
}

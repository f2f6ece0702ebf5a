//! Unit tests for the verify-or-fetch orchestration.

use super::*;
use crate::download::{DownloadError, MockArtifactDownloader};
use crate::release::ArtifactKind;
use crate::test_utils::{SERVER_PAYLOAD, SERVER_URL, TEST_PAYLOAD, TEST_URL, test_release};
use camino::Utf8PathBuf;
use rstest::rstest;

const BAD_PAYLOAD: &[u8] = b"not the pinned bytes";

/// A temp root plus an install dir underneath it that does not exist yet.
fn install_root() -> (tempfile::TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
    (temp, root.join("uiautomator2"))
}

/// Downloader serving fixed payloads for the two fixture URLs.
fn paired_downloader(
    server_bytes: &'static [u8],
    test_bytes: &'static [u8],
) -> MockArtifactDownloader {
    let mut downloader = MockArtifactDownloader::new();
    downloader.expect_fetch().returning(move |url| {
        if url == SERVER_URL {
            Ok(server_bytes.to_vec())
        } else if url == TEST_URL {
            Ok(test_bytes.to_vec())
        } else {
            panic!("unexpected url: {url}")
        }
    });
    downloader
}

#[test]
fn valid_pair_skips_download() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);
    std::fs::create_dir_all(&install_dir).expect("create install dir");
    std::fs::write(release.server_apk_path(), SERVER_PAYLOAD).expect("seed server apk");
    std::fs::write(release.test_apk_path(), TEST_PAYLOAD).expect("seed test apk");

    // No expectations set: any fetch call panics the test.
    let downloader = MockArtifactDownloader::new();
    ensure_artifacts_with(&release, &downloader).expect("valid pair short-circuits");
}

#[test]
fn happy_path_installs_both_apks() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);
    assert!(!install_dir.as_std_path().exists());

    let downloader = paired_downloader(SERVER_PAYLOAD, TEST_PAYLOAD);
    ensure_artifacts_with(&release, &downloader).expect("install succeeds");

    assert!(install_dir.as_std_path().is_dir());
    let server = std::fs::read(release.server_apk_path()).expect("server apk present");
    let test = std::fs::read(release.test_apk_path()).expect("test apk present");
    assert_eq!(server, SERVER_PAYLOAD);
    assert_eq!(test, TEST_PAYLOAD);
    assert!(is_installed(&release).expect("existence check"));
}

#[cfg(unix)]
#[test]
fn installed_artifacts_have_0644_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);
    let downloader = paired_downloader(SERVER_PAYLOAD, TEST_PAYLOAD);
    ensure_artifacts_with(&release, &downloader).expect("install succeeds");

    for spec in release.artifacts() {
        let mode = std::fs::metadata(spec.destination())
            .expect("installed file")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644, "mode for {}", spec.kind());
    }
}

#[test]
fn stale_artifact_is_refetched_and_overwritten() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);
    std::fs::create_dir_all(&install_dir).expect("create install dir");
    std::fs::write(release.server_apk_path(), BAD_PAYLOAD).expect("seed stale server apk");
    std::fs::write(release.test_apk_path(), TEST_PAYLOAD).expect("seed test apk");

    let downloader = paired_downloader(SERVER_PAYLOAD, TEST_PAYLOAD);
    ensure_artifacts_with(&release, &downloader).expect("stale file is replaced");

    let server = std::fs::read(release.server_apk_path()).expect("server apk present");
    assert_eq!(server, SERVER_PAYLOAD);
}

#[rstest]
#[case::server(BAD_PAYLOAD, TEST_PAYLOAD, ArtifactKind::Server)]
#[case::test_bundle(SERVER_PAYLOAD, BAD_PAYLOAD, ArtifactKind::TestBundle)]
fn fetched_mismatch_aborts_without_writing(
    #[case] server_bytes: &'static [u8],
    #[case] test_bytes: &'static [u8],
    #[case] bad: ArtifactKind,
) {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);

    let downloader = paired_downloader(server_bytes, test_bytes);
    let result = ensure_artifacts_with(&release, &downloader);
    match result {
        Err(InstallerError::DigestMismatch { artifact, .. }) => assert_eq!(artifact, bad),
        other => panic!("expected DigestMismatch, got {other:?}"),
    }
    assert!(!release.server_apk_path().as_std_path().exists());
    assert!(!release.test_apk_path().as_std_path().exists());
}

#[test]
fn corrected_rerun_succeeds_after_mismatch() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);

    let bad_downloader = paired_downloader(BAD_PAYLOAD, TEST_PAYLOAD);
    ensure_artifacts_with(&release, &bad_downloader).expect_err("corrupted fetch fails");

    let good_downloader = paired_downloader(SERVER_PAYLOAD, TEST_PAYLOAD);
    ensure_artifacts_with(&release, &good_downloader).expect("corrected run succeeds");
    assert!(is_installed(&release).expect("existence check"));
}

#[test]
fn transport_failure_aborts_without_writing() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);

    let mut downloader = MockArtifactDownloader::new();
    downloader.expect_fetch().returning(|url| {
        Err(DownloadError::HttpError {
            url: url.to_owned(),
            reason: "connection refused".to_owned(),
        })
    });

    let result = ensure_artifacts_with(&release, &downloader);
    assert!(matches!(result, Err(InstallerError::Download(_))));
    assert!(!release.server_apk_path().as_std_path().exists());
    assert!(!release.test_apk_path().as_std_path().exists());
}

#[test]
fn is_installed_checks_existence_only() {
    let (_temp, install_dir) = install_root();
    let release = test_release(&install_dir);
    std::fs::create_dir_all(&install_dir).expect("create install dir");

    assert!(!is_installed(&release).expect("existence check"));

    std::fs::write(release.server_apk_path(), BAD_PAYLOAD).expect("seed server apk");
    assert!(
        !is_installed(&release).expect("existence check"),
        "one of two files is not installed"
    );

    std::fs::write(release.test_apk_path(), BAD_PAYLOAD).expect("seed test apk");
    assert!(
        is_installed(&release).expect("existence check"),
        "content is not inspected, only existence"
    );
}

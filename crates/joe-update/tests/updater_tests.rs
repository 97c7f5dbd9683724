//! End-to-end orchestration tests against a mock registry

mod common;

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use common::*;
use joe_update::{
    RegistryConfig, UpdateError, UpdateLock, UpdateOutcome, UpdateTarget, Updater,
};
use semver::Version;
use tempfile::TempDir;
use wiremock::MockServer;

fn test_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig {
        api_base: server.uri(),
        owner: TEST_OWNER.to_string(),
        repo: TEST_REPO.to_string(),
        download_timeout: Duration::from_secs(10),
    }
}

/// A workspace holding the fake installed binary and a scoped temp area
struct Fixture {
    _install: TempDir,
    temp: TempDir,
    target: UpdateTarget,
}

impl Fixture {
    fn new() -> Self {
        let install = TempDir::new().unwrap();
        let dest = install.path().join("joe");
        fs::write(&dest, ORIGINAL_CONTENT).unwrap();

        Self {
            target: UpdateTarget::from_exe_path(dest),
            _install: install,
            temp: TempDir::new().unwrap(),
        }
    }

    fn dest_content(&self) -> Vec<u8> {
        fs::read(&self.target.exe_path).unwrap()
    }

    fn updater(&self, current: &str, server: &MockServer) -> Updater {
        Updater::new(
            Version::parse(current).unwrap(),
            test_config(server),
            self.target.clone(),
        )
        .with_temp_dir(self.temp.path())
    }
}

#[cfg(unix)]
#[tokio::test]
async fn newer_release_is_downloaded_and_installed() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;
    mock_asset(&server, NEW_CONTENT).await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    let outcome = updater.run(&|| true).await.unwrap();

    match outcome {
        UpdateOutcome::Updated { version, deferred } => {
            assert_eq!(version, Version::new(1, 2, 0));
            assert!(deferred.is_none());
        }
        other => panic!("expected Updated, got {other:?}"),
    }

    assert_eq!(fixture.dest_content(), NEW_CONTENT);
    assert_eq!(dir_entry_count(fixture.temp.path()), 0);

    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(&fixture.target.exe_path)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[tokio::test]
async fn up_to_date_never_invokes_confirm() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.2.0", &server);

    let confirm_called = AtomicBool::new(false);
    let outcome = updater
        .run(&|| {
            confirm_called.store(true, Ordering::SeqCst);
            true
        })
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::UpToDate));
    assert!(!confirm_called.load(Ordering::SeqCst));
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);
}

#[tokio::test]
async fn newer_current_build_stays_in_place() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.3.0", &server);

    let outcome = updater.run(&|| true).await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::UpToDate));
}

#[tokio::test]
async fn declined_update_touches_nothing() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;
    mock_asset(&server, NEW_CONTENT).await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    let outcome = updater.run(&|| false).await.unwrap();

    assert!(matches!(outcome, UpdateOutcome::Declined));
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);
    assert_eq!(dir_entry_count(fixture.temp.path()), 0);
}

#[tokio::test]
async fn failed_download_leaves_destination_untouched() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;
    mock_failing_asset(&server).await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    let err = updater.run(&|| true).await.unwrap_err();

    assert!(matches!(err, UpdateError::Download { .. }), "got {err:?}");
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);
    assert_eq!(dir_entry_count(fixture.temp.path()), 0);
}

#[tokio::test]
async fn concurrent_run_fails_fast_with_locked() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;
    mock_asset(&server, NEW_CONTENT).await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    // First invocation holds the lock across the download stage
    let held = UpdateLock::acquire(&fixture.target.exe_path).unwrap();

    let err = updater.run(&|| true).await.unwrap_err();
    assert!(matches!(err, UpdateError::Locked { .. }), "got {err:?}");
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);

    drop(held);
    let outcome = updater.run(&|| true).await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated { .. }));
}

#[tokio::test]
async fn release_without_matching_asset_is_a_download_error() {
    let server = MockServer::start().await;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/releases/latest"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v1.2.0",
            "assets": [],
        })))
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    let err = updater.run(&|| true).await.unwrap_err();
    assert!(matches!(err, UpdateError::Download { .. }), "got {err:?}");
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);
}

#[tokio::test]
async fn check_reports_newer_version_without_side_effects() {
    let server = MockServer::start().await;
    mock_latest_release(&server, "v1.2.0").await;

    let fixture = Fixture::new();
    let updater = fixture.updater("1.0.0", &server);

    let newer = updater.check().await.unwrap();
    assert_eq!(newer, Some(Version::new(1, 2, 0)));
    assert_eq!(fixture.dest_content(), ORIGINAL_CONTENT);

    let updater = fixture.updater("1.2.0", &server);
    assert_eq!(updater.check().await.unwrap(), None);
}

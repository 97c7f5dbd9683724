//! Shared test infrastructure for joe-update tests

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_OWNER: &str = "acme";
pub const TEST_REPO: &str = "joe";

pub const ORIGINAL_CONTENT: &[u8] = b"original binary content";
pub const NEW_CONTENT: &[u8] = b"new binary content";

/// Mount a latest-release document with a `joe` binary asset served by the
/// same mock server under `/assets/joe`.
pub async fn mock_latest_release(server: &MockServer, tag: &str) {
    let body = json!({
        "tag_name": tag,
        "assets": [
            {
                "name": "joe",
                "browser_download_url": format!("{}/assets/joe", server.uri()),
            },
            {
                "name": "joe.zip",
                "browser_download_url": format!("{}/assets/joe.zip", server.uri()),
            },
        ],
    });

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/releases/latest"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the binary asset endpoint
pub async fn mock_asset(server: &MockServer, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path("/assets/joe"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Mount a binary asset endpoint that always fails
pub async fn mock_failing_asset(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/assets/joe"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

/// Count the entries left in a directory
pub fn dir_entry_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|it| it.count()).unwrap_or(0)
}

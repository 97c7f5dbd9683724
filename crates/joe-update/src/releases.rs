//! Release registry queries
//!
//! Queries the GitHub releases endpoint and normalizes the response into
//! [`ReleaseInfo`]. Raw registry tags are normalized exactly once, here at
//! ingestion; everything downstream only ever sees the bare semantic
//! version. No retries are performed at this layer.

use std::collections::HashMap;

use semver::Version;
use serde::Deserialize;
use tracing::debug;

use crate::error::UpdateError;
use crate::version::parse_version;

/// Wire shape of the registry's latest-release document
#[derive(Debug, Deserialize)]
struct ReleaseDocument {
    tag_name: Option<String>,
    #[serde(default)]
    assets: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    name: String,
    browser_download_url: String,
}

/// Normalized metadata for the latest published release.
///
/// Created once per update check and discarded after it.
#[derive(Debug, Clone)]
pub struct ReleaseInfo {
    /// Latest published version, tag prefix already stripped
    pub version: Version,

    /// Downloadable assets, keyed by asset name
    pub assets: HashMap<String, String>,
}

/// Read-only client for the release registry
pub struct ReleaseResolver {
    client: reqwest::Client,
    api_base: String,
}

impl ReleaseResolver {
    /// Create a resolver against the given registry API base URL
    pub fn new(api_base: impl Into<String>) -> Result<Self, UpdateError> {
        let api_base = api_base.into();
        let client = reqwest::Client::builder()
            .user_agent(concat!("joe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpdateError::network(&api_base, e))?;

        Ok(Self { client, api_base })
    }

    /// Fetch and normalize the latest release for `owner/repo`
    pub async fn resolve_latest(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<ReleaseInfo, UpdateError> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.api_base, owner, repo);
        debug!("Fetching latest release from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpdateError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::network(
                &url,
                format!("registry returned {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpdateError::network(&url, e))?;

        let document: ReleaseDocument =
            serde_json::from_str(&body).map_err(|e| UpdateError::parse(e))?;

        let tag = document.tag_name.ok_or_else(|| UpdateError::NotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })?;

        let version = parse_version(&tag)?;

        let assets = document
            .assets
            .into_iter()
            .map(|a| (a.name, a.browser_download_url))
            .collect();

        debug!("Latest release: {}", version);

        Ok(ReleaseInfo { version, assets })
    }
}

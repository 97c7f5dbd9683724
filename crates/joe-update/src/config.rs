//! Release registry configuration
//!
//! Repository coordinates are resolved once, with explicit precedence:
//! the `JOE_GITHUB_*` override variables win over the generic
//! `GITHUB_REPOSITORY*` variables, which win over the hardcoded default
//! owner/repo pair. Resolution takes a variable source as an argument so
//! the precedence rules are testable without touching the process
//! environment.

use std::time::Duration;

use tracing::debug;

/// Default repository owner
pub const DEFAULT_OWNER: &str = "necrogami";

/// Default repository name
pub const DEFAULT_REPO: &str = "joe";

/// Default release registry API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default download timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Explicit override variables
const OWNER_OVERRIDE_VAR: &str = "JOE_GITHUB_OWNER";
const REPO_OVERRIDE_VAR: &str = "JOE_GITHUB_REPO";

/// Generic CI-style variables (`owner` and `owner/repo` respectively)
const OWNER_VAR: &str = "GITHUB_REPOSITORY_OWNER";
const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Optional download timeout override, in seconds
const TIMEOUT_VAR: &str = "JOE_UPDATE_TIMEOUT_SECS";

/// Resolved release registry coordinates and transfer settings
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the release registry API
    pub api_base: String,

    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Timeout applied to the asset download
    pub download_timeout: Duration,
}

impl RegistryConfig {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn resolve(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| var(key).filter(|v| !v.is_empty());

        let owner = get(OWNER_OVERRIDE_VAR)
            .or_else(|| get(OWNER_VAR))
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());

        let repo = get(REPO_OVERRIDE_VAR)
            .or_else(|| {
                // GITHUB_REPOSITORY carries "owner/repo"
                get(REPOSITORY_VAR)
                    .and_then(|full| full.split('/').nth(1).map(str::to_string))
                    .filter(|r| !r.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_REPO.to_string());

        let timeout_secs = get(TIMEOUT_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        debug!("Release registry resolved to {}/{}", owner, repo);

        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            owner,
            repo,
            download_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

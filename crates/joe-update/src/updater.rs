//! Update orchestration
//!
//! Sequences version resolution, confirmation, download and replacement
//! into a single pass: no step is re-entered once left, and the flow is
//! strictly ordered (the download completes fully before the replace
//! begins). The confirmation callback is an injected capability owned by
//! the caller; an unattended caller supplies one that always returns true.

use std::path::PathBuf;

use semver::Version;
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::download::{AssetKind, Downloader};
use crate::error::UpdateError;
use crate::lock::UpdateLock;
use crate::releases::ReleaseResolver;
use crate::replace::{platform_replacer, Replace, ReplaceOutcome, ScheduledAction};
use crate::target::UpdateTarget;
use crate::version::update_available;

/// Terminal outcome of an update run.
///
/// Failures travel through the `Err` arm of [`Updater::run`] as
/// [`UpdateError`] values; these are the non-error terminal states.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The registry holds nothing newer than the running build
    UpToDate,

    /// The user declined the update
    Declined,

    /// The new version has been committed, or scheduled for commit
    Updated {
        /// Version now installed (or pending, when deferred)
        version: Version,

        /// Present when the swap happens after this process exits; the
        /// caller must report the restart caveat instead of claiming a
        /// synchronous guarantee
        deferred: Option<ScheduledAction>,
    },
}

/// Resolved inputs for the fetch-and-swap stages.
///
/// Constructed only after a newer version has been confirmed; the
/// up-to-date path never builds one.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// Where the candidate content comes from
    pub source_url: String,

    /// The executable being replaced
    pub dest_path: PathBuf,

    /// Asset kind, controls permission bits on the artifact
    pub kind: AssetKind,
}

/// Orchestrates one on-demand check-and-replace pass
pub struct Updater {
    current: Version,
    config: RegistryConfig,
    target: UpdateTarget,
    replacer: Box<dyn Replace + Send + Sync>,
    temp_dir: Option<PathBuf>,
}

impl Updater {
    /// Create an updater with explicit inputs
    pub fn new(current: Version, config: RegistryConfig, target: UpdateTarget) -> Self {
        Self {
            current,
            config,
            target,
            replacer: platform_replacer(),
            temp_dir: None,
        }
    }

    /// Create an updater from the process environment and the running
    /// executable's resolved path.
    ///
    /// Target resolution happens before the update pipeline begins, so a
    /// failure here surfaces as the underlying IO error rather than one of
    /// the pipeline's error kinds.
    pub fn from_environment(current: Version) -> std::io::Result<Self> {
        let target = UpdateTarget::resolve()?;
        Ok(Self::new(current, RegistryConfig::from_env(), target))
    }

    /// Override the swap strategy
    pub fn with_replacer(mut self, replacer: Box<dyn Replace + Send + Sync>) -> Self {
        self.replacer = replacer;
        self
    }

    /// Place download artifacts under `dir` instead of the system temp area
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// The version this updater considers currently installed
    pub fn current_version(&self) -> &Version {
        &self.current
    }

    /// Check whether a newer release exists, without side effects.
    ///
    /// Returns the newer version, or `None` when already up to date.
    pub async fn check(&self) -> Result<Option<Version>, UpdateError> {
        let resolver = ReleaseResolver::new(&self.config.api_base)?;
        let release = resolver
            .resolve_latest(&self.config.owner, &self.config.repo)
            .await?;

        if update_available(&self.current, &release.version) {
            Ok(Some(release.version))
        } else {
            Ok(None)
        }
    }

    /// Run one full update pass.
    ///
    /// `confirm` is invoked exactly once, and only when a newer release
    /// exists. The advisory lock is held from just before the download
    /// until this function returns, on every exit path.
    pub async fn run(&self, confirm: &dyn Fn() -> bool) -> Result<UpdateOutcome, UpdateError> {
        info!("Checking for updates ({} installed)", self.current);

        let resolver = ReleaseResolver::new(&self.config.api_base)?;
        let release = resolver
            .resolve_latest(&self.config.owner, &self.config.repo)
            .await?;

        if !update_available(&self.current, &release.version) {
            debug!("Already on the latest version");
            return Ok(UpdateOutcome::UpToDate);
        }

        info!("Update available: {} -> {}", self.current, release.version);

        if !confirm() {
            debug!("Update declined");
            return Ok(UpdateOutcome::Declined);
        }

        let _lock = UpdateLock::acquire(&self.target.exe_path)?;

        let asset_name = self.target.asset_name();
        let source_url = release
            .assets
            .get(asset_name)
            .cloned()
            .ok_or_else(|| UpdateError::Download {
                message: format!(
                    "release {} has no asset named {asset_name:?}",
                    release.version
                ),
            })?;

        let plan = UpdatePlan {
            source_url,
            dest_path: self.target.exe_path.clone(),
            kind: self.target.kind.asset_kind(),
        };

        let mut downloader = Downloader::new(self.config.download_timeout)?;
        if let Some(dir) = &self.temp_dir {
            downloader = downloader.with_temp_dir(dir);
        }

        let artifact = downloader.fetch(&plan.source_url, plan.kind).await?;

        let deferred = match self.replacer.replace(artifact, &plan.dest_path)? {
            ReplaceOutcome::Committed => None,
            ReplaceOutcome::Scheduled(action) => Some(action),
        };

        info!("Updated to {}", release.version);

        Ok(UpdateOutcome::Updated {
            version: release.version,
            deferred,
        })
    }
}

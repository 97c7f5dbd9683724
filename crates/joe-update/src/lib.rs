//! Self-update functionality for the joe CLI
//!
//! Provides:
//! - Version checking against GitHub releases
//! - Binary download into a scoped temporary artifact
//! - Platform-aware executable replacement (atomic rename on Unix,
//!   deferred helper script on Windows)
//! - An advisory file lock guarding concurrent update runs

pub mod config;
pub mod download;
pub mod error;
pub mod lock;
pub mod releases;
pub mod replace;
pub mod target;
pub mod updater;
pub mod version;

pub use config::RegistryConfig;
pub use download::{AssetKind, Downloader};
pub use error::UpdateError;
pub use lock::UpdateLock;
pub use releases::{ReleaseInfo, ReleaseResolver};
pub use replace::{Replace, ReplaceOutcome, ScheduledAction};
pub use target::{BundleKind, UpdateTarget};
pub use updater::{UpdateOutcome, UpdatePlan, Updater};

/// Current CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

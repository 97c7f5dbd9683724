//! Error types for the update pipeline
//!
//! One variant per failure stage, matching the stages of
//! [`crate::updater::Updater::run`]. Lower stages never recover on behalf
//! of the caller; every error propagates to the orchestrator as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using joe-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors surfaced by the self-update pipeline
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Transport or connection failure while talking to the release registry
    #[error("failed to reach the release registry at {url}: {message}")]
    Network { url: String, message: String },

    /// Registry response was not well-formed
    #[error("release registry response was not well-formed: {message}")]
    Parse { message: String },

    /// Well-formed response, but no release tag present
    #[error("no release tag found for {owner}/{repo}")]
    NotFound { owner: String, repo: String },

    /// Fetch-stage failure, including timeout and truncation
    #[error("download failed: {message}")]
    Download { message: String },

    /// Swap-stage failure; the destination is left as it was
    #[error("failed to replace {dest}: {message}")]
    Replace { dest: PathBuf, message: String },

    /// Another invocation holds the update lock
    #[error("update lock unavailable at {path}: {message}")]
    Locked { path: PathBuf, message: String },
}

impl UpdateError {
    pub(crate) fn network(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(message: impl ToString) -> Self {
        Self::Parse {
            message: message.to_string(),
        }
    }

    pub(crate) fn download(message: impl ToString) -> Self {
        Self::Download {
            message: message.to_string(),
        }
    }

    pub(crate) fn replace(dest: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Replace {
            dest: dest.into(),
            message: message.to_string(),
        }
    }
}

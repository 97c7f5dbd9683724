//! Error types for joe-core

use thiserror::Error;

/// Result type alias using joe-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for joe
#[derive(Error, Debug)]
pub enum Error {
    /// Domain name failed validation
    #[error("invalid domain name: {domain}")]
    InvalidDomain { domain: String },

    /// Zone file missing on disk
    #[error("zone file not found: {path}")]
    ZoneFileNotFound { path: String },

    /// Zone file content names no recognizable origin domain
    #[error("could not determine domain name from zone file")]
    UnknownOrigin,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid domain error
    pub fn invalid_domain(domain: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
        }
    }

    /// Create a zone-file-not-found error
    pub fn zone_file_not_found(path: impl Into<String>) -> Self {
        Self::ZoneFileNotFound { path: path.into() }
    }
}

//! Asset download into a scoped temporary artifact
//!
//! The downloader streams remote content into a uniquely named temporary
//! file with all-or-nothing semantics: a failed or truncated transfer
//! removes the artifact before the error is returned, so the caller never
//! observes an incomplete file. The final destination path is unknown to
//! this layer; it only hands back the completed artifact.

use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::UpdateError;

/// What kind of asset is being fetched; controls the permission bits
/// applied to the completed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Standalone native binary, marked executable
    Executable,
    /// Archive-style bundle, ordinary file permissions
    Archive,
}

/// Streaming downloader with a configurable timeout
pub struct Downloader {
    client: reqwest::Client,
    temp_dir: PathBuf,
}

impl Downloader {
    /// Create a downloader; `timeout` bounds the whole transfer
    pub fn new(timeout: Duration) -> Result<Self, UpdateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("joe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UpdateError::download(e))?;

        Ok(Self {
            client,
            temp_dir: std::env::temp_dir(),
        })
    }

    /// Place temporary artifacts under `dir` instead of the system temp area
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Fetch `url` into a temporary artifact.
    ///
    /// The returned handle deletes the file on drop; the replace step
    /// consumes it to commit the content into place.
    pub async fn fetch(&self, url: &str, kind: AssetKind) -> Result<NamedTempFile, UpdateError> {
        debug!("Downloading {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::download(format!(
                "{url} returned {status}"
            )));
        }

        let declared_len = response.content_length();

        let mut artifact = tempfile::Builder::new()
            .prefix("joe-update-")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| UpdateError::download(format!("could not create temp file: {e}")))?;

        use std::io::Write;

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify(url, e))?;
            artifact
                .as_file_mut()
                .write_all(&chunk)
                .map_err(|e| UpdateError::download(format!("write failed: {e}")))?;
            written += chunk.len() as u64;
        }

        if let Some(expected) = declared_len {
            if written != expected {
                // Artifact is dropped and removed before this returns
                return Err(UpdateError::download(format!(
                    "transfer truncated: got {written} of {expected} bytes"
                )));
            }
        }

        set_permissions(&mut artifact, kind)?;

        debug!("Downloaded {} bytes to {:?}", written, artifact.path());
        Ok(artifact)
    }
}

#[cfg(unix)]
fn set_permissions(artifact: &mut NamedTempFile, kind: AssetKind) -> Result<(), UpdateError> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let mode = match kind {
        AssetKind::Executable => 0o755,
        AssetKind::Archive => 0o644,
    };

    artifact
        .as_file()
        .set_permissions(Permissions::from_mode(mode))
        .map_err(|e| UpdateError::download(format!("could not set permissions: {e}")))
}

#[cfg(not(unix))]
fn set_permissions(_artifact: &mut NamedTempFile, _kind: AssetKind) -> Result<(), UpdateError> {
    Ok(())
}

fn classify(url: &str, e: reqwest::Error) -> UpdateError {
    if e.is_timeout() {
        UpdateError::download(format!("{url} timed out"))
    } else {
        UpdateError::download(format!("{url}: {e}"))
    }
}

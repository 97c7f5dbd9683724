//! Executable replacement strategies
//!
//! The swap is polymorphic over platform capability, selected once by host
//! operating-system family. Unix hosts can rename over a running binary;
//! Windows refuses to overwrite a mapped executable, so the swap is
//! deferred to a helper script that runs after this process exits.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::UpdateError;

/// A fire-and-forget action handed off to the operating system.
///
/// The helper runs entirely outside this process's lifetime: it has no
/// return channel and its completion is never confirmed. If the helper is
/// killed or cleaned up before it runs, the replacement silently does not
/// happen.
#[derive(Debug)]
pub struct ScheduledAction {
    /// Path of the launched helper script
    pub script: PathBuf,
}

/// How the swap concluded
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// The destination now holds the new content
    Committed,
    /// The swap was handed to a detached helper and will complete after
    /// this process exits
    Scheduled(ScheduledAction),
}

/// Executable swap strategy
pub trait Replace {
    /// Commit `artifact` over `dest`, or schedule a deferred swap.
    ///
    /// On failure the destination is left exactly as it was.
    fn replace(&self, artifact: NamedTempFile, dest: &Path)
        -> Result<ReplaceOutcome, UpdateError>;
}

/// Select the swap strategy for the host platform
pub fn platform_replacer() -> Box<dyn Replace + Send + Sync> {
    #[cfg(unix)]
    {
        Box::new(UnixReplace)
    }
    #[cfg(windows)]
    {
        Box::new(WindowsReplace)
    }
}

/// Synchronous atomic swap via rename
#[cfg(unix)]
pub struct UnixReplace;

#[cfg(unix)]
impl Replace for UnixReplace {
    fn replace(
        &self,
        artifact: NamedTempFile,
        dest: &Path,
    ) -> Result<ReplaceOutcome, UpdateError> {
        use std::io::ErrorKind;

        debug!("Replacing {:?} via atomic rename", dest);

        match artifact.persist(dest) {
            Ok(_) => {}
            Err(e) if e.error.kind() == ErrorKind::CrossesDevices => {
                // Temp area on a different volume; stage a copy next to the
                // destination so the final rename stays on one filesystem.
                stage_and_rename(e.file, dest)?;
            }
            Err(e) => {
                // Rename failed, nothing has changed; the temp file is
                // dropped and removed with it.
                return Err(UpdateError::replace(dest, e.error));
            }
        }

        // Some filesystems attenuate mode bits across a rename. Re-apply
        // the executable bit; if this fails the content has still been
        // swapped, which is reported rather than hidden.
        if let Err(e) = set_executable(dest) {
            warn!(
                "Binary replaced, but restoring the executable bit failed: {}",
                e
            );
        }

        info!("Replaced {:?}", dest);
        Ok(ReplaceOutcome::Committed)
    }
}

/// Copy the artifact into the destination directory, then rename over the
/// destination. Used when the temp area lives on another volume.
#[cfg(unix)]
fn stage_and_rename(artifact: NamedTempFile, dest: &Path) -> Result<(), UpdateError> {
    use std::fs;

    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let staged = tempfile::Builder::new()
        .prefix(".joe-staged-")
        .tempfile_in(dir)
        .map_err(|e| UpdateError::replace(dest, format!("could not stage copy: {e}")))?;

    fs::copy(artifact.path(), staged.path())
        .map_err(|e| UpdateError::replace(dest, format!("could not stage copy: {e}")))?;

    staged
        .persist(dest)
        .map_err(|e| UpdateError::replace(dest, e.error))?;

    debug!("Cross-device fallback: staged copy renamed into place");
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, Permissions::from_mode(0o755))
}

/// Deferred swap through a detached batch script.
///
/// Windows refuses to overwrite a binary mapped by a running process, so
/// the script waits for this process to exit, copies the artifact over the
/// destination, then deletes the artifact and itself.
#[cfg(windows)]
pub struct WindowsReplace;

#[cfg(windows)]
impl Replace for WindowsReplace {
    fn replace(
        &self,
        artifact: NamedTempFile,
        dest: &Path,
    ) -> Result<ReplaceOutcome, UpdateError> {
        use std::fs;
        use std::process::Command;

        // The artifact must outlive this process; disarm its cleanup.
        let (_, temp_path) = artifact
            .keep()
            .map_err(|e| UpdateError::replace(dest, e.error))?;

        let script = std::env::temp_dir().join(format!("joe-update-{}.bat", std::process::id()));

        let body = format!(
            "@echo off\r\n\
             timeout /t 1 /nobreak > nul\r\n\
             copy /Y \"{temp}\" \"{dest}\"\r\n\
             del \"{temp}\"\r\n\
             del \"%~f0\"\r\n",
            temp = temp_path.display(),
            dest = dest.display(),
        );

        fs::write(&script, body).map_err(|e| UpdateError::replace(dest, e))?;

        // Detached and never awaited; completion is not confirmed.
        Command::new("cmd")
            .args(["/C", "start", "/b", ""])
            .arg(&script)
            .spawn()
            .map_err(|e| UpdateError::replace(dest, e))?;

        info!("Scheduled deferred replacement via {:?}", script);
        Ok(ReplaceOutcome::Scheduled(ScheduledAction { script }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn artifact_with(dir: &TempDir, content: &[u8]) -> NamedTempFile {
        let mut artifact = tempfile::Builder::new()
            .prefix("joe-update-")
            .tempfile_in(dir.path())
            .unwrap();
        artifact.write_all(content).unwrap();
        artifact
    }

    #[test]
    fn replace_swaps_content_and_sets_exec_bit() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("joe");
        fs::write(&dest, b"old binary").unwrap();

        let artifact = artifact_with(&dir, b"new binary");
        let outcome = UnixReplace.replace(artifact, &dest).unwrap();

        assert!(matches!(outcome, ReplaceOutcome::Committed));
        assert_eq!(fs::read(&dest).unwrap(), b"new binary");

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn replace_into_missing_directory_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing").join("joe");

        let artifact = artifact_with(&dir, b"new binary");
        let artifact_path = artifact.path().to_path_buf();

        let result = UnixReplace.replace(artifact, &dest);
        assert!(matches!(result, Err(UpdateError::Replace { .. })));
        assert!(!dest.exists());
        assert!(!artifact_path.exists());
    }
}

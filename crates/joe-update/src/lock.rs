//! Advisory lock guarding concurrent update runs
//!
//! The destination executable is a shared resource that independent
//! invocations of the tool could race on. A lock file beside the
//! executable, holding the owning process id, is acquired before the
//! download stage. The guard releases the lock on drop, and the operating
//! system releases it if the process terminates abnormally.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::{debug, warn};

use crate::error::UpdateError;

/// Held advisory lock; dropping it releases the lock
#[derive(Debug)]
pub struct UpdateLock {
    file: std::fs::File,
    path: PathBuf,
}

impl UpdateLock {
    /// Acquire the lock guarding `dest`.
    ///
    /// Fails fast with [`UpdateError::Locked`] when another invocation
    /// already holds it; no blocking wait is performed.
    pub fn acquire(dest: &Path) -> Result<Self, UpdateError> {
        let path = lock_path(dest);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| UpdateError::Locked {
                path: path.clone(),
                message: format!("could not open lock file: {e}"),
            })?;

        let held = match file.try_lock_exclusive() {
            Ok(held) => held,
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => {
                return Err(UpdateError::Locked {
                    path,
                    message: format!("could not acquire lock: {e}"),
                })
            }
        };

        if !held {
            return Err(UpdateError::Locked {
                path,
                message: "another update is already in progress".to_string(),
            });
        }

        // Record the owning pid as a diagnostic marker
        let _ = file.set_len(0);
        let _ = write!(file, "{}", std::process::id());

        debug!("Acquired update lock at {:?}", path);
        Ok(Self { file, path })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UpdateLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release update lock: {}", e);
        }
        let _ = fs::remove_file(&self.path);
        debug!("Released update lock at {:?}", self.path);
    }
}

fn lock_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "joe".to_string());

    dest.with_file_name(format!(".{name}.update.lock"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_is_exclusive_and_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("joe");
        fs::write(&dest, b"binary").unwrap();

        let first = UpdateLock::acquire(&dest).expect("first acquisition should succeed");

        let second = UpdateLock::acquire(&dest);
        assert!(matches!(second, Err(UpdateError::Locked { .. })));

        // Destination untouched by the failed attempt
        assert_eq!(fs::read(&dest).unwrap(), b"binary");

        drop(first);
        let third = UpdateLock::acquire(&dest).expect("lock should be free again after drop");
        drop(third);
    }

    #[test]
    fn lock_file_sits_beside_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("joe");
        fs::write(&dest, b"binary").unwrap();

        let lock = UpdateLock::acquire(&dest).unwrap();
        assert_eq!(lock.path().parent(), dest.parent());
        assert!(lock.path().exists());

        let path = lock.path().to_path_buf();
        drop(lock);
        assert!(!path.exists());
    }

    #[test]
    fn lock_records_process_id() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("joe");
        fs::write(&dest, b"binary").unwrap();

        let lock = UpdateLock::acquire(&dest).unwrap();
        let recorded = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(recorded, std::process::id().to_string());
    }
}

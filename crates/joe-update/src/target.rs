//! Resolution of the executable to be replaced
//!
//! The target is resolved once at orchestration start by introspecting how
//! the running process was invoked. A process running from inside an
//! archive-style bundle reports an internal entry path; replacing that
//! path would be meaningless, so it is normalized to the outer bundle
//! file.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::download::AssetKind;

/// Archive extensions recognized as outer bundle files
const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".tar.gz"];

/// How the running executable is packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// Single native binary
    Standalone,
    /// Archive-style bundle
    Archive,
}

impl BundleKind {
    /// The asset kind to fetch for this bundle form
    pub fn asset_kind(self) -> AssetKind {
        match self {
            BundleKind::Standalone => AssetKind::Executable,
            BundleKind::Archive => AssetKind::Archive,
        }
    }
}

/// The on-disk executable an update will replace
#[derive(Debug, Clone)]
pub struct UpdateTarget {
    /// Absolute path of the file to swap
    pub exe_path: PathBuf,

    /// Packaging form, which decides the asset to download
    pub kind: BundleKind,
}

impl UpdateTarget {
    /// Resolve the target from the running process
    pub fn resolve() -> io::Result<Self> {
        Ok(Self::from_exe_path(std::env::current_exe()?))
    }

    /// Normalize an executable path into a replaceable target.
    ///
    /// If any ancestor component names an archive file, the path is
    /// truncated to that outer file and the kind is [`BundleKind::Archive`].
    pub fn from_exe_path(path: PathBuf) -> Self {
        let mut outer = PathBuf::new();

        for component in path.components() {
            outer.push(component);

            if let Component::Normal(name) = component {
                let name = name.to_string_lossy();
                if is_archive_name(&name) {
                    return Self {
                        exe_path: outer,
                        kind: BundleKind::Archive,
                    };
                }
            }
        }

        Self {
            exe_path: path,
            kind: BundleKind::Standalone,
        }
    }

    /// Name of the release asset to fetch for this target
    pub fn asset_name(&self) -> &'static str {
        match self.kind {
            BundleKind::Standalone => "joe",
            BundleKind::Archive => "joe.zip",
        }
    }

    /// Directory containing the target executable
    pub fn install_dir(&self) -> &Path {
        self.exe_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn is_archive_name(name: &str) -> bool {
    ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_binary_is_standalone() {
        let target = UpdateTarget::from_exe_path(PathBuf::from("/usr/local/bin/joe"));
        assert_eq!(target.kind, BundleKind::Standalone);
        assert_eq!(target.exe_path, PathBuf::from("/usr/local/bin/joe"));
        assert_eq!(target.asset_name(), "joe");
    }

    #[test]
    fn internal_entry_path_normalizes_to_outer_bundle() {
        let target = UpdateTarget::from_exe_path(PathBuf::from("/opt/joe.zip/bin/joe"));
        assert_eq!(target.kind, BundleKind::Archive);
        assert_eq!(target.exe_path, PathBuf::from("/opt/joe.zip"));
        assert_eq!(target.asset_name(), "joe.zip");
    }

    #[test]
    fn bundle_path_itself_is_archive() {
        let target = UpdateTarget::from_exe_path(PathBuf::from("/opt/joe.zip"));
        assert_eq!(target.kind, BundleKind::Archive);
        assert_eq!(target.exe_path, PathBuf::from("/opt/joe.zip"));
    }

    #[test]
    fn normalization_keeps_leading_root() {
        let target = UpdateTarget::from_exe_path(PathBuf::from("/opt/joe.zip/joe"));
        assert!(target.exe_path.is_absolute());
    }
}

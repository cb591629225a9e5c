use crate::{Error, Result};
use std::path::{Path, PathBuf};

// Chrome cache subdirectories safe to delete between runs.
const CACHE_DIRS: [&str; 3] = ["Cache", "Code Cache", "GPUCache"];

/// A Chrome user-data directory.
///
/// Temporary directories are deleted on drop; persistent ones live under
/// `~/.magpie/profiles/<name>` and survive across runs so that cookies and
/// site state can be reused.
pub struct UserDataDir {
    path: PathBuf,
    is_temporary: bool,
}

impl UserDataDir {
    /// Create a fresh directory that is removed when the value is dropped.
    pub fn temporary() -> Result<Self> {
        let temp_dir = tempfile::tempdir().map_err(Error::Io)?;
        let path = temp_dir.keep();

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// Open (creating if needed) a persistent directory at the given path.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(Error::Io)?;
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    /// Root directory holding all named persistent profiles.
    pub fn profiles_root() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Browser("Could not determine home directory".to_string()))?;

        Ok(home.join(".magpie").join("profiles"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }

    /// Total size in bytes of everything under the directory.
    pub fn size(&self) -> Result<u64> {
        dir_size(&self.path)
    }

    /// Remove Chrome cache subdirectories, keeping cookies and settings.
    pub fn clear_cache(&self) -> Result<()> {
        for name in CACHE_DIRS {
            let cache_path = self.path.join(name);
            if cache_path.exists() {
                std::fs::remove_dir_all(&cache_path).map_err(Error::Io)?;
            }
        }

        Ok(())
    }
}

impl Drop for UserDataDir {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

fn dir_size(path: &Path) -> Result<u64> {
    let mut total = 0;

    for entry in std::fs::read_dir(path).map_err(Error::Io)? {
        let entry = entry.map_err(Error::Io)?;
        let metadata = entry.metadata().map_err(Error::Io)?;

        if metadata.is_dir() {
            total += dir_size(&entry.path())?;
        } else {
            total += metadata.len();
        }
    }

    Ok(total)
}

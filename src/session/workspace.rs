//! Per-session scratch directory
//!
//! Originals, processed images and previews live here while a document is
//! being edited. The directory is removed when the [`Workspace`] is
//! dropped, whichever way the session ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("redshape-").tempdir()?;
        tracing::debug!(path = %dir.path().display(), "Created session workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `bytes` to `name` inside the workspace
    pub fn write(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Copy an existing file to `name` inside the workspace
    pub fn copy(&self, from: &Path, name: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::copy(from, &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_on_drop() {
        let workspace = Workspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        let file = workspace.write("a.bin", b"abc").unwrap();
        let copy = workspace.copy(&file, "b.bin").unwrap();

        assert_eq!(fs::read(&copy).unwrap(), b"abc");
        drop(workspace);
        assert!(!path.exists());
    }
}

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;

/// A directory that notes are written into. Relative paths are always joined
/// beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    /// Absolutize `path` and make sure it exists.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(path.as_ref())?;
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Create a subdirectory, reusing it if it already exists.
    pub async fn create(&self, relative: impl AsRef<Path>) -> Result<OutputDirectory> {
        let root = self.join(relative);
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Write a file, replacing any previous contents.
    pub async fn write_file(
        &self,
        relative: impl AsRef<Path>,
        contents: &str,
    ) -> Result<PathBuf> {
        let path = self.join(relative);
        fs::write(&path, contents).await?;
        Ok(path)
    }
}

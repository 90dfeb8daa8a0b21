use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// Byte-blob store for raw course payloads, keyed by course slug.
pub trait CourseCache {
    /// Returns `None` on a cache miss.
    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>>;
    async fn write(&self, slug: &str, data: &[u8]) -> Result<()>;
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("fem-helper")
}

/// Get the path for a cached course payload
pub fn get_course_path(cache_dir: &Path, slug: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", slug))
}

/// Cache of course payloads stored as `<slug>.json` files.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache rooted in the user's cache directory.
    pub fn user() -> Self {
        Self::new(get_root_cache_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CourseCache for DiskCache {
    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>> {
        let path = get_course_path(&self.root, slug);
        match fs::read(&path).await {
            Ok(data) => {
                debug!(path = %path.display(), "course cache hit");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "course cache miss");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, slug: &str, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::write(get_course_path(&self.root, slug), data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("nested"));

        assert_eq!(cache.read("go-basics").await.unwrap(), None);

        cache.write("go-basics", b"{}").await.unwrap();
        assert_eq!(cache.read("go-basics").await.unwrap(), Some(b"{}".to_vec()));
        assert!(dir.path().join("nested/go-basics.json").exists());
    }
}

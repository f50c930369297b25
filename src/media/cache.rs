use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::TrimResult;

/// The only directory the editor writes to. File names are random UUIDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheDir {
    root: PathBuf,
}

impl Default for CacheDir {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("vidtrim"))
    }
}

impl CacheDir {
    /// Cache rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh, collision-resistant path with extension `ext`. Does not touch the filesystem.
    pub fn unique_path(&self, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{ext}", uuid::Uuid::new_v4()))
    }

    /// Create the cache root if it does not exist.
    pub async fn ensure(&self) -> TrimResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| {
                format!("failed to create cache directory '{}'", self.root.display())
            })?;
        Ok(())
    }

    /// Remove an artifact this cache produced. Paths outside the root are left alone and a
    /// missing file is not an error.
    pub async fn discard(&self, path: &Path) {
        if !path.starts_with(&self.root) {
            tracing::debug!(path = %path.display(), "not a cache artifact, kept");
            return;
        }
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "cache artifact discarded"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to discard cache artifact"
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/cache.rs"]
mod tests;

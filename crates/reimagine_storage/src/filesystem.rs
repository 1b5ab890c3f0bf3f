//! Filesystem artifact store.
//!
//! Artifacts are laid out one directory per category:
//!
//! ```text
//! outputs/
//! ├── chunks/
//! │   └── chunks.json
//! ├── dna/
//! │   ├── local_summaries.json
//! │   ├── final_dna.json
//! │   └── transformation_map.json
//! ├── scenes/
//! │   └── scene_0_opening.json
//! └── final/
//!     └── final_story.txt
//! ```

use crate::{ArtifactCategory, ArtifactContent, ArtifactStore};
use reimagine_error::{ReimagineResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Filesystem artifact store rooted at an output directory.
///
/// Writes go to a temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSystemArtifactStore {
    base_path: PathBuf,
}

impl FileSystemArtifactStore {
    /// Create a store, creating the base and category directories.
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ReimagineResult<Self> {
        let base_path = base_path.into();

        for category in ArtifactCategory::iter() {
            let dir = base_path.join(category.as_ref());
            std::fs::create_dir_all(&dir).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }

        tracing::info!(path = %base_path.display(), "Created artifact store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of an artifact.
    pub fn path_for(&self, name: &str, category: ArtifactCategory) -> PathBuf {
        self.base_path.join(category.as_ref()).join(name)
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    #[tracing::instrument(skip(self, content), fields(category = %category))]
    async fn save(
        &self,
        content: ArtifactContent,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<String> {
        let path = self.path_for(name, category);
        let rendered = content.render()?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, rendered.as_bytes())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), bytes = rendered.len(), "Saved artifact");
        Ok(path.to_string_lossy().to_string())
    }

    #[tracing::instrument(skip(self), fields(category = %category))]
    async fn load(
        &self,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<ArtifactContent> {
        let path = self.path_for(name, category);

        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path = %path.display(), "Loaded artifact");
        ArtifactContent::decode(name, raw)
    }
}

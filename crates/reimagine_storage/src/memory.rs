//! In-memory artifact store.

use crate::{ArtifactCategory, ArtifactContent, ArtifactStore};
use reimagine_error::{ReimagineResult, StorageError, StorageErrorKind};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Artifact store that keeps everything in process memory.
///
/// Content round-trips through the same rendering as the filesystem store,
/// so a loaded artifact looks exactly like one read back from disk.
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    artifacts: Mutex<BTreeMap<(ArtifactCategory, String), String>>,
}

impl InMemoryArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names stored under a category, sorted.
    pub fn names(&self, category: ArtifactCategory) -> Vec<String> {
        self.artifacts
            .lock()
            .map(|artifacts| {
                artifacts
                    .keys()
                    .filter(|(c, _)| *c == category)
                    .map(|(_, name)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.lock().map(|a| a.len()).unwrap_or_default()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    #[tracing::instrument(skip(self, content), fields(category = %category))]
    async fn save(
        &self,
        content: ArtifactContent,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<String> {
        let rendered = content.render()?;
        let mut artifacts = self.artifacts.lock().map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("store lock poisoned: {}", e)))
        })?;
        artifacts.insert((category, name.to_string()), rendered);
        tracing::debug!("Stored artifact in memory");
        Ok(format!("memory://{}/{}", category, name))
    }

    #[tracing::instrument(skip(self), fields(category = %category))]
    async fn load(
        &self,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<ArtifactContent> {
        let raw = {
            let artifacts = self.artifacts.lock().map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "store lock poisoned: {}",
                    e
                )))
            })?;
            artifacts
                .get(&(category, name.to_string()))
                .cloned()
                .ok_or_else(|| {
                    StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", category, name)))
                })?
        };
        ArtifactContent::decode(name, raw)
    }
}

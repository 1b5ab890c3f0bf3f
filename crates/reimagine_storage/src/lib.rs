//! Artifact storage for the Reimagine pipeline.
//!
//! Every stage persists what it produced (chunks, DNA, world definition,
//! scenes, final story) under a fixed name inside one of four categories.
//! Structured artifacts are stored as pretty-printed JSON, prose as text.
//!
//! # Example
//!
//! ```rust
//! use reimagine_storage::{ArtifactCategory, ArtifactContent, ArtifactStore, InMemoryArtifactStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryArtifactStore::new();
//! store
//!     .save(ArtifactContent::text("The end."), "final_story.txt", ArtifactCategory::Final)
//!     .await?;
//!
//! let loaded = store.load("final_story.txt", ArtifactCategory::Final).await?;
//! assert_eq!(loaded.as_text(), Some("The end."));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use reimagine_error::{ReimagineResult, StorageError, StorageErrorKind};
use serde::Serialize;
use serde_json::Value as JsonValue;

mod filesystem;
mod memory;

pub use filesystem::FileSystemArtifactStore;
pub use memory::InMemoryArtifactStore;

/// Trait for pluggable artifact stores.
///
/// Every write targets a distinct `(category, name)` key.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact and return where it was written.
    async fn save(
        &self,
        content: ArtifactContent,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<String>;

    /// Load a previously saved artifact.
    ///
    /// Names ending in `.json` are parsed as JSON; all others load as text.
    async fn load(&self, name: &str, category: ArtifactCategory)
    -> ReimagineResult<ArtifactContent>;
}

/// Category an artifact is filed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactCategory {
    /// Chunk layout of the source text
    Chunks,
    /// Story DNA, world definition and transformation map
    Dna,
    /// Individual generated scenes
    Scenes,
    /// The polished story
    Final,
}

/// Content of a stored artifact.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum ArtifactContent {
    /// Structured data, written as pretty-printed JSON
    Json(JsonValue),
    /// Plain text, written verbatim
    Text(String),
}

impl ArtifactContent {
    /// Serialize a value into JSON content.
    ///
    /// # Errors
    ///
    /// Returns a storage serialization error if the value cannot be
    /// represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ReimagineResult<Self> {
        serde_json::to_value(value).map(Self::Json).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string())).into()
        })
    }

    /// Text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Borrow as text, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Borrow as JSON, if this is structured content.
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Render to the bytes written on disk.
    pub(crate) fn render(&self) -> ReimagineResult<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Json(value) => serde_json::to_string_pretty(value).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(e.to_string())).into()
            }),
        }
    }

    /// Decode stored text according to the artifact name.
    pub(crate) fn decode(name: &str, raw: String) -> ReimagineResult<Self> {
        if name.ends_with(".json") {
            serde_json::from_str(&raw).map(Self::Json).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(format!("{}: {}", name, e)))
                    .into()
            })
        } else {
            Ok(Self::Text(raw))
        }
    }
}

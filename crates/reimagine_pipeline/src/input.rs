//! Source story input and cleanup of temporary documents.

use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
use reimagine_interface::TextExtractor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the source story comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// Text supplied directly
    Text(String),
    /// A document read through a [`TextExtractor`]
    Document {
        /// Location of the document
        path: PathBuf,
        /// Remove the document once the run ends
        temporary: bool,
    },
}

impl SourceInput {
    /// Pasted text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A document that is left in place.
    pub fn document(path: impl Into<PathBuf>) -> Self {
        Self::Document {
            path: path.into(),
            temporary: false,
        }
    }

    /// An uploaded document that is removed when the run ends.
    pub fn temporary_document(path: impl Into<PathBuf>) -> Self {
        Self::Document {
            path: path.into(),
            temporary: true,
        }
    }

    /// Guard that removes a temporary document when dropped.
    ///
    /// Take the guard before reading so the file is removed on every path
    /// out of the run, including errors.
    pub fn cleanup_guard(&self) -> Option<TemporaryInput> {
        match self {
            Self::Document {
                path,
                temporary: true,
            } => Some(TemporaryInput::new(path)),
            _ => None,
        }
    }

    /// Resolve the source to text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::EmptySource`] if the text has no words,
    /// or the extractor's error if the document cannot be read.
    pub async fn read(&self, extractor: &dyn TextExtractor) -> ReimagineResult<String> {
        let text = match self {
            Self::Text(text) => text.clone(),
            Self::Document { path, .. } => extractor.extract(path).await?,
        };

        if text.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptySource).into());
        }
        Ok(text)
    }
}

/// Removes a temporary input file when dropped.
#[derive(Debug)]
pub struct TemporaryInput {
    path: PathBuf,
}

impl TemporaryInput {
    /// Guard for `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path being guarded.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TemporaryInput {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Removed temporary input"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Temporary input already gone")
            }
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove temporary input"),
        }
    }
}

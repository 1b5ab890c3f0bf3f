//! Source document text extraction.

use async_trait::async_trait;
use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
use std::path::Path;

/// Turns a source document into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the document at `path`.
    async fn extract(&self, path: &Path) -> ReimagineResult<String>;
}

/// Extractor for UTF-8 text documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract(&self, path: &Path) -> ReimagineResult<String> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::InputRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        tracing::info!(words = text.split_whitespace().count(), "Extracted source text");
        Ok(text)
    }
}

//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, PipelineError, StorageError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use reimagine_error::{GenerationError, GenerationErrorKind, ReimagineError, ReimagineErrorKind};
///
/// let err: ReimagineError = GenerationError::new(GenerationErrorKind::EmptyResponse).into();
/// assert!(matches!(err.kind(), ReimagineErrorKind::Generation(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReimagineErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Generative backend error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Reimagine error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reimagine_error::{ReimagineError, ReimagineResult, ConfigError};
///
/// fn might_fail() -> ReimagineResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reimagine Error: {}", _0)]
pub struct ReimagineError(Box<ReimagineErrorKind>);

impl ReimagineError {
    /// Create a new error from a kind.
    pub fn new(kind: ReimagineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReimagineErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ReimagineErrorKind
impl<T> From<T> for ReimagineError
where
    T: Into<ReimagineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reimagine operations.
///
/// # Examples
///
/// ```
/// use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
///
/// fn read_source(text: &str) -> ReimagineResult<&str> {
///     if text.trim().is_empty() {
///         Err(PipelineError::new(PipelineErrorKind::EmptySource))?
///     }
///     Ok(text)
/// }
/// ```
pub type ReimagineResult<T> = std::result::Result<T, ReimagineError>;

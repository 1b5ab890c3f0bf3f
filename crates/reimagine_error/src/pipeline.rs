//! Pipeline error types.

/// Specific error conditions raised by the transformation pipeline itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Source story contains no words
    #[display("Source story is empty")]
    EmptySource,
    /// A required world brief field was not provided
    #[display("World brief is missing required field: {}", _0)]
    MissingBriefField(String),
    /// Source document could not be read or extracted
    #[display("Failed to read source input: {}", _0)]
    InputRead(String),
    /// Final polish failed; the run cannot produce a story
    #[display("Final polish failed: {}", _0)]
    Polish(String),
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use reimagine_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptySource);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

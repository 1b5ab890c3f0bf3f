//! Generative backend error types.

/// Specific failure conditions of a generative call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// HTTP transport failure
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider response body could not be decoded
    #[display("Failed to parse provider response: {}", _0)]
    ResponseParsing(String),
    /// Provider returned no text content
    #[display("Provider returned an empty completion")]
    EmptyResponse,
    /// API key environment variable not set
    #[display("API key not set: {}", _0)]
    MissingApiKey(String),
    /// Backend refused or could not serve the request
    #[display("Generative backend unavailable: {}", _0)]
    Unavailable(String),
}

/// Generative backend error with location tracking.
///
/// # Examples
///
/// ```
/// use reimagine_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("empty completion"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

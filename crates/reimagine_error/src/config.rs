//! Configuration error types.

/// Configuration could not be loaded, or a loaded setting is unusable.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted setting name (e.g. `pipeline.chunk_size`) when one setting is at fault
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error about the configuration as a whole, such as an unreadable file.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: expected a table");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error about one setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("pipeline.chunk_size", "must be at least 1 word");
    /// assert_eq!(err.key.as_deref(), Some("pipeline.chunk_size"));
    /// assert!(err.to_string().contains("pipeline.chunk_size: must be at least 1 word"));
    /// ```
    #[track_caller]
    pub fn invalid(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let key = key.into();
        let mut err = Self::new(format!("{}: {}", key, reason));
        err.key = Some(key);
        err
    }
}

//! Errors from assembling requests with generated builders.

/// What went wrong while building a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A field without a default was never set
    #[display("Field `{}` was not set", _0)]
    UnsetField(String),

    /// The builder rejected the supplied values
    #[display("Invalid builder input: {}", _0)]
    Invalid(String),
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

/// Classifies the rendered message of a generated builder error.
///
/// Generated builders report unset fields as "`name` must be initialized".
impl From<String> for BuilderError {
    #[track_caller]
    fn from(msg: String) -> Self {
        let unset = msg
            .strip_prefix('`')
            .and_then(|rest| rest.strip_suffix("` must be initialized"));
        match unset {
            Some(field) => Self::new(BuilderErrorKind::UnsetField(field.to_string())),
            None => Self::new(BuilderErrorKind::Invalid(msg)),
        }
    }
}

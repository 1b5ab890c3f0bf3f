//! Input types for generation requests.

use serde::{Deserialize, Serialize};

/// Content sent to a generative backend.
///
/// Only text is exchanged by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),
}

impl Input {
    /// Borrow the text carried by this input.
    pub fn as_text(&self) -> &str {
        match self {
            Input::Text(text) => text,
        }
    }
}

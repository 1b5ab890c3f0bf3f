//! Output types from generative responses.

use serde::{Deserialize, Serialize};

/// Supported output types from generative backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output (backends with a native JSON mode).
    Json(serde_json::Value),
}

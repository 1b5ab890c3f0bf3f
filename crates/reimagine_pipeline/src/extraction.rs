//! Structured data extraction from free-form model output.
//!
//! Responses are accepted in one of three shapes, tried in order:
//!
//! 1. A fenced block labelled `json`
//! 2. Any other fenced block (its language tag, if any, is skipped)
//! 3. The raw response text
//!
//! Whatever remains is parsed as JSON. Anything unparsable yields `None`
//! rather than an error; callers read that as "no usable structured output".

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

const FENCE: &str = "```";

/// Extract and parse the JSON payload of a model response.
///
/// # Examples
///
/// ```
/// use reimagine_pipeline::extract_json;
///
/// let response = "Here you go:\n```json\n{\"themes\": [\"exile\"]}\n```\nEnjoy!";
/// let value = extract_json(response).unwrap();
/// assert_eq!(value["themes"][0], "exile");
///
/// assert!(extract_json("I'm sorry, I can't do that.").is_none());
/// ```
pub fn extract_json(response: &str) -> Option<JsonValue> {
    let candidate = fenced(response, Some("json"))
        .or_else(|| fenced(response, None))
        .unwrap_or_else(|| response.trim());

    match serde_json::from_str(candidate) {
        Ok(value) => {
            debug!(length = candidate.len(), "Parsed structured output");
            Some(value)
        }
        Err(e) => {
            warn!(
                error = %e,
                preview = %candidate.chars().take(200).collect::<String>(),
                "Response is not valid JSON"
            );
            None
        }
    }
}

/// Contents of the first closed fenced block.
///
/// With a `language`, only a fence tagged exactly that (followed by
/// whitespace) matches, so `jsonl` is not `json`. Without one, any fence
/// matches and the rest of its opening line is skipped.
fn fenced<'a>(response: &'a str, language: Option<&str>) -> Option<&'a str> {
    let body_start = match language {
        Some(language) => {
            let pattern = format!("{FENCE}{language}");
            response.match_indices(&pattern).find_map(|(at, _)| {
                let end = at + pattern.len();
                let exact = response[end..].chars().next().is_none_or(char::is_whitespace);
                exact.then_some(end)
            })?
        }
        None => {
            let after = response.find(FENCE)? + FENCE.len();
            response[after..]
                .find('\n')
                .map(|n| after + n + 1)
                .unwrap_or(after)
        }
    };

    let close = response[body_start..].find(FENCE)?;
    Some(response[body_start..body_start + close].trim())
}

//! Lenient decoders for free-text fields in model output.
//!
//! Generative backends are asked for strings but routinely answer with
//! nested objects, numbers, or a single string where a list was requested.
//! These decoders accept any JSON shape and render it to text so that a
//! structurally valid response is never rejected over a field's type.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Render a JSON value as prose: strings verbatim, `null` as empty,
/// everything else as compact JSON.
///
/// # Examples
///
/// ```
/// use reimagine_core::loose::render;
/// use serde_json::json;
///
/// assert_eq!(render(&json!("a storm")), "a storm");
/// assert_eq!(render(&json!(null)), "");
/// assert_eq!(render(&json!({"who": "Ahab"})), r#"{"who":"Ahab"}"#);
/// ```
pub fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whether a JSON value carries any content.
///
/// Empty strings, arrays, objects and `null` are empty; numbers and booleans
/// are not.
pub fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(text) => text.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(fields) => fields.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}

/// Deserialize any JSON value into a `String`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(render(&value))
}

/// Deserialize a list of free-text items.
///
/// A bare string becomes a one-item list; blank items are dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    let items = match value {
        JsonValue::Array(items) => items,
        JsonValue::Null => Vec::new(),
        other => vec![other],
    };
    Ok(items
        .iter()
        .map(render)
        .filter(|item| !item.trim().is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "text_list")]
        items: Vec<String>,
    }

    #[test]
    fn test_text_accepts_objects() {
        let holder: Holder =
            serde_json::from_value(json!({"label": {"a": 1}, "items": []})).unwrap();
        assert_eq!(holder.label, r#"{"a":1}"#);
    }

    #[test]
    fn test_text_list_wraps_single_string() {
        let holder: Holder = serde_json::from_value(json!({"items": "betrayal"})).unwrap();
        assert_eq!(holder.items, vec!["betrayal".to_string()]);
        assert!(holder.label.is_empty());
    }

    #[test]
    fn test_text_list_drops_blank_items() {
        let holder: Holder =
            serde_json::from_value(json!({"items": ["duty", "", null, 3]})).unwrap();
        assert_eq!(holder.items, vec!["duty".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&json!({})));
        assert!(is_blank(&json!("  ")));
        assert!(!is_blank(&json!({"Hamlet": "Prince Halden"})));
        assert!(!is_blank(&json!(0)));
    }
}

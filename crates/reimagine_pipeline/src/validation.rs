//! Structural validation of decoded model output.
//!
//! Each artifact type states which keys must be present and which must carry
//! content. Key checks run against the raw JSON, before decoding, and never
//! modify it: a key that is present but blank is distinguishable from a key
//! that is missing. The lenient decoders drop blank list items, so content
//! is checked again on the decoded value.

use reimagine_core::{Character, FinalDna, Mappings, NewWorld, StoryDna, loose};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Why a structured response was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SchemaViolation {
    /// Top-level value was not a JSON object
    #[display("expected a JSON object")]
    NotAnObject,
    /// A required key is absent
    #[display("missing key: {}", _0)]
    MissingKey(String),
    /// A required key is present but empty
    #[display("empty key: {}", _0)]
    EmptyKey(String),
    /// Keys were valid but the value could not be decoded
    #[display("malformed value: {}", _0)]
    Malformed(String),
}

/// A type decoded from model output after a structural check.
pub trait Schema: DeserializeOwned {
    /// Check required keys on the raw value.
    fn check(value: &JsonValue) -> Result<(), SchemaViolation>;

    /// Check content that only shows after decoding.
    fn validate(&self) -> Result<(), SchemaViolation> {
        Ok(())
    }

    /// Check, decode, then validate the decoded value.
    fn from_checked(value: JsonValue) -> Result<Self, SchemaViolation> {
        Self::check(&value)?;
        let decoded: Self = serde_json::from_value(value)
            .map_err(|e| SchemaViolation::Malformed(e.to_string()))?;
        decoded.validate()?;
        Ok(decoded)
    }
}

fn object(value: &JsonValue) -> Result<&serde_json::Map<String, JsonValue>, SchemaViolation> {
    value.as_object().ok_or(SchemaViolation::NotAnObject)
}

fn present<'a>(
    fields: &'a serde_json::Map<String, JsonValue>,
    key: &str,
) -> Result<&'a JsonValue, SchemaViolation> {
    fields
        .get(key)
        .ok_or_else(|| SchemaViolation::MissingKey(key.to_string()))
}

fn nonempty<T>(items: &[T], key: &str) -> Result<(), SchemaViolation> {
    if items.is_empty() {
        return Err(SchemaViolation::EmptyKey(key.to_string()));
    }
    Ok(())
}

fn named(characters: &[Character]) -> Result<(), SchemaViolation> {
    if characters.iter().all(|c| c.name.trim().is_empty()) {
        return Err(SchemaViolation::EmptyKey("characters".to_string()));
    }
    Ok(())
}

fn filled(fields: &serde_json::Map<String, JsonValue>, key: &str) -> Result<(), SchemaViolation> {
    if loose::is_blank(present(fields, key)?) {
        return Err(SchemaViolation::EmptyKey(key.to_string()));
    }
    Ok(())
}

impl Schema for StoryDna {
    fn check(value: &JsonValue) -> Result<(), SchemaViolation> {
        let fields = object(value)?;
        ["characters", "events", "themes"]
            .into_iter()
            .try_for_each(|key| filled(fields, key))
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        named(&self.characters)?;
        nonempty(&self.events, "events")?;
        nonempty(&self.themes, "themes")
    }
}

impl Schema for FinalDna {
    fn check(value: &JsonValue) -> Result<(), SchemaViolation> {
        let fields = object(value)?;
        for key in ["plot_arc", "characters", "themes", "critical_moments"] {
            present(fields, key)?;
        }

        let arc = fields
            .get("plot_arc")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| SchemaViolation::Malformed("plot_arc is not an object".into()))?;
        for key in ["setup", "conflict", "climax", "resolution"] {
            present(arc, key).map_err(|_| SchemaViolation::MissingKey(format!("plot_arc.{key}")))?;
        }

        filled(fields, "characters")?;
        filled(fields, "critical_moments")
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        named(&self.characters)?;
        nonempty(&self.critical_moments, "critical_moments")
    }
}

impl Schema for NewWorld {
    fn check(value: &JsonValue) -> Result<(), SchemaViolation> {
        filled(object(value)?, "setting")
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.setting.trim().is_empty() {
            return Err(SchemaViolation::EmptyKey("setting".to_string()));
        }
        Ok(())
    }
}

impl Schema for Mappings {
    fn check(value: &JsonValue) -> Result<(), SchemaViolation> {
        let fields = object(value)?;
        filled(fields, "character_mappings")?;
        filled(fields, "conflict_mappings")
    }
}

/// Scene as returned by the backend, before it is given a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDraft {
    /// Scene prose
    #[serde(deserialize_with = "loose::text")]
    pub scene_text: String,
    /// Short summary for the next scene; may be absent
    #[serde(default, deserialize_with = "loose::text")]
    pub scene_summary: String,
}

impl Schema for SceneDraft {
    fn check(value: &JsonValue) -> Result<(), SchemaViolation> {
        filled(object(value)?, "scene_text")
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.scene_text.trim().is_empty() {
            return Err(SchemaViolation::EmptyKey("scene_text".to_string()));
        }
        Ok(())
    }
}

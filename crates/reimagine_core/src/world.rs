//! New-world definition and the transformation map into it.

use crate::loose;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The setting a story is transplanted into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewWorld {
    /// Location and overall setting
    #[serde(default, deserialize_with = "loose::text")]
    pub setting: String,
    /// Era or time period
    #[serde(default, deserialize_with = "loose::text")]
    pub era: String,
    /// Dominant technologies or magical systems
    #[serde(default)]
    pub technology_or_magic: JsonValue,
    /// Culture, social norms and power structures
    #[serde(default, deserialize_with = "loose::text")]
    pub culture: String,
    /// Narrative tone
    #[serde(default, deserialize_with = "loose::text")]
    pub tone: String,
    /// Constraints and dangers that shape conflict
    #[serde(default)]
    pub world_rules: JsonValue,
}

impl NewWorld {
    /// Generic world derived directly from the user's brief.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_core::NewWorld;
    ///
    /// let world = NewWorld::from_brief("Setting Type: Sci-fi | Specific Setting: Mars colony");
    /// assert!(world.setting.contains("Mars colony"));
    /// assert_eq!(world.era, "contemporary");
    /// ```
    pub fn from_brief(brief: impl Into<String>) -> Self {
        Self {
            setting: brief.into(),
            era: "contemporary".to_string(),
            technology_or_magic: JsonValue::Array(Vec::new()),
            culture: "diverse".to_string(),
            tone: "balanced".to_string(),
            world_rules: JsonValue::Array(Vec::new()),
        }
    }
}

/// How characters, conflicts and dynamics are recast in the new world.
///
/// Mapping shapes vary between models (objects keyed by original name,
/// or lists of pairs) and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mappings {
    /// Original character to new-world counterpart
    #[serde(default)]
    pub character_mappings: JsonValue,
    /// Original conflict to new-world counterpart
    #[serde(default)]
    pub conflict_mappings: JsonValue,
    /// Relationships carried over unchanged
    #[serde(default)]
    pub preserved_dynamics: JsonValue,
}

impl Mappings {
    /// Schema-valid but semantically empty mappings.
    pub fn empty() -> Self {
        Self {
            character_mappings: JsonValue::Object(Default::default()),
            conflict_mappings: JsonValue::Object(Default::default()),
            preserved_dynamics: JsonValue::Array(Vec::new()),
        }
    }

    /// Both character and conflict mappings carry content.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_core::Mappings;
    ///
    /// assert!(!Mappings::empty().is_complete());
    /// ```
    pub fn is_complete(&self) -> bool {
        !loose::is_blank(&self.character_mappings) && !loose::is_blank(&self.conflict_mappings)
    }
}

/// New world plus the mappings into it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformationMap {
    /// The target world
    pub new_world: NewWorld,
    /// Entity and conflict mappings
    pub mappings: Mappings,
}

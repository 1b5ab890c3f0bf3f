//! Story DNA: the bounded summary of a source narrative.

use crate::{loose, spread_indices};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// A character as recorded in story DNA.
///
/// Model output sometimes lists characters as bare names; those decode with
/// empty role and trait.
///
/// # Examples
///
/// ```
/// use reimagine_core::Character;
///
/// let full: Character = serde_json::from_str(
///     r#"{"name": "Ishmael", "role": "narrator", "trait": "restless"}"#,
/// ).unwrap();
/// assert_eq!(full.defining_trait, "restless");
///
/// let bare: Character = serde_json::from_str(r#""Queequeg""#).unwrap();
/// assert_eq!(bare.name, "Queequeg");
/// assert!(bare.role.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "CharacterRepr")]
pub struct Character {
    /// Character name
    pub name: String,
    /// Narrative role or purpose
    pub role: String,
    /// One defining trait
    #[serde(rename = "trait")]
    pub defining_trait: String,
    /// Character arc (consolidated blueprint only)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub arc: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CharacterRepr {
    Fields {
        #[serde(default, deserialize_with = "loose::text")]
        name: String,
        #[serde(default, deserialize_with = "loose::text")]
        role: String,
        #[serde(
            default,
            rename = "trait",
            alias = "core_trait",
            deserialize_with = "loose::text"
        )]
        defining_trait: String,
        #[serde(default, alias = "character_arc", deserialize_with = "loose::text")]
        arc: String,
    },
    Name(String),
}

impl From<CharacterRepr> for Character {
    fn from(repr: CharacterRepr) -> Self {
        match repr {
            CharacterRepr::Fields {
                name,
                role,
                defining_trait,
                arc,
            } => Self {
                name,
                role,
                defining_trait,
                arc,
            },
            CharacterRepr::Name(name) => Self {
                name,
                ..Self::default()
            },
        }
    }
}

impl Character {
    /// Character with name, role and trait.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        defining_trait: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            defining_trait: defining_trait.into(),
            arc: String::new(),
        }
    }
}

/// Working story DNA accumulated chunk by chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryDna {
    /// Characters, most important first
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Plot events in chronological order
    #[serde(default, deserialize_with = "loose::text_list")]
    pub events: Vec<String>,
    /// Themes grounded in the text
    #[serde(default, deserialize_with = "loose::text_list")]
    pub themes: Vec<String>,
}

impl StoryDna {
    /// Maximum characters retained while merging.
    pub const MAX_CHARACTERS: usize = 10;
    /// Maximum events retained while merging.
    pub const MAX_EVENTS: usize = 15;
    /// Event recorded when a chunk could not be summarized.
    pub const EXTRACTION_FAILED_EVENT: &'static str = "Failed to extract events";

    /// Degraded summary used when a chunk could not be summarized.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_core::StoryDna;
    ///
    /// let placeholder = StoryDna::placeholder();
    /// assert!(placeholder.characters.is_empty());
    /// assert_eq!(placeholder.events, vec!["Failed to extract events".to_string()]);
    /// ```
    pub fn placeholder() -> Self {
        Self {
            characters: Vec::new(),
            events: vec![Self::EXTRACTION_FAILED_EVENT.to_string()],
            themes: Vec::new(),
        }
    }

    /// True when the summary carries no characters, events or themes.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.events.is_empty() && self.themes.is_empty()
    }

    /// Deduplicate and trim to the merge caps.
    ///
    /// Characters are deduplicated by case-insensitive name (first entry
    /// wins) and truncated to [`Self::MAX_CHARACTERS`]. Events are
    /// deduplicated by normalized text and thinned to [`Self::MAX_EVENTS`]
    /// with [`spread_indices`], so the opening and latest events survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_core::{Character, StoryDna};
    ///
    /// let dna = StoryDna {
    ///     characters: vec![
    ///         Character::new("Ahab", "captain", "obsessed"),
    ///         Character::new("ahab", "captain", "vengeful"),
    ///     ],
    ///     events: (0..20).map(|i| format!("event {i}")).collect(),
    ///     themes: vec!["obsession".into()],
    /// }
    /// .within_caps();
    ///
    /// assert_eq!(dna.characters.len(), 1);
    /// assert_eq!(dna.events.len(), 15);
    /// assert_eq!(dna.events.first().map(String::as_str), Some("event 0"));
    /// assert_eq!(dna.events.last().map(String::as_str), Some("event 19"));
    /// ```
    pub fn within_caps(self) -> Self {
        let mut seen_names = HashSet::new();
        let characters: Vec<Character> = self
            .characters
            .into_iter()
            .filter(|c| seen_names.insert(normalize(&c.name)))
            .take(Self::MAX_CHARACTERS)
            .collect();

        let mut seen_events = HashSet::new();
        let events: Vec<String> = self
            .events
            .into_iter()
            .filter(|e| seen_events.insert(normalize(e)))
            .collect();
        let events = if events.len() > Self::MAX_EVENTS {
            spread_indices(events.len(), Self::MAX_EVENTS)
                .into_iter()
                .map(|i| events[i].clone())
                .collect()
        } else {
            events
        };

        let mut seen_themes = HashSet::new();
        let themes = self
            .themes
            .into_iter()
            .filter(|t| seen_themes.insert(normalize(t)))
            .collect();

        Self {
            characters,
            events,
            themes,
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Four-part plot structure of the consolidated blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlotArc {
    /// Initial situation
    #[serde(default, deserialize_with = "loose::text")]
    pub setup: String,
    /// Central conflict
    #[serde(default, deserialize_with = "loose::text")]
    pub conflict: String,
    /// Peak of tension
    #[serde(default, deserialize_with = "loose::text")]
    pub climax: String,
    /// How the story settles
    #[serde(default, deserialize_with = "loose::text")]
    pub resolution: String,
}

/// Consolidated story blueprint consumed by world mapping and scene
/// generation. Produced once per run and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalDna {
    /// Four-part plot arc
    #[serde(default)]
    pub plot_arc: PlotArc,
    /// Three to five main characters with arcs
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Two or three core themes
    #[serde(default, deserialize_with = "loose::text_list")]
    pub themes: Vec<String>,
    /// Five to seven major turning points, in order
    #[serde(default, deserialize_with = "loose::text_list")]
    pub critical_moments: Vec<String>,
    /// Relationships and tensions, in whatever shape the model produced
    #[serde(default)]
    pub character_dynamics: JsonValue,
}

impl FinalDna {
    /// Themes kept when synthesizing a blueprint locally.
    pub const MAX_THEMES: usize = 3;
    /// Critical moments kept when synthesizing a blueprint locally.
    pub const MAX_CRITICAL_MOMENTS: usize = 7;

    /// Synthesize a blueprint from accumulated DNA without a generative call.
    ///
    /// The plot arc is read off the first, one-third, two-thirds and last
    /// events; critical moments are the events thinned to seven.
    ///
    /// # Examples
    ///
    /// ```
    /// use reimagine_core::{Character, FinalDna, StoryDna};
    ///
    /// let dna = StoryDna {
    ///     characters: vec![Character::new("Jonah", "prophet", "reluctant")],
    ///     events: (1..=9).map(|i| format!("e{i}")).collect(),
    ///     themes: vec!["mercy".into()],
    /// };
    /// let blueprint = FinalDna::from_accumulated(&dna);
    ///
    /// assert_eq!(blueprint.plot_arc.setup, "e1");
    /// assert_eq!(blueprint.plot_arc.resolution, "e9");
    /// assert_eq!(blueprint.critical_moments.len(), 7);
    /// assert_eq!(blueprint.characters.len(), 1);
    /// ```
    pub fn from_accumulated(dna: &StoryDna) -> Self {
        let events = &dna.events;
        let at = |numerator: usize, denominator: usize| -> String {
            if events.is_empty() {
                return String::new();
            }
            let index = (events.len() - 1) * numerator / denominator;
            events[index].clone()
        };

        let critical_moments = spread_indices(events.len(), Self::MAX_CRITICAL_MOMENTS)
            .into_iter()
            .map(|i| events[i].clone())
            .collect();

        Self {
            plot_arc: PlotArc {
                setup: at(0, 3),
                conflict: at(1, 3),
                climax: at(2, 3),
                resolution: at(3, 3),
            },
            characters: dna.characters.clone(),
            themes: dna.themes.iter().take(Self::MAX_THEMES).cloned().collect(),
            critical_moments,
            character_dynamics: JsonValue::Null,
        }
    }
}

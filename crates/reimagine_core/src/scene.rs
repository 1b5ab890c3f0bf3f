//! Scene planning and generated scene types.

use serde::{Deserialize, Serialize};

/// Narrative position of a planned scene.
///
/// # Examples
///
/// ```
/// use reimagine_core::ScenePosition;
///
/// assert_eq!(ScenePosition::for_index(0), ScenePosition::Opening);
/// assert_eq!(ScenePosition::for_index(3), ScenePosition::Resolution);
/// assert_eq!(ScenePosition::for_index(4), ScenePosition::Middle);
/// assert_eq!(ScenePosition::Climax.to_string(), "climax");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScenePosition {
    /// Establishes world and protagonist
    Opening,
    /// Escalates the conflict
    Rising,
    /// Peak tension and turning point
    Climax,
    /// Resolves the main conflict
    Resolution,
    /// Any scene beyond the fourth
    Middle,
}

impl ScenePosition {
    /// Positions assigned in plan order.
    pub const SEQUENCE: [ScenePosition; 4] = [
        ScenePosition::Opening,
        ScenePosition::Rising,
        ScenePosition::Climax,
        ScenePosition::Resolution,
    ];

    /// Position for the scene at `index` in the plan.
    pub fn for_index(index: usize) -> Self {
        Self::SEQUENCE
            .get(index)
            .copied()
            .unwrap_or(ScenePosition::Middle)
    }

    /// What a scene at this position must accomplish.
    pub fn requirements(&self) -> &'static [&'static str] {
        match self {
            ScenePosition::Opening => &[
                "establish world",
                "introduce protagonist",
                "show initial situation",
            ],
            ScenePosition::Rising => &["escalate conflict", "develop tension", "advance plot"],
            ScenePosition::Climax => &[
                "reach peak tension",
                "critical decision point",
                "turning point",
            ],
            ScenePosition::Resolution => &[
                "resolve main conflict",
                "show transformation",
                "conclude arc",
            ],
            ScenePosition::Middle => &["advance story"],
        }
    }
}

/// One planned scene. Plan order is narrative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePlanEntry {
    /// Narrative position
    pub position: ScenePosition,
    /// Critical moment from the blueprint this scene dramatizes
    pub source_moment: String,
    /// Zero-based index in the plan
    pub index: usize,
}

/// A generated scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene prose
    pub text: String,
    /// Two or three sentence summary, handed to the next scene
    pub summary: String,
    /// Narrative position
    pub position: ScenePosition,
}

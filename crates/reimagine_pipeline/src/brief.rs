//! The user's description of the world a story is moved into.

use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
use serde::{Deserialize, Serialize};

/// Broad genre of the target world.
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
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SettingType {
    /// Science fiction
    #[strum(to_string = "Sci-fi", serialize = "scifi")]
    #[serde(rename = "Sci-fi")]
    SciFi,
    /// Fantasy
    Fantasy,
    /// Historical
    Historical,
    /// Present day
    Modern,
    /// After the fall
    #[strum(to_string = "Post-apocalyptic", serialize = "postapocalyptic")]
    #[serde(rename = "Post-apocalyptic")]
    PostApocalyptic,
    /// Cyberpunk
    Cyberpunk,
    /// Steampunk
    Steampunk,
    /// Space opera
    #[strum(to_string = "Space Opera", serialize = "space-opera")]
    #[serde(rename = "Space Opera")]
    SpaceOpera,
    /// Dystopian
    Dystopian,
    /// Anything else; describe it in the details
    Other,
}

/// Narrative tone of the retelling.
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
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    /// Dark and gritty
    #[strum(to_string = "Dark/Gritty", serialize = "dark", serialize = "gritty")]
    #[serde(rename = "Dark/Gritty")]
    DarkGritty,
    /// Hopeful
    Hopeful,
    /// Satirical
    Satirical,
    /// Serious
    Serious,
    /// Comedic
    Comedic,
    /// Mysterious
    Mysterious,
    /// Romantic
    Romantic,
    /// Epic
    Epic,
}

/// Target world requested by the user.
///
/// # Examples
///
/// ```
/// use reimagine_pipeline::{SettingType, Tone, WorldBrief};
///
/// let brief = WorldBrief::new(SettingType::SciFi, "Mars colony", "2147", Tone::DarkGritty)
///     .unwrap();
/// assert_eq!(
///     brief.to_string(),
///     "Setting Type: Sci-fi | Specific Setting: Mars colony | Time Period: 2147 | Tone: Dark/Gritty"
/// );
///
/// let detailed = brief.with_key_feature("terraforming riots");
/// assert!(detailed.to_string().ends_with(" | Key Feature: terraforming riots"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBrief {
    setting_type: SettingType,
    setting: String,
    time_period: String,
    tone: Tone,
    key_feature: Option<String>,
    details: Option<String>,
}

impl WorldBrief {
    /// Brief with the four required fields.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::MissingBriefField`] if the specific
    /// setting or time period is blank.
    pub fn new(
        setting_type: SettingType,
        setting: impl Into<String>,
        time_period: impl Into<String>,
        tone: Tone,
    ) -> ReimagineResult<Self> {
        let setting = required("specific setting", setting.into())?;
        let time_period = required("time period", time_period.into())?;
        Ok(Self {
            setting_type,
            setting,
            time_period,
            tone,
            key_feature: None,
            details: None,
        })
    }

    /// Add a key feature; blank values are ignored.
    pub fn with_key_feature(mut self, key_feature: impl Into<String>) -> Self {
        self.key_feature = optional(key_feature.into());
        self
    }

    /// Add free-form details; blank values are ignored.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = optional(details.into());
        self
    }

    /// Genre of the target world.
    pub fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    /// Specific setting.
    pub fn setting(&self) -> &str {
        &self.setting
    }
}

impl std::fmt::Display for WorldBrief {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Setting Type: {} | Specific Setting: {} | Time Period: {} | Tone: {}",
            self.setting_type, self.setting, self.time_period, self.tone
        )?;
        if let Some(feature) = &self.key_feature {
            write!(f, " | Key Feature: {}", feature)?;
        }
        if let Some(details) = &self.details {
            write!(f, " | Additional Details: {}", details)?;
        }
        Ok(())
    }
}

fn required(field: &str, value: String) -> ReimagineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::MissingBriefField(field.to_string())).into());
    }
    Ok(value.to_string())
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

//! Canned story material and a well-behaved mock backend.

use super::{MockResponse, MockStoryDriver, Stage};
use serde_json::json;

/// Brief used by the end-to-end scenario.
pub const MARS_BRIEF: &str =
    "Setting Type: Sci-fi | Specific Setting: Mars colony | Time Period: 2147 | Tone: Dark/Gritty";

/// Source text of `paragraphs` paragraphs, `words` words each.
pub fn source_text(paragraphs: usize, words: usize) -> String {
    (0..paragraphs)
        .map(|p| {
            (0..words)
                .map(|w| format!("p{p}w{w}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Position named in a scene prompt.
fn scene_position(user: &str) -> String {
    user.lines()
        .find_map(|line| line.strip_prefix("Scene position: "))
        .unwrap_or("unknown")
        .to_string()
}

/// Scenes section of a polish prompt.
fn polish_scenes(user: &str) -> String {
    let start = user.find("\n\n").map(|i| i + 2).unwrap_or(0);
    let end = user.find("\n\nStory DNA for reference").unwrap_or(user.len());
    user[start..end].to_string()
}

/// Mock that answers every stage with well-formed output.
pub fn mars_driver() -> MockStoryDriver {
    MockStoryDriver::new(mars_response)
}

/// Well-formed output for each stage, about a whaling story relocated to
/// Mars.
pub fn mars_response(stage: Stage, user: &str) -> MockResponse {
    match stage {
        Stage::LocalSummary => MockResponse::json(json!({
            "characters": [
                {"name": "Ahab", "role": "captain", "trait": "obsessed"},
                {"name": "Ishmael", "role": "narrator", "trait": "curious"}
            ],
            "events": ["Ishmael signs on", "Ahab reveals his quest"],
            "themes": ["obsession", "fate"]
        })),
        Stage::Merge => MockResponse::json(json!({
            "characters": [
                {"name": "Ahab", "role": "captain", "trait": "obsessed"},
                {"name": "Ishmael", "role": "narrator", "trait": "curious"}
            ],
            "events": ["Ishmael signs on", "Ahab reveals his quest", "The hunt begins"],
            "themes": ["obsession", "fate"]
        })),
        Stage::Consolidation => MockResponse::json(json!({
            "plot_arc": {
                "setup": "Ishmael joins the crew",
                "conflict": "Ahab's obsession endangers everyone",
                "climax": "The final chase",
                "resolution": "Only Ishmael survives"
            },
            "characters": [
                {"name": "Ahab", "role": "captain", "trait": "obsessed", "arc": "defiance to ruin"},
                {"name": "Ishmael", "role": "narrator", "trait": "curious", "arc": "novice to witness"}
            ],
            "themes": ["obsession", "fate"],
            "critical_moments": [
                "Ishmael signs on",
                "Ahab nails the doubloon",
                "The crew meets another ship",
                "Starbuck considers mutiny",
                "The whale is sighted",
                "The ship sinks"
            ],
            "character_dynamics": {"Ahab-Starbuck": "duty against obsession"}
        })),
        Stage::World => MockResponse::json(json!({
            "setting": "Ares Deep, an ice-mining colony beneath the crust of Mars",
            "era": "2147",
            "technology_or_magic": ["fusion drills", "pressure suits"],
            "culture": "company town ruled by extraction quotas",
            "tone": "dark and gritty",
            "world_rules": ["air is rationed", "storms cut all contact"]
        })),
        Stage::Mapping => MockResponse::json(json!({
            "character_mappings": {"Ahab": "Foreman Ahab Kade", "Ishmael": "Ish, a contract driller"},
            "conflict_mappings": {"the white whale": "a glacier-eating borer machine"},
            "preserved_dynamics": ["captain and reluctant first mate"]
        })),
        Stage::Scene => {
            let position = scene_position(user);
            MockResponse::json(json!({
                "scene_text": format!("The {position} scene unfolds in the red dark."),
                "scene_summary": format!("Summary of {position}.")
            }))
        }
        Stage::Polish => {
            MockResponse::text(polish_scenes(user).replace("---SCENE BREAK---", "* * *"))
        }
    }
}

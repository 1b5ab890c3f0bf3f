//! Instruction templates for every generative call site.
//!
//! Word limits stated here are requests to the backend; nothing in the
//! pipeline enforces them.

use crate::Prompt;
use reimagine_core::ScenePosition;

const LOCAL_SUMMARY_SYSTEM: &str = "\
You are a careful literary analyst summarizing one excerpt of a longer story.

Work only from the excerpt you are given. Do not guess at what happens \
outside it and do not invent details.

- List each character who appears or is mentioned, with a name, their role \
in the excerpt, and one defining trait in at most ten words.
- List plot events in the order they happen in the excerpt.
- List themes only when the text clearly supports them.
- Keep the whole answer under 300 words.
- Answer with a single JSON object and nothing else.";

const MERGE_SYSTEM: &str = "\
You maintain the running story DNA of a long narrative that is being read \
excerpt by excerpt.

Fold the summary of the newest excerpt into the existing DNA.

- Treat differently worded mentions of the same character or event as one \
entry and merge them.
- Keep every event in chronological order across the whole story.
- Keep at most 10 characters and 15 events. When trimming, drop the least \
important entries, never the ones the plot depends on.
- Do not contradict facts already recorded.
- Answer with a single JSON object using the same keys as the input DNA.";

const CONSOLIDATION_SYSTEM: &str = "\
You distill a story's accumulated DNA into a compact blueprint of its \
narrative backbone.

- Keep the 3 to 5 characters the story cannot do without, each with name, \
role, core trait and arc.
- Keep the 5 to 7 turning points that define the plot, in order.
- Name the 2 or 3 themes that govern the story.
- Describe the plot in four parts: setup, conflict, climax, resolution.
- Describe the relationships and tensions between the main characters.
- Leave out subplots and minor characters. Stay under 500 words.
- Answer with a single JSON object and nothing else.";

const WORLD_SYSTEM: &str = "\
You are a world-builder designing the setting a story will be retold in.

- Follow the requested setting exactly; do not blend in other genres unless \
asked.
- Make the world internally consistent and believable.
- Describe where and when it takes place, its dominant technology or magic, \
its culture and power structures, its tone, and the rules or dangers that \
shape conflict there.
- The tone must match the request. Stay under 300 words.
- Answer with a single JSON object and nothing else.";

const MAPPING_SYSTEM: &str = "\
You translate a story's cast and conflicts into a new world.

- Keep every character's narrative role, relationships and motivation \
exactly as they are. Change only surface details such as names, \
professions and abilities.
- Re-express each conflict through the rules of the new world while \
keeping its root tension.
- Carry over alliances, rivalries, fears and dependencies.
- Answer with a single JSON object and nothing else.";

const SCENE_SYSTEM: &str = "\
You are a fiction writer retelling a story in a new world, one scene at a \
time.

- Write in the third person, in scene: action, dialogue and concrete \
sensory detail rather than summary.
- Match the tone and rules of the new world and use the recast characters.
- Stay within 50 words of the target length.
- When a previous scene is described, pick up from it without repeating it.
- End on forward motion: a hook, a decision or an emotional turn.
- Answer with a single JSON object and nothing else.";

const POLISH_SYSTEM: &str = "\
You are an editor assembling finished scenes into one story.

- Do not rewrite the scenes.
- Where a transition is abrupt, add at most one or two bridging sentences.
- Fix continuity slips, unclear pronouns and tense or time jumps.
- Keep the tone consistent with the world the scenes are set in.
- Return the story as plain prose. No JSON, no headings, no scene markers.";

/// Summarize one chunk in isolation.
pub fn local_summary(chunk_text: &str) -> Prompt {
    Prompt::new(
        LOCAL_SUMMARY_SYSTEM,
        format!(
            "Excerpt:\n\n{chunk_text}\n\n\
             Respond with JSON shaped like:\n\
             {{\"characters\": [{{\"name\": \"...\", \"role\": \"...\", \"trait\": \"...\"}}], \
             \"events\": [\"...\"], \"themes\": [\"...\"]}}"
        ),
    )
}

/// Fold a chunk summary into the running DNA.
pub fn merge(current_dna: &str, new_summary: &str) -> Prompt {
    Prompt::new(
        MERGE_SYSTEM,
        format!(
            "Current story DNA:\n{current_dna}\n\n\
             Summary of the newest excerpt:\n{new_summary}\n\n\
             Return the updated story DNA with keys characters, events and themes."
        ),
    )
}

/// Condense accumulated DNA into the final blueprint.
pub fn consolidation(accumulated_dna: &str) -> Prompt {
    Prompt::new(
        CONSOLIDATION_SYSTEM,
        format!(
            "Accumulated story DNA:\n{accumulated_dna}\n\n\
             Return JSON with keys plot_arc (setup, conflict, climax, resolution), \
             characters, themes, critical_moments and character_dynamics."
        ),
    )
}

/// Design the new world from source themes and the user's brief.
pub fn world_definition(themes: &str, brief: &str) -> Prompt {
    Prompt::new(
        WORLD_SYSTEM,
        format!(
            "Themes of the original story: {themes}\n\n\
             Requested setting: {brief}\n\n\
             Return JSON with keys setting, era, technology_or_magic, culture, tone \
             and world_rules."
        ),
    )
}

/// Map characters and conflicts into the new world.
pub fn transformation_mapping(story_dna: &str, new_world: &str) -> Prompt {
    Prompt::new(
        MAPPING_SYSTEM,
        format!(
            "Original story DNA:\n{story_dna}\n\n\
             New world:\n{new_world}\n\n\
             Return JSON with keys character_mappings, conflict_mappings and \
             preserved_dynamics."
        ),
    )
}

/// Inputs for one scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneBrief<'a> {
    /// Pretty-printed blueprint
    pub story_dna: &'a str,
    /// Pretty-printed transformation map
    pub transformation_map: &'a str,
    /// Narrative position
    pub position: ScenePosition,
    /// Critical moment the scene dramatizes
    pub source_moment: &'a str,
    /// Target length in words
    pub word_count: usize,
    /// Summary of the preceding scene, if there is one
    pub previous_summary: Option<&'a str>,
}

/// Write one scene.
pub fn scene(brief: SceneBrief<'_>) -> Prompt {
    let continuity = match brief.previous_summary {
        Some(summary) => format!("Previous scene: {summary}\nContinue smoothly from it."),
        None => "This is the first scene of the story.".to_string(),
    };

    Prompt::new(
        SCENE_SYSTEM,
        format!(
            "Story DNA:\n{dna}\n\n\
             New world and recast characters:\n{map}\n\n\
             Scene position: {position}\n\
             Moment to dramatize: {moment}\n\
             Target length: {words} words\n\
             The scene must: {requirements}\n\n\
             {continuity}\n\n\
             Write the scene, then summarize it in two or three sentences.\n\
             Return JSON with keys scene_text and scene_summary.",
            dna = brief.story_dna,
            map = brief.transformation_map,
            position = brief.position,
            moment = brief.source_moment,
            words = brief.word_count,
            requirements = brief.position.requirements().join(", "),
        ),
    )
}

/// Stitch the scenes into the final story.
pub fn polish(all_scenes: &str, story_dna: &str, target_word_count: usize) -> Prompt {
    Prompt::new(
        POLISH_SYSTEM,
        format!(
            "Scenes, in order:\n\n{all_scenes}\n\n\
             Story DNA for reference:\n{story_dna}\n\n\
             Join the scenes into one finished story of roughly {target_word_count} words. \
             Return the story text only."
        ),
    )
}

//! Scene planning, generation with continuity, and final polish.

use crate::dna::pretty;
use crate::prompts::{self, SceneBrief};
use crate::{Outcome, RetryPolicy, SceneDraft, attempt_with_policy, interpret_json};
use reimagine_core::{FinalDna, Scene, ScenePlanEntry, ScenePosition, TransformationMap, spread_indices};
use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
use reimagine_interface::ReimagineDriver;
use tracing::{info, instrument};

/// Marker placed between scenes handed to the final polish.
pub const SCENE_BREAK: &str = "\n\n---SCENE BREAK---\n\n";

/// Pick up to `k` moments spread across the story, in order.
///
/// With `k` or fewer moments, all are kept. Otherwise the first and last
/// always survive and the rest are spread evenly between them.
///
/// # Examples
///
/// ```
/// use reimagine_pipeline::select_key_moments;
///
/// let moments: Vec<String> = (0..6).map(|i| format!("m{i}")).collect();
/// let picked = select_key_moments(&moments, 4);
/// assert_eq!(picked.len(), 4);
/// assert_eq!(picked.first().map(String::as_str), Some("m0"));
/// assert_eq!(picked.last().map(String::as_str), Some("m5"));
/// ```
pub fn select_key_moments(moments: &[String], k: usize) -> Vec<String> {
    spread_indices(moments.len(), k)
        .into_iter()
        .map(|i| moments[i].clone())
        .collect()
}

/// Plan one scene per selected moment, positions assigned in order.
pub fn create_scene_plan(moments: &[String], k: usize) -> Vec<ScenePlanEntry> {
    let plan: Vec<ScenePlanEntry> = select_key_moments(moments, k)
        .into_iter()
        .enumerate()
        .map(|(index, source_moment)| ScenePlanEntry {
            position: ScenePosition::for_index(index),
            source_moment,
            index,
        })
        .collect();
    info!(scenes = plan.len(), "Created scene plan");
    plan
}

/// Artifact name for a planned scene.
pub fn scene_artifact_name(entry: &ScenePlanEntry) -> String {
    format!("scene_{}_{}.json", entry.index, entry.position)
}

/// Writes scenes and stitches them into the final story.
pub struct SceneWriter<'a, D: ?Sized> {
    driver: &'a D,
    policy: RetryPolicy,
    scene_word_count: usize,
    target_word_count: usize,
}

impl<'a, D: ReimagineDriver + ?Sized> SceneWriter<'a, D> {
    /// Writer calling `driver` under `policy`, with advisory lengths.
    pub fn new(
        driver: &'a D,
        policy: RetryPolicy,
        scene_word_count: usize,
        target_word_count: usize,
    ) -> Self {
        Self {
            driver,
            policy,
            scene_word_count,
            target_word_count,
        }
    }

    /// Generate one scene.
    ///
    /// `previous_summary` is the summary of the immediately preceding scene
    /// only. When attempts run out the last raw response becomes the scene
    /// text; if no call ever returned, a placeholder is used instead.
    #[instrument(skip(self, dna, map, entry, previous_summary), fields(position = %entry.position, index = entry.index))]
    pub async fn generate_scene(
        &self,
        dna: &FinalDna,
        map: &TransformationMap,
        entry: &ScenePlanEntry,
        previous_summary: Option<&str>,
    ) -> Outcome<Scene> {
        let position = entry.position;
        let story_dna = pretty(dna);
        let transformation_map = pretty(map);
        let prompt = prompts::scene(SceneBrief {
            story_dna: &story_dna,
            transformation_map: &transformation_map,
            position,
            source_moment: &entry.source_moment,
            word_count: self.scene_word_count,
            previous_summary,
        });

        let site = format!("scene_{}_{}", entry.index, position);
        attempt_with_policy(
            self.driver,
            self.policy,
            &site,
            &prompt,
            |raw| {
                interpret_json::<SceneDraft>(raw).map(|draft| Scene {
                    summary: if draft.scene_summary.trim().is_empty() {
                        completed_summary(position)
                    } else {
                        draft.scene_summary
                    },
                    text: draft.scene_text,
                    position,
                })
            },
            |raw| match raw {
                Some(text) => Scene {
                    text,
                    summary: completed_summary(position),
                    position,
                },
                None => Scene {
                    text: format!("Scene {position} could not be generated."),
                    summary: format!("Scene {position} failed"),
                    position,
                },
            },
        )
        .await
    }

    /// Join scene texts and make a single polishing call.
    ///
    /// # Errors
    ///
    /// There is no retry and no fallback: any backend failure is returned
    /// as [`PipelineErrorKind::Polish`].
    #[instrument(skip_all, fields(scenes = scenes.len()))]
    pub async fn polish(&self, scenes: &[Scene], dna: &FinalDna) -> ReimagineResult<String> {
        let joined = scenes
            .iter()
            .map(|scene| scene.text.as_str())
            .collect::<Vec<_>>()
            .join(SCENE_BREAK);
        let prompt = prompts::polish(&joined, &pretty(dna), self.target_word_count);

        let story = self
            .driver
            .complete(&prompt.system, &prompt.user)
            .await
            .map_err(|e| PipelineError::new(PipelineErrorKind::Polish(e.to_string())))?;
        info!(words = story.split_whitespace().count(), "Polished final story");
        Ok(story)
    }
}

fn completed_summary(position: ScenePosition) -> String {
    format!("Scene {position} completed")
}

//! End-to-end story transformation.

use crate::{
    Degradation, DnaAccumulator, PipelineConfig, SceneWriter, SourceInput, WorldBrief, WorldMapper,
    chunk, create_scene_plan, scene_artifact_name,
};
use derive_getters::Getters;
use reimagine_error::{PipelineError, PipelineErrorKind, ReimagineResult};
use reimagine_interface::{PlainTextExtractor, ReimagineDriver, TextExtractor};
use reimagine_storage::{ArtifactCategory, ArtifactContent, ArtifactStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RunReport {
    /// The polished story
    story: String,
    /// Number of source chunks
    chunk_count: usize,
    /// Number of generated scenes
    scene_count: usize,
    /// Call sites that fell back, in the order they did
    degradations: Vec<Degradation>,
}

impl RunReport {
    /// Whether any call site fell back.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Take the story text.
    pub fn into_story(self) -> String {
        self.story
    }
}

/// Chunker, DNA accumulator, world mapper and scene writer run in sequence,
/// each stage saving its output before the next begins.
///
/// # Example
///
/// ```rust,ignore
/// use reimagine_pipeline::{Pipeline, PipelineConfig};
/// use reimagine_storage::InMemoryArtifactStore;
///
/// let pipeline = Pipeline::new(driver, InMemoryArtifactStore::new(), PipelineConfig::default());
/// let story = pipeline
///     .run(source_text, "Setting Type: Sci-fi | Specific Setting: Mars colony | Time Period: 2147 | Tone: Dark/Gritty")
///     .await?;
/// ```
pub struct Pipeline<D, S> {
    driver: D,
    store: S,
    extractor: Box<dyn TextExtractor>,
    settings: PipelineConfig,
}

impl<D: ReimagineDriver, S: ArtifactStore> Pipeline<D, S> {
    /// Pipeline over `driver` and `store`, reading documents as plain text.
    pub fn new(driver: D, store: S, settings: PipelineConfig) -> Self {
        Self {
            driver,
            store,
            extractor: Box::new(PlainTextExtractor),
            settings,
        }
    }

    /// Replace the document extractor.
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// The generative backend.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The artifact store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Sizing and retry settings.
    pub fn settings(&self) -> &PipelineConfig {
        &self.settings
    }

    /// Transform `source_text` into the world described by `brief`.
    ///
    /// Degraded stages are logged; use [`Self::run_with_report`] to inspect
    /// them.
    ///
    /// # Errors
    ///
    /// Fails on empty source text, on any store failure, and when the final
    /// polish fails.
    pub async fn run(&self, source_text: &str, brief: &str) -> ReimagineResult<String> {
        Ok(self.run_with_report(source_text, brief).await?.into_story())
    }

    /// Resolve `source`, run the pipeline, and remove a temporary source
    /// document however the run ends.
    #[instrument(skip_all, fields(brief = %brief))]
    pub async fn run_input(
        &self,
        source: &SourceInput,
        brief: &WorldBrief,
    ) -> ReimagineResult<RunReport> {
        let _cleanup = source.cleanup_guard();
        let text = source.read(self.extractor.as_ref()).await?;
        self.run_with_report(&text, &brief.to_string()).await
    }

    /// Run every stage and report what was produced and what degraded.
    #[instrument(skip_all, fields(
        provider = self.driver.provider_name(),
        model = self.driver.model_name(),
        words = source_text.split_whitespace().count()
    ))]
    pub async fn run_with_report(
        &self,
        source_text: &str,
        brief: &str,
    ) -> ReimagineResult<RunReport> {
        if source_text.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptySource).into());
        }
        let policy = self.settings.retry_policy();

        info!("Chunking source text");
        let chunks = chunk(source_text, *self.settings.chunk_size());
        self.save_json(&chunks, "chunks.json", ArtifactCategory::Chunks)
            .await?;

        info!(chunks = chunks.len(), "Building story DNA");
        let accumulator = DnaAccumulator::new(&self.driver, policy);
        let (summaries, mut degradations) = accumulator.summarize_all(&chunks).await;
        self.save_json(&summaries, "local_summaries.json", ArtifactCategory::Dna)
            .await?;

        let (global_dna, merge_degradations) = accumulator.fold(&summaries).await;
        degradations.extend(merge_degradations);
        self.save_json(&global_dna, "global_dna.json", ArtifactCategory::Dna)
            .await?;

        let blueprint = accumulator
            .consolidate(&global_dna)
            .await
            .record(&mut degradations);
        self.save_json(&blueprint, "final_dna.json", ArtifactCategory::Dna)
            .await?;

        info!("Mapping story into the new world");
        let mapper = WorldMapper::new(&self.driver, policy);
        let world = mapper
            .define_world(&blueprint.themes, brief)
            .await
            .record(&mut degradations);
        self.save_json(&world, "new_world.json", ArtifactCategory::Dna)
            .await?;

        let map = mapper
            .map_transformation(&blueprint, world)
            .await
            .record(&mut degradations);
        self.save_json(&map, "transformation_map.json", ArtifactCategory::Dna)
            .await?;

        let plan = create_scene_plan(&blueprint.critical_moments, *self.settings.num_scenes());
        let writer = SceneWriter::new(
            &self.driver,
            policy,
            *self.settings.scene_word_count(),
            *self.settings.target_word_count(),
        );

        let mut scenes = Vec::with_capacity(plan.len());
        let mut previous_summary: Option<String> = None;
        for entry in &plan {
            info!(index = entry.index, position = %entry.position, "Generating scene");
            let scene = writer
                .generate_scene(&blueprint, &map, entry, previous_summary.as_deref())
                .await
                .record(&mut degradations);
            self.save_json(&scene, &scene_artifact_name(entry), ArtifactCategory::Scenes)
                .await?;
            previous_summary = Some(scene.summary.clone());
            scenes.push(scene);
        }

        info!(scenes = scenes.len(), "Polishing final story");
        let story = writer.polish(&scenes, &blueprint).await?;
        let location = self
            .store
            .save(
                ArtifactContent::text(story.as_str()),
                "final_story.txt",
                ArtifactCategory::Final,
            )
            .await?;
        info!(location = %location, "Saved final story");

        if degradations.is_empty() {
            info!("Run completed");
        } else {
            warn!(degraded = degradations.len(), "Run completed with degraded stages");
        }

        Ok(RunReport {
            story,
            chunk_count: chunks.len(),
            scene_count: scenes.len(),
            degradations,
        })
    }

    async fn save_json<T: Serialize + ?Sized>(
        &self,
        value: &T,
        name: &str,
        category: ArtifactCategory,
    ) -> ReimagineResult<()> {
        let location = self
            .store
            .save(ArtifactContent::json(value)?, name, category)
            .await?;
        debug!(location = %location, "Saved artifact");
        Ok(())
    }
}

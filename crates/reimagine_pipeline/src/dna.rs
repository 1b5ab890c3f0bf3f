//! Story DNA accumulation: per-chunk summaries, rolling merge, consolidation.

use crate::{Degradation, Outcome, RetryPolicy, attempt_with_policy, interpret_json, prompts};
use reimagine_core::{FinalDna, StoryDna};
use reimagine_interface::ReimagineDriver;
use tracing::{debug, info, instrument};

/// Call site names used in degradation records.
pub const LOCAL_SUMMARY_SITE: &str = "local_summary";
/// Rolling merge call site.
pub const MERGE_SITE: &str = "rolling_merge";
/// Final consolidation call site.
pub const CONSOLIDATION_SITE: &str = "consolidation";

/// Builds story DNA from chunked source text.
pub struct DnaAccumulator<'a, D: ?Sized> {
    driver: &'a D,
    policy: RetryPolicy,
}

impl<'a, D: ReimagineDriver + ?Sized> DnaAccumulator<'a, D> {
    /// Accumulator calling `driver` under `policy`.
    pub fn new(driver: &'a D, policy: RetryPolicy) -> Self {
        Self { driver, policy }
    }

    /// Summarize one chunk using only that chunk's content.
    ///
    /// Falls back to [`StoryDna::placeholder`].
    #[instrument(skip(self, paragraphs), fields(paragraphs = paragraphs.len()))]
    pub async fn summarize_chunk(&self, paragraphs: &[String]) -> Outcome<StoryDna> {
        let prompt = prompts::local_summary(&paragraphs.join("\n\n"));
        attempt_with_policy(
            self.driver,
            self.policy,
            LOCAL_SUMMARY_SITE,
            &prompt,
            interpret_json::<StoryDna>,
            |_| StoryDna::placeholder(),
        )
        .await
    }

    /// Summarize every chunk in order.
    pub async fn summarize_all(&self, chunks: &[Vec<String>]) -> (Vec<StoryDna>, Vec<Degradation>) {
        let mut summaries = Vec::with_capacity(chunks.len());
        let mut degradations = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            info!(chunk = index + 1, total = chunks.len(), "Summarizing chunk");
            summaries.push(self.summarize_chunk(chunk).await.record(&mut degradations));
        }
        (summaries, degradations)
    }

    /// Merge `summary` into `current`.
    ///
    /// An empty summary leaves `current` untouched without calling the
    /// backend. Accepted merges are brought back within the character and
    /// event caps. On exhausted attempts `current` is returned unchanged.
    #[instrument(skip_all, fields(
        characters = current.characters.len(),
        events = current.events.len()
    ))]
    pub async fn merge(&self, current: StoryDna, summary: &StoryDna) -> Outcome<StoryDna> {
        if summary.is_empty() {
            debug!("Empty summary, nothing to merge");
            return Outcome::Accepted(current);
        }

        let prompt = prompts::merge(&pretty(&current), &pretty(summary));
        attempt_with_policy(
            self.driver,
            self.policy,
            MERGE_SITE,
            &prompt,
            |raw| interpret_json::<StoryDna>(raw).map(StoryDna::within_caps),
            move |_| current,
        )
        .await
    }

    /// Left fold of chunk summaries into one working DNA.
    ///
    /// The first summary is the seed; each later one is merged into the
    /// running result. No summaries yields an empty DNA.
    pub async fn fold(&self, summaries: &[StoryDna]) -> (StoryDna, Vec<Degradation>) {
        let mut degradations = Vec::new();
        let Some((seed, rest)) = summaries.split_first() else {
            return (StoryDna::default(), degradations);
        };

        let mut dna = seed.clone().within_caps();
        for (offset, summary) in rest.iter().enumerate() {
            info!(chunk = offset + 2, total = summaries.len(), "Merging chunk into story DNA");
            dna = self.merge(dna, summary).await.record(&mut degradations);
        }
        (dna, degradations)
    }

    /// Condense working DNA into the final blueprint.
    ///
    /// Falls back to [`FinalDna::from_accumulated`].
    #[instrument(skip_all)]
    pub async fn consolidate(&self, dna: &StoryDna) -> Outcome<FinalDna> {
        let prompt = prompts::consolidation(&pretty(dna));
        attempt_with_policy(
            self.driver,
            self.policy,
            CONSOLIDATION_SITE,
            &prompt,
            interpret_json::<FinalDna>,
            |_| FinalDna::from_accumulated(dna),
        )
        .await
    }
}

/// Pretty JSON for embedding in prompts.
pub(crate) fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

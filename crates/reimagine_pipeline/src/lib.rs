//! Story reimagination pipeline.
//!
//! A source story is chunked, summarized into bounded story DNA, moved into
//! a new world, and rewritten scene by scene:
//!
//! - [`chunk`] splits text into paragraph chunks under a word budget
//! - [`DnaAccumulator`] summarizes chunks, folds them into one DNA and
//!   consolidates it into a [`FinalDna`](reimagine_core::FinalDna) blueprint
//! - [`WorldMapper`] defines the new world and maps characters and conflicts
//! - [`SceneWriter`] writes planned scenes and polishes them into a story
//! - [`Pipeline`] runs the stages in order and persists every artifact
//!
//! Every generative call goes through [`attempt_with_policy`]: bounded
//! retries, then a call-site fallback so the run keeps going. Only the final
//! polish is fatal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod chunker;
mod config;
mod contract;
mod dna;
mod extraction;
mod input;
mod pipeline;
pub mod prompts;
mod scenes;
mod validation;
mod world;

pub use brief::{SettingType, Tone, WorldBrief};
pub use chunker::{chunk, word_count};
pub use config::{ModelConfig, PipelineConfig, ReimagineConfig, StorageConfig};
pub use contract::{
    AttemptFailure, Degradation, Outcome, Prompt, RetryPolicy, attempt_with_policy,
    interpret_json,
};
pub use dna::{CONSOLIDATION_SITE, DnaAccumulator, LOCAL_SUMMARY_SITE, MERGE_SITE};
pub use extraction::extract_json;
pub use input::{SourceInput, TemporaryInput};
pub use pipeline::{Pipeline, RunReport};
pub use scenes::{
    SCENE_BREAK, SceneWriter, create_scene_plan, scene_artifact_name, select_key_moments,
};
pub use validation::{SceneDraft, Schema, SchemaViolation};
pub use world::{MAPPING_SITE, WORLD_SITE, WorldMapper};

//! Core data types for the Reimagine story transformation pipeline.
//!
//! This crate provides the request/response types exchanged with generative
//! backends and the story data model that flows between pipeline stages:
//! working [`StoryDna`], the consolidated [`FinalDna`] blueprint, the
//! [`NewWorld`] definition, the [`TransformationMap`], and generated [`Scene`]s.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dna;
mod input;
pub mod loose;
mod message;
mod output;
mod request;
mod role;
mod scene;
mod spread;
mod telemetry;
mod world;

pub use dna::{Character, FinalDna, PlotArc, StoryDna};
pub use input::Input;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use scene::{Scene, ScenePlanEntry, ScenePosition};
pub use spread::spread_indices;
pub use telemetry::init_tracing;
pub use world::{Mappings, NewWorld, TransformationMap};

//! Reimagine: retell a story in a new world.
//!
//! A source narrative is reduced to bounded story DNA, mapped into a
//! user-described setting, and rewritten scene by scene before a final
//! editing pass stitches the scenes together.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reimagine::{
//!     FileSystemArtifactStore, OpenAiClient, Pipeline, ReimagineConfig, SettingType, SourceInput,
//!     Tone, WorldBrief,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReimagineConfig::load()?;
//!     let client = OpenAiClient::from_env(config.model().name())?;
//!     let store = FileSystemArtifactStore::new(config.storage().output_dir())?;
//!     let pipeline = Pipeline::new(client, store, config.pipeline().clone());
//!
//!     let brief = WorldBrief::new(SettingType::SciFi, "Mars colony", "2147", Tone::DarkGritty)?;
//!     let report = pipeline
//!         .run_input(&SourceInput::document("moby_dick.txt"), &brief)
//!         .await?;
//!     println!("{}", report.story());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `reimagine_error` - Error types
//! - `reimagine_core` - Story data model and request types
//! - `reimagine_interface` - `ReimagineDriver` and `TextExtractor` traits
//! - `reimagine_storage` - Artifact stores
//! - `reimagine_models` - OpenAI-compatible backend
//! - `reimagine_pipeline` - Chunking, DNA, world mapping and scene generation
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use reimagine_core::*;
pub use reimagine_error::*;
pub use reimagine_interface::*;
pub use reimagine_models::*;
pub use reimagine_pipeline::*;
pub use reimagine_storage::*;

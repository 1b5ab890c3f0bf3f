//! Layered configuration for pipeline runs.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use reimagine_error::{ConfigError, ReimagineError, ReimagineResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::RetryPolicy;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../reimagine.toml");

/// Generative backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ModelConfig {
    /// Model identifier
    name: String,
    /// Sampling temperature
    temperature: f32,
    /// Base URL of an OpenAI-compatible API
    base_url: String,
}

/// Pipeline sizing and retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PipelineConfig {
    /// Word budget per chunk
    chunk_size: usize,
    /// Requested words per scene
    scene_word_count: usize,
    /// Requested words in the final story
    target_word_count: usize,
    /// Key moments turned into scenes
    num_scenes: usize,
    /// Attempts per generative call site
    max_attempts: usize,
}

impl PipelineConfig {
    /// Reject settings that would leave the pipeline nothing to do.
    ///
    /// `max_attempts` is floored by [`RetryPolicy::new`] instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::invalid("pipeline.chunk_size", "must be at least 1 word"));
        }
        if self.num_scenes == 0 {
            return Err(ConfigError::invalid("pipeline.num_scenes", "must be at least 1"));
        }
        Ok(())
    }

    /// Retry policy for every guarded call site.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            scene_word_count: 400,
            target_word_count: 1500,
            num_scenes: 4,
            max_attempts: RetryPolicy::DEFAULT_ATTEMPTS,
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StorageConfig {
    /// Root directory for artifact categories
    output_dir: PathBuf,
}

/// Complete Reimagine configuration.
///
/// # Example
///
/// ```no_run
/// use reimagine_pipeline::ReimagineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ReimagineConfig::load()?;
/// println!("chunk budget: {}", config.pipeline().chunk_size());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ReimagineConfig {
    /// Backend settings
    model: ModelConfig,
    /// Pipeline settings
    pipeline: PipelineConfig,
    /// Storage settings
    storage: StorageConfig,
}

impl ReimagineConfig {
    /// Configuration shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns error if the bundled file fails to parse.
    pub fn bundled() -> ReimagineResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// 1. Bundled defaults (reimagine.toml shipped with the crate)
    /// 2. `~/.config/reimagine/reimagine.toml`
    /// 3. `./reimagine.toml`
    ///
    /// Missing user files are skipped.
    #[instrument]
    pub fn load() -> ReimagineResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reimagine/reimagine.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("reimagine").required(false));
        Self::build(builder)
    }

    /// Load an explicit file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ReimagineResult<Self> {
        debug!("Loading configuration from file");
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Replace the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.storage.output_dir = output_dir.into();
        self
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ReimagineResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ReimagineError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ReimagineError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.pipeline.validate()?;
        Ok(config)
    }
}

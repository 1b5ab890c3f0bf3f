//! Story transformation command handler.

use super::RunArgs;
use reimagine::{
    ArtifactStore, FileSystemArtifactStore, InMemoryArtifactStore, OpenAiClient, Pipeline,
    PipelineConfig, ReimagineConfig, ReimagineResult, RunReport, SourceInput, WorldBrief,
};
use tracing::{info, instrument, warn};

impl RunArgs {
    fn source(&self) -> Option<SourceInput> {
        match (&self.text_file, &self.document) {
            (Some(path), _) => Some(SourceInput::document(path)),
            (None, Some(path)) if self.remove_input => Some(SourceInput::temporary_document(path)),
            (None, Some(path)) => Some(SourceInput::document(path)),
            (None, None) => None,
        }
    }

    fn brief(&self) -> ReimagineResult<WorldBrief> {
        let mut brief =
            WorldBrief::new(self.setting_type, &self.setting, &self.time_period, self.tone)?;
        if let Some(feature) = &self.key_feature {
            brief = brief.with_key_feature(feature);
        }
        if let Some(details) = &self.details {
            brief = brief.with_details(details);
        }
        Ok(brief)
    }

    fn config(&self) -> ReimagineResult<ReimagineConfig> {
        let config = match &self.config {
            Some(path) => ReimagineConfig::from_file(path)?,
            None => ReimagineConfig::load()?,
        };
        Ok(match &self.output_dir {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        })
    }
}

/// Run the pipeline and print the story to stdout.
///
/// A temporary input document is removed however the command ends.
#[instrument(skip_all)]
pub async fn run_story(args: RunArgs) -> ReimagineResult<()> {
    let Some(source) = args.source() else {
        return Ok(());
    };
    let _cleanup = source.cleanup_guard();

    let config = args.config()?;
    let brief = args.brief()?;
    info!(brief = %brief, "Starting story transformation");

    let model = config.model();
    let client = OpenAiClient::from_env(model.name())?
        .with_base_url(model.base_url())
        .with_temperature(*model.temperature());

    let report = if args.in_memory {
        execute(client, InMemoryArtifactStore::new(), config.pipeline(), &source, &brief).await?
    } else {
        let store = FileSystemArtifactStore::new(config.storage().output_dir())?;
        execute(client, store, config.pipeline(), &source, &brief).await?
    };

    for degradation in report.degradations() {
        warn!(site = %degradation.site(), reason = %degradation.reason(), "Degraded stage");
    }
    if report.is_degraded() {
        eprintln!(
            "Completed with {} degraded stage(s); see the log for details.",
            report.degradations().len()
        );
    }
    println!("{}", report.story());
    Ok(())
}

async fn execute<S: ArtifactStore>(
    client: OpenAiClient,
    store: S,
    settings: &PipelineConfig,
    source: &SourceInput,
    brief: &WorldBrief,
) -> ReimagineResult<RunReport> {
    Pipeline::new(client, store, settings.clone())
        .run_input(source, brief)
        .await
}

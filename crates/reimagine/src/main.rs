//! Reimagine CLI binary.
//!
//! - `run` retells a story in a new world
//! - `chunk` previews how a source text is split

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands, run_story, show_chunks};

    let cli = Cli::parse();

    if let Err(e) = reimagine::init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded environment from .env");
    }

    let result = match cli.command {
        Commands::Run(args) => run_story(args).await,
        Commands::Chunk { text_file, budget } => show_chunks(&text_file, budget).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Reimagine failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

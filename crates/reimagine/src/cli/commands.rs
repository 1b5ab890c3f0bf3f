//! CLI command definitions.

use clap::{ArgGroup, Args, Parser, Subcommand};
use reimagine::{SettingType, Tone};
use std::path::PathBuf;

/// Reimagine - retell a story in a new world
#[derive(Parser, Debug)]
#[command(name = "reimagine")]
#[command(about = "Retell a story in a new world", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retell a story in the described world
    Run(RunArgs),

    /// Show how a text file would be chunked
    Chunk {
        /// Path to the source text
        #[arg(long)]
        text_file: PathBuf,

        /// Word budget per chunk (defaults to the configured chunk size)
        #[arg(long)]
        budget: Option<usize>,
    },
}

/// Arguments of the `run` command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["text_file", "document"])))]
pub struct RunArgs {
    /// Plain text file holding the story
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// Document to extract the story from
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Delete the document when the run ends
    #[arg(long, requires = "document", conflicts_with = "text_file")]
    pub remove_input: bool,

    /// Genre of the new world (e.g. "Sci-fi", "Fantasy", "Space Opera")
    #[arg(long)]
    pub setting_type: SettingType,

    /// Specific setting (e.g. "Mars colony")
    #[arg(long)]
    pub setting: String,

    /// Time period (e.g. "2147")
    #[arg(long)]
    pub time_period: String,

    /// Tone (e.g. "Dark/Gritty", "Hopeful")
    #[arg(long)]
    pub tone: Tone,

    /// A defining feature of the new world
    #[arg(long)]
    pub key_feature: Option<String>,

    /// Anything else the retelling should know
    #[arg(long)]
    pub details: Option<String>,

    /// Configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for intermediate and final artifacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Keep artifacts in memory instead of writing them
    #[arg(long)]
    pub in_memory: bool,
}

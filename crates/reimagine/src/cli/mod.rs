//! Command-line interface module.

mod chunk;
mod commands;
mod run;

pub use chunk::show_chunks;
pub use commands::{Cli, Commands, RunArgs};
pub use run::run_story;

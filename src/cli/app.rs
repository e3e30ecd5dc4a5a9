use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::TemplateCommands;

#[derive(Parser)]
#[command(name = "questionnaire-cli")]
#[command(about = "A CLI tool for managing whistleblowing questionnaire definitions")]
pub struct Cli {
    /// Config profile to use (defaults to the configured default profile)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Use an in-memory backend instead of the configured one
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Question template library management
    Templates(TemplateCommands),
    /// Run the data-integrity pass on a questionnaire JSON file
    Validate {
        /// Path to a questionnaire JSON file
        file: PathBuf,
    },
}

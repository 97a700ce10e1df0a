//! CLI command definitions and argument parsing.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Setlist CLI - Work with association-rule corpora offline.
#[derive(Debug, Parser)]
#[command(name = "setlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Rule corpus (.json, .jsonl, .db)
    #[arg(short, long, global = true, env = "SETLIST_MODEL")]
    pub model: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recommend items for a set of seed items
    Recommend(RecommendArgs),

    /// Show corpus statistics and sample rules
    Inspect(InspectArgs),

    /// Load the corpus and report whether every rule is valid
    Validate,

    /// Rewrite the corpus in another format
    Convert(ConvertArgs),
}

/// Arguments for the recommend command.
#[derive(Debug, Parser)]
pub struct RecommendArgs {
    /// Seed items
    #[arg(required = true)]
    pub seeds: Vec<String>,

    /// Maximum number of recommendations
    #[arg(short = 'n', long, default_value_t = 5)]
    pub top_n: usize,

    /// Drop recommendations that are already seeds
    #[arg(long)]
    pub exclude_seeds: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Number of rules to show
    #[arg(short, long, default_value_t = 5)]
    pub sample: usize,
}

/// Arguments for the convert command.
#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Destination file; its extension picks the format
    pub output: PathBuf,
}

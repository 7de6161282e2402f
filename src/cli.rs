//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pload - load and inspect prompt templates
#[derive(Parser)]
#[command(
    name = "pload",
    about = "Load prompt templates from JSON/YAML files or the prompt hub",
    version,
    after_help = "Hub identifiers look like lc://prompts/<path>.{json,yaml,py}"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Load a prompt and print it
    Load {
        /// Local path or lc://prompts/... identifier
        identifier: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Override the hub base URL
        #[arg(long)]
        hub_url: Option<String>,

        /// Override the maximum nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Print the effective loader configuration
    Config,
}

/// Output format for loaded prompts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// The prompt in config shape, as JSON
    Json,
}

//! CLI adapter for linequery
//!
//! Client-side command-line interface for querying a running server.
//! This module is parallel to `tcp/` - both depend on `core/`, and
//! the client shares only the wire literals with the server.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// linequery - exact-match line search client
///
/// Sends newline-delimited queries to a running linequery server and
/// prints the verdict for each: STRING EXISTS or STRING NOT FOUND.
#[derive(Parser, Debug)]
#[command(name = "linequery")]
#[command(version)]
#[command(about = "Exact-match line search client", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one or more queries to a running server
    Query(commands::QueryArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  linequery completions bash > ~/.local/share/bash-completion/completions/linequery
    ///   zsh:   linequery completions zsh > ~/.zfunc/_linequery
    ///   fish:  linequery completions fish > ~/.config/fish/completions/linequery.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Query(args) => commands::query::execute(args, cli.format).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

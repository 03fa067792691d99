//! # ComponentAI CLI
//!
//! Command-line access to ComponentAI without the desktop window. It shares
//! the desktop app's configuration, history and preferences.
//!
//! ## Commands
//!
//! - `generate` - Generate a component from a description
//! - `history` - List the last five generations
//! - `clear-history` - Empty the history
//! - `settings` - Show or change editor preferences
//! - `export` - Write a history entry out as an HTML file
//! - `frameworks` - List the supported frameworks
//!

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use componentai_core::{AppConfig, FrameworkChoice};
use componentai_store::FileStore;

pub mod commands;

// Re-export dependencies for use in main.rs
pub use componentai_codegen;
pub use componentai_core;
pub use componentai_store;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "componentai-cli",
    version,
    about = "Describe a UI component, get a self-contained HTML file"
)]
pub struct Cli {
    /// Directory holding history and preferences
    #[arg(long, global = true, env = "COMPONENTAI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a component and add it to history
    Generate(GenerateArgs),

    /// List recent generations, newest first
    History {
        /// Print the raw JSON log
        #[arg(long)]
        json: bool,
    },

    /// Remove every history entry
    ClearHistory,

    /// Show preferences, or update them when flags are given
    Settings(SettingsArgs),

    /// Write a history entry to an HTML file
    Export(ExportArgs),

    /// List the supported frameworks
    Frameworks,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the component should look like and do
    pub prompt: String,

    /// Target framework (see `frameworks`)
    #[arg(short, long, default_value = "html-css", value_parser = parse_framework)]
    pub framework: FrameworkChoice,

    /// Write the code to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ask for code without comments, regardless of the saved preference
    #[arg(long)]
    pub no_comments: bool,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Editor font size in pixels (clamped to 12..=24)
    #[arg(long, allow_negative_numbers = true)]
    pub font_size: Option<i64>,

    /// Ask the model for comments in generated code
    #[arg(long, value_name = "BOOL")]
    pub include_comments: Option<bool>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file
    #[arg(short, long, default_value = componentai_core::EXPORT_FILE_NAME)]
    pub output: PathBuf,

    /// History position, 0 being the newest
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

fn parse_framework(value: &str) -> Result<FrameworkChoice, String> {
    value.parse::<FrameworkChoice>().map_err(|e| {
        let known: Vec<_> = FrameworkChoice::all().iter().map(|f| f.value()).collect();
        format!("{e} (expected one of: {})", known.join(", "))
    })
}

// ============================================================================
// Entry Point
// ============================================================================

/// Resolve configuration from the command line
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    Ok(match &cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}

/// Run one command, writing its output to `out`
pub async fn run<W: std::io::Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = load_config(&cli)?;
    let store = FileStore::new(config.resolved_data_dir());
    tracing::debug!("Using data directory {}", store.root().display());

    match cli.command {
        Commands::Generate(args) => commands::generate(&config, &store, args, out).await,
        Commands::History { json } => commands::history(&store, json, out),
        Commands::ClearHistory => commands::clear_history(&store, out),
        Commands::Settings(args) => commands::settings(&store, args, out),
        Commands::Export(args) => commands::export(&store, args, out),
        Commands::Frameworks => commands::frameworks(out),
    }
}

// ============================================================================
// Tests
// ============================================================================

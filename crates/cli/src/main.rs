//! docslice CLI
//!
//! Main entry point for the docslice command-line tool.
//! Splits heading-structured documents into bounded chunks for retrieval.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{ChunkCommand, InitCommand, SectionsCommand};
use docslice_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// docslice - heading-aware document chunking
#[derive(Parser, Debug)]
#[command(name = "docslice")]
#[command(about = "Heading-aware document chunking for retrieval pipelines", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCSLICE_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCSLICE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chunk documents into bounded, provenance-tagged pieces
    Chunk(ChunkCommand),

    /// List the sections detected in a document
    Sections(SectionsCommand),

    /// Write the default chunker config to the workspace
    Init(InitCommand),
}

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("docslice starting");
    tracing::debug!("Workspace: {:?}", config.workspace);

    let command_name = match &cli.command {
        Commands::Chunk(_) => "chunk",
        Commands::Sections(_) => "sections",
        Commands::Init(_) => "init",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Chunk(cmd) => cmd.execute(&config),
        Commands::Sections(cmd) => cmd.execute(&config),
        Commands::Init(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}

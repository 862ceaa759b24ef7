//! # doxgen Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the doxgen CLI, which drives Doxygen for a set of configured
//! documentation profiles. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`generate`, `config`, `log`, `browse`) is a variant of `Commands`
//! - Global options (`-v`, `--config`) are collected into `GlobalOptions` and passed down
//! - All errors are propagated to this level, printed once, and turned into exit code 1
//!
//! ## Examples
//!
//! ```bash
//! # Generate every configured profile
//! doxgen generate
//!
//! # Generate one profile with a specific Doxygen, logging progress
//! doxgen -v generate api --doxygen /opt/doxygen/bin/doxygen
//!
//! # Configure a profile
//! doxgen config set profiles.api.input ~/src/mylib
//! doxgen config set profiles.api.output ~/docs/mylib
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (generate, config, log, browse)
mod common; // Shared utilities (fs, process, system)
mod core; // Configuration, planning, generation, errors

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "doxgen",
    about = "📚 doxgen: Doxygen documentation runs for configured profiles",
    long_about = "Render a Doxyfile per profile, run Doxygen for each profile concurrently,\n\
                  capture its output into <output>/Log.txt and stage custom stylesheets.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// User configuration file to use instead of the platform default.
    #[arg(long, global = true, env = "DOXGEN_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
    #[command(alias = "c")]
    Config(commands::config::ConfigArgs),
    Log(commands::log::LogArgs),
    Browse(commands::browse::BrowseArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let globals = commands::GlobalOptions {
        config: cli.config,
    };
    let command_result = match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate(args, &globals).await,
        Commands::Config(args) => commands::config::handle_config(args, &globals).await,
        Commands::Log(args) => commands::log::handle_log(args, &globals).await,
        Commands::Browse(args) => commands::browse::handle_browse(args, &globals).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

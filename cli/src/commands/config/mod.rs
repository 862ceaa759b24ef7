//! # doxgen Config Command Group
//!
//! File: cli/src/commands/config/mod.rs
//!
//! ## Overview
//!
//! - `doxgen config show`: resolved configuration and per-profile readiness
//! - `doxgen config get KEY` / `doxgen config set KEY VALUE [--project]`
//! - `doxgen config import PROFILE DIR [--project]`: point a profile at a source
//!   directory and pick up `package.json` metadata
//!
//! Writes go to the user config file (`--config`, `DOXGEN_CONFIG`, or the
//! platform default) unless `--project` is given, in which case they go to the
//! project's `.doxgen.toml` (the nearest one found from the current directory,
//! or a new one in the current directory).
//!
use crate::commands::GlobalOptions;
use crate::core::config::{self, PROJECT_CONFIG_FILENAME};
use crate::core::error::{DoxgenError, Result};
use crate::core::settings::TomlFileStore;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod import;
mod set;
mod show;

/// Arguments for the `doxgen config` command group.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show the resolved configuration and whether each profile is ready.
    Show(show::ShowArgs),
    /// Print a single setting.
    Get(set::GetArgs),
    /// Change a single setting.
    Set(set::SetArgs),
    /// Point a profile at a source directory, reading package.json if present.
    Import(import::ImportArgs),
}

pub async fn handle_config(args: ConfigArgs, globals: &GlobalOptions) -> Result<()> {
    match args.command {
        ConfigCommand::Show(args) => show::handle_show(args, globals).await,
        ConfigCommand::Get(args) => set::handle_get(args, globals).await,
        ConfigCommand::Set(args) => set::handle_set(args, globals).await,
        ConfigCommand::Import(args) => import::handle_import(args, globals).await,
    }
}

/// The file `get`/`set`/`import` operate on.
fn settings_path(globals: &GlobalOptions, project: bool) -> Result<PathBuf> {
    if project {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        return Ok(config::find_project_config_path(&cwd)
            .unwrap_or_else(|| cwd.join(PROJECT_CONFIG_FILENAME)));
    }
    globals
        .config
        .clone()
        .or_else(config::default_user_config_path)
        .ok_or_else(|| {
            anyhow!(DoxgenError::Config(
                "Could not determine the user config directory; pass --config <path>.".to_string()
            ))
        })
}

fn open_store(globals: &GlobalOptions, project: bool) -> Result<TomlFileStore> {
    TomlFileStore::open(settings_path(globals, project)?)
}

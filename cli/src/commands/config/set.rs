//! # doxgen Config Get/Set Commands
//!
//! File: cli/src/commands/config/set.rs
//!
//! ## Overview
//!
//! `doxgen config get KEY` and `doxgen config set KEY VALUE [--project]`.
//! Keys are validated before the settings file is touched, and every `set`
//! is written back immediately.
//!
use super::open_store;
use crate::commands::GlobalOptions;
use crate::core::error::{DoxgenError, Result};
use crate::core::settings::{SettingKey, SettingsStore};
use anyhow::anyhow;
use clap::Parser;
use tracing::debug;

/// Arguments for `doxgen config get`.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Setting key, e.g. `doxygen.path` or `profiles.api.output`.
    key: String,
    /// Read from the project's .doxgen.toml instead of the user config.
    #[arg(long)]
    project: bool,
}

/// Arguments for `doxgen config set`.
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Setting key, e.g. `doxygen.path` or `profiles.api.output`.
    key: String,
    value: String,
    /// Write to the project's .doxgen.toml instead of the user config.
    #[arg(long)]
    project: bool,
}

pub async fn handle_get(args: GetArgs, globals: &GlobalOptions) -> Result<()> {
    let store = open_store(globals, args.project)?;
    debug!("Reading {} from {}", args.key, store.path().display());
    match store.get(&args.key)? {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(anyhow!(DoxgenError::Settings(format!(
            "'{}' is not set in {}",
            args.key,
            store.path().display()
        )))),
    }
}

pub async fn handle_set(args: SetArgs, globals: &GlobalOptions) -> Result<()> {
    // Validate before touching the file so a typo never creates it.
    let key: SettingKey = args.key.parse()?;
    let mut store = open_store(globals, args.project)?;
    store.set(&args.key, &args.value)?;
    println!("{} = {:?} ({})", key, args.value, store.path().display());
    Ok(())
}

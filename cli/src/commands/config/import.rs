//! # doxgen Config Import Command
//!
//! File: cli/src/commands/config/import.rs
//!
//! ## Overview
//!
//! `doxgen config import PROFILE DIR [--project]` points the profile's input at
//! `DIR` and copies the project name and version from `DIR/package.json`.
//!
use super::open_store;
use crate::commands::GlobalOptions;
use crate::core::error::{DoxgenError, Result};
use crate::core::package;
use crate::core::settings::{ProfileField, SettingKey, SettingsStore};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `doxgen config import`.
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Profile to create or update.
    profile: String,
    /// Source directory to document.
    dir: PathBuf,
    /// Write to the project's .doxgen.toml instead of the user config.
    #[arg(long)]
    project: bool,
}

/// Sets `profiles.<name>.input` to DIR and copies `displayName`/`version`
/// from `DIR/package.json` into the profile's project name and version.
pub async fn handle_import(args: ImportArgs, globals: &GlobalOptions) -> Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!(DoxgenError::Config(format!(
            "Import source is not a directory: {}",
            args.dir.display()
        )));
    }
    let dir = args
        .dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", args.dir.display()))?;

    let mut updates = vec![(ProfileField::Input, dir.display().to_string())];
    if let Some(manifest) = package::read_manifest(&dir)? {
        if let Some(name) = manifest.project_name() {
            updates.push((ProfileField::Project, name.to_string()));
        }
        if let Some(version) = manifest.version.filter(|v| !v.is_empty()) {
            updates.push((ProfileField::Version, version));
        }
    }

    let mut store = open_store(globals, args.project)?;
    for (field, value) in updates {
        let key = SettingKey::profile(&args.profile, field).to_string();
        store.set(&key, &value)?;
        println!("{} = {:?}", key, value);
    }
    info!("Imported '{}' into {}", args.profile, store.path().display());
    Ok(())
}

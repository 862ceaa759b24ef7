//! # doxgen Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The command groups of the doxgen CLI. Each module defines its Clap
//! arguments and an async `handle_*` function called from `main.rs`.
//!
//! ## Command Groups
//!
//! - `generate`: Run Doxygen for one or more profiles and report the results
//! - `config`: Show, read, write and import configuration values
//! - `log`: Print the captured output of a profile's last run
//! - `browse`: Locate or open a profile's generated documentation
//!
use crate::core::config::{load_config, Config};
use crate::core::error::{DoxgenError, Result};
use anyhow::{anyhow, Context};
use std::path::PathBuf;

/// Command group for running Doxygen over configured profiles.
pub mod generate;
/// Command group for reading and writing configuration values.
pub mod config;
/// Prints `<output>/Log.txt` for a profile.
pub mod log;
/// Locates or opens generated HTML.
pub mod browse;

/// Options accepted by every command.
#[derive(Debug, Default, Clone)]
pub struct GlobalOptions {
    /// Replaces the platform default user config file.
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn load_config(&self) -> Result<Config> {
        load_config(self.config.as_deref()).context("Failed to load doxgen configuration")
    }
}

/// Output directory configured for `profile`.
fn profile_output_dir(cfg: &Config, profile: &str) -> Result<PathBuf> {
    cfg.profile(profile)?.output_dir().ok_or_else(|| {
        anyhow!(DoxgenError::Config(format!(
            "Profile '{}' has no output directory (profiles.{}.output).",
            profile, profile
        )))
    })
}

//! # doxgen Log Command
//!
//! File: cli/src/commands/log.rs
//!
//! ## Overview
//!
//! `doxgen log PROFILE` prints the output captured during the profile's last
//! run, as written to `<output>/Log.txt` when that run finished.
//!
use crate::commands::{profile_output_dir, GlobalOptions};
use crate::common::fs::io;
use crate::core::error::{DoxgenError, Result};
use crate::core::generation::LOG_FILENAME;
use clap::Parser;

/// Arguments for `doxgen log`.
#[derive(Parser, Debug)]
pub struct LogArgs {
    profile: String,
}

pub async fn handle_log(args: LogArgs, globals: &GlobalOptions) -> Result<()> {
    let cfg = globals.load_config()?;
    let log_path = profile_output_dir(&cfg, &args.profile)?.join(LOG_FILENAME);
    if !log_path.is_file() {
        anyhow::bail!(DoxgenError::FileSystem(format!(
            "No log for '{}' at {}. Run `doxgen generate {}` first.",
            args.profile,
            log_path.display(),
            args.profile
        )));
    }
    print!("{}", io::read_file_to_string(&log_path)?);
    Ok(())
}

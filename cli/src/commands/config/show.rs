//! # doxgen Config Show Command
//!
//! File: cli/src/commands/config/show.rs
//!
//! ## Overview
//!
//! `doxgen config show` prints the resolved configuration and a readiness
//! check per profile, so a broken setup is visible before `doxgen generate`
//! runs. `--raw` prints the merged TOML instead.
//!
use crate::commands::GlobalOptions;
use crate::common::system::tools;
use crate::core::config::{Config, ProfileConfig};
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;

/// Arguments for `doxgen config show`.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print the merged configuration as TOML instead of the summary.
    #[arg(long)]
    raw: bool,
}

pub async fn handle_show(args: ShowArgs, globals: &GlobalOptions) -> Result<()> {
    let cfg = globals.load_config()?;
    if args.raw {
        print!("{}", toml::to_string_pretty(&cfg)?);
        return Ok(());
    }
    for line in summary_lines(&cfg) {
        println!("{}", line);
    }
    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

fn summary_lines(cfg: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    match cfg.doxygen_executable() {
        Some(path) => lines.push(format!(
            "{} Doxygen: {}",
            mark(tools::is_executable(&path)),
            path.display()
        )),
        None => lines.push(format!("{} Doxygen: not found", mark(false))),
    }
    match cfg.assets_dir() {
        Some(dir) => lines.push(format!("{} Assets: {}", mark(dir.is_dir()), dir.display())),
        None => lines.push("   Assets: (none, using the bundled Doxyfile template)".to_string()),
    }

    if cfg.profiles.is_empty() {
        lines.push("\nNo profiles configured.".to_string());
        return lines;
    }
    lines.push("\nProfiles:".to_string());
    for (name, profile) in &cfg.profiles {
        lines.push(format!("  {}", name));
        lines.push(directory_line("input ", profile.input_dir().as_deref()));
        lines.push(directory_line("output", profile.output_dir().as_deref()));
        lines.extend(metadata_lines(name, profile));
    }
    lines
}

fn directory_line(label: &str, dir: Option<&Path>) -> String {
    match dir {
        Some(dir) => format!("    {} {}: {}", mark(dir.is_dir()), label, dir.display()),
        None => format!("    {} {}: not set", mark(false), label),
    }
}

fn metadata_lines(name: &str, profile: &ProfileConfig) -> Vec<String> {
    vec![
        format!(
            "       project : {}",
            profile.project.as_deref().unwrap_or(name)
        ),
        format!(
            "       version : {}",
            profile.version.as_deref().unwrap_or("-")
        ),
        format!(
            "       synopsis: {}",
            profile.synopsis.as_deref().unwrap_or("-")
        ),
    ]
}

//! # doxgen Generation Reports
//!
//! File: cli/src/commands/generate/report.rs
//!
//! ## Overview
//!
//! Console reporting for finished generation runs.
//!
//! One line per run, printed as each run is reaped, followed by a summary:
//!
//! ```text
//! ✅ api: docs/api (2.4s)
//! ⚠️  web: Doxygen returned code 3, see docs/web/Log.txt
//! ❌ cli: Generation 'cli' failed: Failed to start '/usr/bin/doxygen': ...
//! ```
//!
use crate::core::error::Result;
use crate::core::generation::RunOutcome;
use std::env;
use std::path::Path;

/// How one run ended, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    /// Doxygen ran but reported an error through its exit code.
    ToolError(i32),
    /// The run could not be started or post-processed.
    Failed,
}

impl RunStatus {
    pub fn of(result: &Result<RunOutcome>) -> Self {
        match result {
            Ok(outcome) if outcome.succeeded() => RunStatus::Succeeded,
            Ok(outcome) => RunStatus::ToolError(outcome.exit_code),
            Err(_) => RunStatus::Failed,
        }
    }
}

/// Formats the report line for one run.
pub fn format_result(label: &str, result: &Result<RunOutcome>, cwd: Option<&Path>) -> String {
    match result {
        Ok(outcome) if outcome.succeeded() => format!(
            "✅ {}: {} ({:.1}s)",
            label,
            display_path(&outcome.output_dir, cwd),
            outcome.elapsed.as_secs_f64()
        ),
        Ok(outcome) => format!(
            "⚠️  {}: Doxygen returned code {}, see {}",
            label,
            outcome.exit_code,
            display_path(&outcome.log_path, cwd)
        ),
        Err(e) => format!("❌ {}: {:#}", label, e),
    }
}

pub fn print_result(label: &str, result: &Result<RunOutcome>) {
    let cwd = env::current_dir().ok();
    println!("{}", format_result(label, result, cwd.as_deref()));
}

pub fn print_summary(succeeded: usize, total: usize) {
    println!("\nGenerated {} of {} profile(s).", succeeded, total);
}

/// `path` relative to `cwd` when possible, otherwise as given.
fn display_path(path: &Path, cwd: Option<&Path>) -> String {
    cwd.and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

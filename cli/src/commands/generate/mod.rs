//! # doxgen Generate Command
//!
//! File: cli/src/commands/generate/mod.rs
//!
//! ## Overview
//!
//! `doxgen generate [PROFILE...]` runs Doxygen for each named profile (all
//! configured profiles when none are named), concurrently, one worker thread
//! per run.
//!
//! ## Workflow
//!
//! 1. Load the configuration and resolve the Doxygen executable
//!    (`--doxygen`, then `doxygen.path`, then `PATH`).
//! 2. Resolve every profile into a `GenerationPlan`. Two profiles writing to
//!    the same output directory are rejected here, since their runs would race
//!    on the same `Log.txt` and `html/` directory.
//! 3. Prepare every run (Doxyfile + stylesheets), then start them all.
//! 4. Poll the handles on a `tokio` interval, reaping and reporting each run as
//!    its worker thread terminates.
//! 5. Fail the command if any run failed or Doxygen reported an error.
//!
//! A run that fails to start does not stop the others; runs already started
//! are still waited for and reported.
//!
mod report;

use crate::commands::GlobalOptions;
use crate::common::process::OutputBuffer;
use crate::common::system::tools;
use crate::core::config::Config;
use crate::core::error::{DoxgenError, Result};
use crate::core::generation::{GenerationOrchestrator, RunHandle, RunOutcome};
use crate::core::plan::GenerationPlan;
use anyhow::anyhow;
use clap::Parser;
use report::RunStatus;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// Arguments for `doxgen generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Profiles to generate. Defaults to every configured profile.
    profiles: Vec<String>,
    /// Doxygen executable to use instead of the configured one.
    #[arg(long, value_name = "PATH")]
    doxygen: Option<PathBuf>,
    /// How often finished runs are checked for, in milliseconds.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 200,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval_ms: u64,
}

pub async fn handle_generate(args: GenerateArgs, globals: &GlobalOptions) -> Result<()> {
    let cfg = globals.load_config()?;
    let doxygen = resolve_doxygen(args.doxygen.clone(), &cfg)?;
    info!("Using Doxygen at {}", doxygen.display());

    let names = profile_names(&args.profiles, &cfg)?;
    let plans = build_plans(&cfg, &names)?;

    let orchestrator = GenerationOrchestrator::new();
    let requests = plans
        .iter()
        .map(|plan| orchestrator.prepare(plan, &doxygen))
        .collect::<Result<Vec<_>>>()?;

    let total = requests.len();
    let mut succeeded = 0;
    let mut handles = Vec::with_capacity(total);
    for request in requests {
        let label = request.label.clone();
        match orchestrator.start_generation(request) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                error!("Could not start generation '{}': {:#}", label, e);
                report::print_result(&label, &Err(e));
            }
        }
    }

    let poll = Duration::from_millis(args.poll_interval_ms);
    for (label, result) in wait_for_runs(handles, poll).await {
        if RunStatus::of(&result) == RunStatus::Succeeded {
            succeeded += 1;
        }
        report::print_result(&label, &result);
    }

    report::print_summary(succeeded, total);
    if succeeded < total {
        anyhow::bail!("{} of {} generation run(s) did not succeed", total - succeeded, total);
    }
    Ok(())
}

fn resolve_doxygen(explicit: Option<PathBuf>, cfg: &Config) -> Result<PathBuf> {
    let doxygen = explicit
        .or_else(|| cfg.doxygen_executable())
        .ok_or_else(|| {
            anyhow!(DoxgenError::Config(
                "Doxygen was not found on PATH. Set it with `doxgen config set doxygen.path <path>` or pass --doxygen.".to_string()
            ))
        })?;
    if !tools::is_executable(&doxygen) {
        anyhow::bail!(DoxgenError::ExecutableNotFound { path: doxygen });
    }
    Ok(doxygen)
}

/// The requested profile names, deduplicated, in request order.
fn profile_names(requested: &[String], cfg: &Config) -> Result<Vec<String>> {
    if requested.is_empty() {
        if cfg.profiles.is_empty() {
            anyhow::bail!(DoxgenError::Config(
                "No profiles are configured. Add one with `doxgen config set profiles.<name>.input <dir>`.".to_string()
            ));
        }
        return Ok(cfg.profiles.keys().cloned().collect());
    }
    let mut seen = BTreeSet::new();
    Ok(requested
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect())
}

/// Resolves each profile, rejecting profiles that share an output directory.
fn build_plans(cfg: &Config, names: &[String]) -> Result<Vec<GenerationPlan>> {
    let assets_dir = cfg.assets_dir();
    let mut owners: HashMap<PathBuf, String> = HashMap::new();
    let mut plans = Vec::with_capacity(names.len());
    for name in names {
        let plan = GenerationPlan::from_profile(name, cfg.profile(name)?, assets_dir.as_deref())?;
        if let Some(other) = owners.insert(plan.output_dir.clone(), name.clone()) {
            anyhow::bail!(DoxgenError::Config(format!(
                "Profiles '{}' and '{}' both write to {}; generate them separately.",
                other,
                name,
                plan.output_dir.display()
            )));
        }
        plans.push(plan);
    }
    Ok(plans)
}

/// Polls `pending` until every worker thread has terminated.
///
/// Results come back in completion order (as observed at poll granularity).
async fn wait_for_runs(
    mut pending: Vec<RunHandle>,
    poll: Duration,
) -> Vec<(String, Result<RunOutcome>)> {
    let mut results = Vec::with_capacity(pending.len());
    let mut interval = tokio::time::interval(poll);
    while !pending.is_empty() {
        interval.tick().await;
        let (finished, running): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(RunHandle::is_finished);
        pending = running;
        for handle in &pending {
            trace!("Generation '{}': {}", handle.label(), progress(handle.buffer()));
        }
        for handle in finished {
            let label = handle.label().to_string();
            debug!(
                "Reaping generation '{}' after {:?}: exit code {:?}, {} (log: {})",
                label,
                handle.started_at().elapsed(),
                handle.exit_code(),
                progress(handle.buffer()),
                handle.log_path().display()
            );
            results.push((label, handle.join()));
        }
    }
    results
}

/// Short description of how far a run's output capture has got.
fn progress(buffer: &OutputBuffer) -> String {
    if !buffer.is_started() {
        "not started".to_string()
    } else if buffer.is_empty() {
        "no output yet".to_string()
    } else if buffer.is_finished() {
        format!("{} line(s) captured", buffer.len())
    } else {
        format!("{} line(s) so far", buffer.len())
    }
}

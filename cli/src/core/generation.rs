//! # doxgen Generation Orchestrator
//!
//! File: cli/src/core/generation.rs
//!
//! ## Overview
//!
//! Starts Doxygen runs on dedicated worker threads and hands back a
//! `RunHandle` immediately. Each run gets its own `OutputBuffer` and
//! `ProcessRunner`; when the process exits, the completion callback records
//! the exit code, re-stages the run's assets and writes `<output>/Log.txt`.
//!
//! ## Architecture
//!
//! ```text
//! caller thread                     worker thread "doxgen-<label>"
//! -------------                     ------------------------------
//! prepare(plan)   -> RunRequest
//! start_generation(request)  --->   ProcessRunner::run()
//!   returns RunHandle                 mark_started, drain pipes, wait
//! poll handle.is_finished()           mark_finished
//!                                     callback: exit code, re-stage, Log.txt
//! handle.join()   <-- outcome ---   thread terminates
//! ```
//!
//! The completion callback runs on the worker thread. It only touches state
//! owned by the run (buffer, exit code cell, output directory). Callers
//! observe completion through `RunHandle::is_finished` and `RunHandle::join`
//! and never share state with the callback.
//!
//! Liveness is the worker thread itself: a run is finished exactly when its
//! thread has terminated. There is no separate done flag and no cancellation.
//! The orchestrator keeps no state between runs, and two runs never share a
//! buffer or a log file as long as their output directories differ.
//!
use crate::common::fs::io;
use crate::common::process::{OutputBuffer, ProcessRunner};
use crate::common::system::tools;
use crate::core::doxyfile::{self, DoxyfileContext};
use crate::core::error::{DoxgenError, Result};
use crate::core::plan::GenerationPlan;
use crate::core::staging::{self, StagedAsset};
use anyhow::{anyhow, Context};
use std::any::Any;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Name of the captured-output log written into the output directory.
pub const LOG_FILENAME: &str = "Log.txt";

/// Everything needed to start one run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub label: String,
    pub executable: PathBuf,
    pub args: Vec<OsString>,
    pub output_dir: PathBuf,
    /// Assets copied again after the tool exits.
    pub restaged_assets: Vec<StagedAsset>,
}

impl RunRequest {
    pub fn new<I, S>(executable: impl Into<PathBuf>, args: I, output_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let output_dir = output_dir.into();
        let label = output_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "run".to_string());
        Self {
            label,
            executable: executable.into(),
            args: args.into_iter().map(Into::into).collect(),
            output_dir,
            restaged_assets: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_restaged_assets(mut self, assets: Vec<StagedAsset>) -> Self {
        self.restaged_assets = assets;
        self
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub label: String,
    /// Tool exit code; `-1` if the process ended without one.
    pub exit_code: i32,
    pub log_path: PathBuf,
    pub output_dir: PathBuf,
    pub elapsed: Duration,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Caller-side reference to an in-flight or completed run.
pub struct RunHandle {
    label: String,
    thread: JoinHandle<Result<(i32, Duration)>>,
    buffer: Arc<OutputBuffer>,
    exit_code: Arc<OnceLock<i32>>,
    output_dir: PathBuf,
    started_at: Instant,
}

impl RunHandle {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// `true` once the worker thread has terminated.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// The exit code, once the completion callback has recorded it.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code.get().copied()
    }

    /// The run's live output. Safe to read while the run is in progress.
    pub fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(LOG_FILENAME)
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Waits for the worker thread and returns the run's outcome.
    ///
    /// Blocks if the run is still in progress. Errors from spawning the tool,
    /// post-processing, or a panic on the worker thread surface here.
    pub fn join(self) -> Result<RunOutcome> {
        let name = format!("doxgen-{}", self.label);
        let (exit_code, elapsed) = self
            .thread
            .join()
            .map_err(|payload| {
                anyhow!(DoxgenError::Worker {
                    name: name.clone(),
                    reason: panic_message(payload.as_ref()),
                })
            })?
            .with_context(|| format!("Generation '{}' failed", self.label))?;

        Ok(RunOutcome {
            log_path: self.output_dir.join(LOG_FILENAME),
            label: self.label,
            exit_code,
            output_dir: self.output_dir,
            elapsed,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panicked".to_string()
    }
}

/// Prepares and starts generation runs. Holds no state between runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerationOrchestrator;

impl GenerationOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// Writes the Doxyfile for `plan`, stages its stylesheets and returns the
    /// request that runs `executable` on it.
    pub fn prepare(&self, plan: &GenerationPlan, executable: &Path) -> Result<RunRequest> {
        let html_dir = plan.html_dir();
        io::ensure_dir_exists(&html_dir)?;

        let assets = match &plan.assets_dir {
            Some(dir) => staging::discover_stylesheets(dir, &html_dir)?,
            None => Vec::new(),
        };
        staging::stage_all(&assets)?;

        let template = doxyfile::load_template(plan.assets_dir.as_deref())?;
        let stylesheets: Vec<PathBuf> = assets.iter().map(|a| a.destination.clone()).collect();
        let context = DoxyfileContext::new(plan, &stylesheets);
        let doxyfile_path = doxyfile::write_doxyfile(&plan.output_dir, &template, &context)?;

        debug!("Prepared '{}' with {} stylesheet(s)", plan.profile, assets.len());
        Ok(
            RunRequest::new(executable, [doxyfile_path.into_os_string()], &plan.output_dir)
                .with_label(&plan.profile)
                .with_restaged_assets(assets),
        )
    }

    /// Starts `request` on a new worker thread and returns without waiting.
    ///
    /// # Errors
    ///
    /// Fails immediately, without creating a thread or a buffer, if the
    /// executable does not exist or is not executable.
    pub fn start_generation(&self, request: RunRequest) -> Result<RunHandle> {
        if !tools::is_executable(&request.executable) {
            anyhow::bail!(DoxgenError::ExecutableNotFound {
                path: request.executable,
            });
        }

        let RunRequest {
            label,
            executable,
            args,
            output_dir,
            restaged_assets,
        } = request;

        let buffer = Arc::new(OutputBuffer::new());
        let exit_code = Arc::new(OnceLock::new());
        let on_complete = {
            let label = label.clone();
            let buffer = Arc::clone(&buffer);
            let exit_code = Arc::clone(&exit_code);
            let log_path = output_dir.join(LOG_FILENAME);
            move |code: i32| {
                finish_run(&label, code, &exit_code, &buffer, &restaged_assets, &log_path)
            }
        };
        let runner = ProcessRunner::new(executable, args, Arc::clone(&buffer), on_complete);

        let started_at = Instant::now();
        let name = format!("doxgen-{}", label);
        let worker_label = label.clone();
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let result = runner.run().map(|code| (code, started_at.elapsed()));
                if let Err(e) = &result {
                    error!("Generation '{}' failed: {:#}", worker_label, e);
                }
                result
            })
            .with_context(|| format!("Failed to spawn worker thread {}", name))?;

        info!("Started generation '{}' into {}", label, output_dir.display());
        Ok(RunHandle {
            label,
            thread,
            buffer,
            exit_code,
            output_dir,
            started_at,
        })
    }
}

/// Completion callback body. Runs on the worker thread after the buffer is finished.
///
/// Both post-processing steps are attempted; the re-stage error wins if both fail.
fn finish_run(
    label: &str,
    code: i32,
    exit_code: &OnceLock<i32>,
    buffer: &OutputBuffer,
    assets: &[StagedAsset],
    log_path: &Path,
) -> Result<()> {
    if exit_code.set(code).is_err() {
        warn!("Exit code for '{}' was already recorded", label);
    }
    if code != 0 {
        warn!("Doxygen returned code {} for '{}'", code, label);
    }

    let restaged = staging::stage_all(assets);
    let logged = io::write_lines_to_file(log_path, &buffer.read_all());

    restaged.with_context(|| format!("Failed to re-stage assets for '{}'", label))?;
    logged.with_context(|| format!("Failed to write {}", log_path.display()))?;
    debug!("Wrote {} ({} lines)", log_path.display(), buffer.len());
    Ok(())
}

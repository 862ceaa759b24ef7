//! # doxgen Process Runner
//!
//! File: cli/src/common/process/runner.rs
//!
//! ## Overview
//!
//! `ProcessRunner` executes one external program to completion:
//!
//! 1. Check that the executable exists and is executable (before the buffer is touched)
//! 2. Mark the output buffer started
//! 3. Spawn the program with stdout and stderr piped
//! 4. Drain both pipes on their own scoped threads while waiting for the exit status
//! 5. Mark the buffer finished
//! 6. Invoke the completion callback with the exit code, on the calling thread
//!
//! The runner is thread-agnostic. It blocks for the whole lifetime of the child,
//! so callers normally run it on a dedicated worker thread (see
//! `core::generation`).
//!
//! ## Guarantees
//!
//! - `run` consumes the runner, so a runner spawns at most one process.
//! - The callback is a `FnOnce` and fires at most once, only after `mark_finished`.
//! - A nonzero exit code is passed to the callback and returned. It is not an error.
//! - If the program cannot be spawned, the buffer is closed and the callback does
//!   not fire. The spawn error is returned instead.
//! - An error returned by the callback is propagated out of `run`.
//!
//! Both pipes are drained concurrently with the wait. A child that fills its
//! pipe buffer would otherwise block forever.
//!
use super::buffer::OutputBuffer;
use crate::common::system::tools;
use crate::core::error::{DoxgenError, Result};
use anyhow::{anyhow, Context};
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, trace, warn};

/// Exit code reported when the child was terminated without one (e.g. by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Completion callback. Runs on the thread that called `ProcessRunner::run`.
pub type CompletionCallback = Box<dyn FnOnce(i32) -> Result<()> + Send + 'static>;

/// One single-use execution of an external program.
pub struct ProcessRunner {
    executable: PathBuf,
    args: Vec<OsString>,
    buffer: Arc<OutputBuffer>,
    on_complete: CompletionCallback,
}

impl ProcessRunner {
    /// Creates a runner for `executable` with `args`, filling `buffer` and
    /// calling `on_complete` with the exit code once the process has exited.
    pub fn new<I, S, F>(
        executable: impl Into<PathBuf>,
        args: I,
        buffer: Arc<OutputBuffer>,
        on_complete: F,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
        F: FnOnce(i32) -> Result<()> + Send + 'static,
    {
        Self {
            executable: executable.into(),
            args: args.into_iter().map(Into::into).collect(),
            buffer,
            on_complete: Box::new(on_complete),
        }
    }

    /// Runs the program to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// - `DoxgenError::ExecutableNotFound` if the executable is missing or not
    ///   executable. The buffer is left untouched.
    /// - `DoxgenError::Spawn` if the OS refuses to start the program.
    /// - Any error from reading the pipes, waiting on the child, or the
    ///   completion callback.
    pub fn run(self) -> Result<i32> {
        let ProcessRunner {
            executable,
            args,
            buffer,
            on_complete,
        } = self;

        if !tools::is_executable(&executable) {
            anyhow::bail!(DoxgenError::ExecutableNotFound { path: executable });
        }

        buffer.mark_started()?;
        info!("Starting {} with args {:?}", executable.display(), args);

        let spawned = Command::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                buffer.mark_finished();
                return Err(anyhow!(DoxgenError::Spawn {
                    path: executable,
                    source,
                }));
            }
        };
        debug!("Spawned {} (pid {})", executable.display(), child.id());

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let sink: &OutputBuffer = &buffer;

        let waited = thread::scope(|scope| -> Result<ExitStatus> {
            let readers = [
                stdout.map(|pipe| scope.spawn(move || drain_lines(pipe, "stdout", sink))),
                stderr.map(|pipe| scope.spawn(move || drain_lines(pipe, "stderr", sink))),
            ];

            let status = child
                .wait()
                .with_context(|| format!("Failed to wait for {}", executable.display()))?;

            for reader in readers.into_iter().flatten() {
                reader.join().map_err(|_| {
                    anyhow!(DoxgenError::Worker {
                        name: "output-reader".to_string(),
                        reason: "pipe reader panicked".to_string(),
                    })
                })??;
            }
            Ok(status)
        });

        // The buffer is closed on every path out of here; appends are over either way.
        buffer.mark_finished();
        let status = waited?;

        let exit_code = status.code().unwrap_or(NO_EXIT_CODE);
        info!(
            "{} exited with code {} ({} lines captured)",
            executable.display(),
            exit_code,
            buffer.len()
        );

        on_complete(exit_code)?;
        Ok(exit_code)
    }
}

/// Reads `pipe` line by line into `buffer` until EOF.
///
/// Invalid UTF-8 is replaced rather than rejected; line terminators are stripped.
/// Reads `pipe` to EOF, one buffer line per output line.
///
/// The pipe is drained to the end even after an append fails, so the child
/// never blocks on a full pipe; the first append error is returned at EOF.
fn drain_lines(pipe: impl Read, stream: &str, buffer: &OutputBuffer) -> Result<()> {
    let mut reader = BufReader::new(pipe);
    let mut raw = Vec::new();
    let mut failure = None;
    loop {
        raw.clear();
        let read = reader
            .read_until(b'\n', &mut raw)
            .with_context(|| format!("Failed to read child {}", stream))?;
        if read == 0 {
            break;
        }
        if failure.is_some() {
            continue;
        }
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        trace!("[{}] {}", stream, line);
        if let Err(e) = buffer.append_line(line) {
            warn!("Discarding remaining child {}: {:#}", stream, e);
            failure = Some(e);
        }
    }
    failure.map_or(Ok(()), Err)
}

//! # doxgen Process Output Buffer
//!
//! File: cli/src/common/process/buffer.rs
//!
//! ## Overview
//!
//! `OutputBuffer` collects the lines an external process writes to stdout and
//! stderr. One thread (the process reader) appends while any other thread may
//! take a snapshot at any time, mid-run or after completion.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──mark_started──▶ started ──append_line*──▶ ──mark_finished──▶ finished (read-only)
//! ```
//!
//! - `mark_started` must come before the first `append_line`. Calling it twice is a no-op.
//! - `append_line` is rejected before `mark_started` and after `mark_finished`.
//! - `read_all` is always allowed and returns a copy, never a partial line.
//!
//! A buffer belongs to exactly one run and is never reused.
//!
use crate::core::error::{DoxgenError, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct BufferState {
    lines: Vec<String>,
    started: bool,
    finished: bool,
}

/// Append-only, line-oriented log buffer shared between a process reader and its observers.
///
/// Share it with `Arc<OutputBuffer>`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    state: Mutex<BufferState>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-pushed line behind,
    // so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the buffer for appends.
    ///
    /// # Errors
    ///
    /// Returns `DoxgenError::OutputBuffer` if the buffer was already finished.
    pub fn mark_started(&self) -> Result<()> {
        let mut state = self.lock();
        if state.finished {
            anyhow::bail!(DoxgenError::OutputBuffer(
                "cannot start a buffer that is already finished".to_string()
            ));
        }
        state.started = true;
        Ok(())
    }

    /// Appends one line of process output.
    ///
    /// # Errors
    ///
    /// Returns `DoxgenError::OutputBuffer` if the buffer is not started or is already finished.
    pub fn append_line(&self, line: impl Into<String>) -> Result<()> {
        let line = line.into();
        let mut state = self.lock();
        if !state.started {
            anyhow::bail!(DoxgenError::OutputBuffer(
                "append before the buffer was started".to_string()
            ));
        }
        if state.finished {
            anyhow::bail!(DoxgenError::OutputBuffer(
                "append after the buffer was finished".to_string()
            ));
        }
        state.lines.push(line);
        Ok(())
    }

    /// Closes the buffer. No appends are accepted afterwards.
    pub fn mark_finished(&self) {
        self.lock().finished = true;
    }

    /// Returns a copy of every line appended so far, in append order.
    pub fn read_all(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    pub fn is_started(&self) -> bool {
        self.lock().started
    }

    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    pub fn len(&self) -> usize {
        self.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! # doxgen Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! This module runs external programs and keeps their output for later
//! inspection. It knows nothing about Doxygen. `core::generation` builds on it.
//!
//! ## Architecture
//!
//! - **`buffer`**: `OutputBuffer`, the line log shared between the pipe readers
//!   and whoever wants to look at the output.
//! - **`runner`**: `ProcessRunner`, a single-use, blocking execution that fills an
//!   `OutputBuffer` and reports the exit code through a completion callback.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{OutputBuffer, ProcessRunner};
//! use std::sync::Arc;
//!
//! let buffer = Arc::new(OutputBuffer::new());
//! let runner = ProcessRunner::new("/usr/bin/doxygen", ["Doxyfile"], Arc::clone(&buffer), |code| {
//!     tracing::info!("doxygen exited with {}", code);
//!     Ok(())
//! });
//! let handle = std::thread::spawn(move || runner.run());
//! // ... later
//! let lines = buffer.read_all();
//! ```
//!

/// Thread-safe, append-only line buffer for process output.
pub mod buffer;
/// Blocking, single-use execution of an external program.
pub mod runner;

pub use buffer::OutputBuffer;
pub use runner::ProcessRunner;

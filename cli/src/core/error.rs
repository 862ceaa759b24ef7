//! # doxgen Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared by the process execution core
//! and the command layer.
//!
//! ## Architecture
//!
//! The error system consists of two parts:
//! - `DoxgenError`: a `thiserror` enum naming the failure classes doxgen distinguishes
//! - `Result<T>`: an alias for `anyhow::Result<T>` so callers can attach context freely
//!
//! The variants map onto the failure classes of a generation run:
//! - Configuration errors (bad config values, missing directories) are caught before a run starts
//! - `ExecutableNotFound` is raised by the runner itself before it touches the output buffer
//! - `Spawn` covers an executable that exists but cannot be started
//! - `Worker` covers a worker thread that ended abnormally
//!
//! A nonzero exit code from Doxygen is *not* an error here. It is recorded as
//! data on the run and reported by the caller.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed error through anyhow
//! if !path.is_file() {
//!     anyhow::bail!(DoxgenError::ExecutableNotFound { path: path.to_path_buf() });
//! }
//!
//! // Check for a specific variant further up
//! let missing = err
//!     .downcast_ref::<DoxgenError>()
//!     .is_some_and(|e| matches!(e, DoxgenError::ExecutableNotFound { .. }));
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for doxgen.
#[derive(Error, Debug)]
pub enum DoxgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Executable not found or not executable: {}", path.display())]
    ExecutableNotFound { path: PathBuf },

    #[error("Failed to start '{}'", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output buffer error: {0}")]
    OutputBuffer(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Worker thread '{name}' terminated abnormally: {reason}")]
    Worker { name: String, reason: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

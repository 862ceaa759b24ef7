//! # doxgen Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach path context to every error:
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, rejecting paths that exist as files.
//! - **`read_file_to_string`**: read a whole text file.
//! - **`write_string_to_file`**: write (and overwrite) a text file, creating parent directories.
//! - **`write_lines_to_file`**: write one line per entry, newline-terminated. Used
//!   for the generation log, which must fully replace any earlier log.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&output_dir.join("html"))?;
//! let template = io::read_file_to_string(&template_path)?;
//! io::write_string_to_file(&output_dir.join("Doxyfile"), &rendered)?;
//! io::write_lines_to_file(&output_dir.join("Log.txt"), &buffer.read_all())?;
//! ```
//!
use crate::core::error::{DoxgenError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`, creating it and its parents if needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DoxgenError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, replacing any existing file.
///
/// The parent directory is created first if it does not exist.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Writes each entry of `lines` followed by a newline, replacing any existing file.
pub fn write_lines_to_file(path: &Path, lines: &[String]) -> Result<()> {
    let capacity = lines.iter().map(|l| l.len() + 1).sum();
    let mut content = String::with_capacity(capacity);
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    write_string_to_file(path, &content)
}

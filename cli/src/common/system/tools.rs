//! # doxgen External Tool Helpers
//!
//! File: cli/src/common/system/tools.rs
//!
//! ## Overview
//!
//! Small helpers for dealing with external executables:
//! - `is_executable` answers whether a path is a regular file the OS can run.
//!   The process runner uses it to fail fast before touching its output buffer.
//! - `find_doxygen` searches `PATH` for `doxygen` with the `which` crate.
//! - `open_path` launches the platform opener (`open`, `xdg-open`, `start`) so the
//!   CLI can show generated HTML or the log in the user's viewer.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Name of the Doxygen executable looked up on `PATH`.
pub const DOXYGEN_BINARY: &str = "doxygen";

/// Returns true if `path` is an existing regular file that can be executed.
///
/// On Unix this requires at least one execute permission bit. Other platforms
/// only check that the file exists.
pub fn is_executable(path: &Path) -> bool {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Searches `PATH` for the Doxygen executable.
pub fn find_doxygen() -> Option<PathBuf> {
    match which::which(DOXYGEN_BINARY) {
        Ok(path) => {
            debug!("Found {} on PATH at {}", DOXYGEN_BINARY, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("{} not found on PATH: {}", DOXYGEN_BINARY, e);
            None
        }
    }
}

/// Opens a file or directory with the platform's default handler.
///
/// The opener is spawned detached; doxgen does not wait for the viewer.
pub fn open_path(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    info!("Opening {}", path.display());
    command
        .spawn()
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(())
}

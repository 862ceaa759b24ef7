//! # doxgen Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! File copies used when staging static assets (stylesheets) into a Doxygen
//! output directory. Doxygen may delete or rewrite these files while it runs,
//! so staging has to be repeatable: every copy overwrites its target.
//!
//! ## Architecture
//!
//! `copy_file_overwrite` delegates to `fs_extra::file::copy` with
//! `overwrite = true` and creates the target's parent directory first.
//! `fs_extra` errors are wrapped with the source and target paths.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use anyhow::anyhow;
use std::path::Path;
use tracing::debug;

/// Copies `source` to `target`, replacing `target` if it exists.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an `Err` if the source is missing, the target's parent directory
/// cannot be created, or the copy itself fails.
pub fn copy_file_overwrite(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)?;
    }

    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;

    let bytes = fs_extra::file::copy(source, target, &options).map_err(|e| {
        anyhow!(e).context(format!("Failed to copy {:?} to {:?}", source, target))
    })?;
    debug!("Copied {:?} to {:?} ({} bytes)", source, target, bytes);
    Ok(bytes)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_creates_parent_directory() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("awesome.css");
        fs::write(&source, "body { margin: 0; }")?;
        let target = dir.path().join("out/html/awesome.css");

        let bytes = copy_file_overwrite(&source, &target)?;
        assert_eq!(bytes, "body { margin: 0; }".len() as u64);
        assert_eq!(fs::read_to_string(&target)?, "body { margin: 0; }");
        Ok(())
    }

    #[test]
    fn test_copy_overwrites_modified_target() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("awesome.css");
        let target = dir.path().join("html/awesome.css");
        fs::write(&source, "original")?;
        copy_file_overwrite(&source, &target)?;

        fs::write(&target, "clobbered by the generator")?;
        copy_file_overwrite(&source, &target)?;
        assert_eq!(fs::read_to_string(&target)?, "original");
        Ok(())
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = copy_file_overwrite(&dir.path().join("nope.css"), &dir.path().join("x.css"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to copy"));
    }
}

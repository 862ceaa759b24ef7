//! # doxgen Asset Staging
//!
//! File: cli/src/core/staging.rs
//!
//! ## Overview
//!
//! Copies static assets (stylesheets) into a Doxygen output directory. Doxygen
//! cleans parts of its HTML output while it runs, so a generation run stages
//! assets once before starting the tool and again after it exits.
//!
//! ## Architecture
//!
//! - `StagedAsset` is a source/destination pair. Staging always overwrites.
//! - `discover_stylesheets` lists `<assets>/stylesheets/*.css` (top level only,
//!   hidden files skipped, sorted by file name) and maps each one into the
//!   HTML output directory.
//!
use crate::common::fs::copy;
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Subdirectory of the assets directory holding stylesheets.
pub const STYLESHEETS_DIR: &str = "stylesheets";

/// A file copied into the output directory around each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAsset {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl StagedAsset {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Copies the asset, replacing whatever is at the destination.
    pub fn stage(&self) -> Result<()> {
        copy::copy_file_overwrite(&self.source, &self.destination)?;
        Ok(())
    }
}

/// Stages every asset in order, stopping at the first failure.
pub fn stage_all(assets: &[StagedAsset]) -> Result<()> {
    for asset in assets {
        asset.stage()?;
    }
    if !assets.is_empty() {
        info!("Staged {} asset(s)", assets.len());
    }
    Ok(())
}

/// Finds the stylesheets under `assets_dir` and maps them into `html_dir`.
///
/// A missing `stylesheets` directory yields an empty list.
pub fn discover_stylesheets(assets_dir: &Path, html_dir: &Path) -> Result<Vec<StagedAsset>> {
    let dir = assets_dir.join(STYLESHEETS_DIR);
    if !dir.is_dir() {
        debug!("No stylesheet directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !entry.file_type().is_file() || !is_stylesheet(entry.path()) {
            continue;
        }
        assets.push(StagedAsset::new(entry.path(), html_dir.join(entry.file_name())));
    }
    debug!("Discovered {} stylesheet(s) in {}", assets.len(), dir.display());
    Ok(assets)
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
}

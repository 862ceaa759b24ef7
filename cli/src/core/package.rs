//! # doxgen Package Manifests
//!
//! File: cli/src/core/package.rs
//!
//! ## Overview
//!
//! Reads the project metadata `doxgen config import` copies into a profile.
//!
//! Only `package.json` is understood: `displayName` (falling back to `name`)
//! becomes the project name and `version` the project number.
//!
use crate::core::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const MANIFEST_FILENAME: &str = "package.json";

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackageManifest {
    pub fn project_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Parses `<dir>/package.json`. `Ok(None)` when the file does not exist.
pub fn read_manifest(dir: &Path) -> Result<Option<PackageManifest>> {
    let path = dir.join(MANIFEST_FILENAME);
    if !path.is_file() {
        debug!("No {} in {}", MANIFEST_FILENAME, dir.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(Some(manifest))
}

//! # doxgen Generation Plans
//!
//! File: cli/src/core/plan.rs
//!
//! A `GenerationPlan` is a profile resolved against the filesystem: both
//! directories exist and are absolute, and every metadata field has a value.
//! Plans are built by the CLI before anything is started, so configuration
//! problems surface as `DoxgenError::Config` without touching any run.
//!
use crate::core::config::ProfileConfig;
use crate::core::error::{DoxgenError, Result};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};

/// Everything needed to prepare one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub profile: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `PROJECT_NAME`; the profile name when not configured.
    pub project_name: String,
    pub synopsis: String,
    pub version: String,
    pub assets_dir: Option<PathBuf>,
}

impl GenerationPlan {
    pub fn from_profile(
        name: &str,
        profile: &ProfileConfig,
        assets_dir: Option<&Path>,
    ) -> Result<Self> {
        let input = profile.input_dir().ok_or_else(|| {
            anyhow!(DoxgenError::Config(format!(
                "Profile '{}' has no input directory (profiles.{}.input).",
                name, name
            )))
        })?;
        let output = profile.output_dir().ok_or_else(|| {
            anyhow!(DoxgenError::Config(format!(
                "Profile '{}' has no output directory (profiles.{}.output).",
                name, name
            )))
        })?;

        Ok(Self {
            profile: name.to_string(),
            input_dir: existing_dir(name, "Input", &input)?,
            output_dir: existing_dir(name, "Output", &output)?,
            project_name: profile
                .project
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| name.to_string()),
            synopsis: profile.synopsis.clone().unwrap_or_default(),
            version: profile.version.clone().unwrap_or_default(),
            assets_dir: assets_dir.map(Path::to_path_buf),
        })
    }

    /// Directory Doxygen writes the HTML output into.
    pub fn html_dir(&self) -> PathBuf {
        self.output_dir.join("html")
    }
}

fn existing_dir(profile: &str, label: &str, dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!(DoxgenError::Config(format!(
            "{} directory for profile '{}' does not exist: {}",
            label,
            profile,
            dir.display()
        )));
    }
    dir.canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))
}

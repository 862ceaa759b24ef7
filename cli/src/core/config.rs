//! # doxgen Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the doxgen configuration.
//! The configuration is a plain struct handed to the commands; nothing here is
//! global or cached between runs.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.doxgen.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User config file: `--config <path>` / `DOXGEN_CONFIG`, or the platform
//!    config directory (e.g. `~/.config/doxgen/config.toml`)
//! 3. Built-in defaults (everything unset)
//!
//! Project values override user values field by field, and profiles are merged
//! by name. `~` is expanded in every path-like value.
//!
//! ## File Format
//!
//! ```toml
//! [doxygen]
//! path = "/usr/local/bin/doxygen"    # optional, looked up on PATH otherwise
//!
//! [assets]
//! directory = "~/.config/doxgen/assets"  # optional: Doxyfile.tera + stylesheets/*.css
//!
//! [profiles.api]
//! input = "~/src/mylib"
//! output = "~/docs/mylib"
//! project = "My Library"
//! synopsis = "Public API reference"
//! version = "1.4.0"
//! ```
//!
//! `doxgen config set` writes these files through `core::settings`.
//!
use crate::common::system::tools;
use crate::core::error::{DoxgenError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".doxgen.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub doxygen: DoxygenConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Generation profiles keyed by name. Each profile is one input/output pair.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// Location of the Doxygen executable.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DoxygenConfig {
    pub path: Option<String>,
}

/// Directory holding the Doxyfile template and stylesheets to stage.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    pub directory: Option<String>,
}

/// One documentation target: where the sources are, where the docs go, and
/// the project metadata written into the Doxyfile.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub project: Option<String>,
    pub synopsis: Option<String>,
    pub version: Option<String>,
}

impl Config {
    /// The configured Doxygen executable, or `doxygen` found on `PATH`.
    pub fn doxygen_executable(&self) -> Option<PathBuf> {
        match &self.doxygen.path {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => tools::find_doxygen(),
        }
    }

    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.assets
            .directory
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
    }

    /// Looks up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&ProfileConfig> {
        self.profiles.get(name).ok_or_else(|| {
            anyhow!(DoxgenError::Config(format!(
                "Profile '{}' is not defined. Define it with `doxgen config set profiles.{}.input <dir>`.",
                name, name
            )))
        })
    }
}

impl ProfileConfig {
    pub fn input_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.input)
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.output)
    }
}

fn non_empty_path(value: &Option<String>) -> Option<PathBuf> {
    value.as_deref().filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// The default user configuration file for this platform.
pub fn default_user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "doxgen", "doxgen").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads the effective configuration.
///
/// `user_config` replaces the platform default user config location when given.
pub fn load_config(user_config: Option<&Path>) -> Result<Config> {
    let user = load_user_config(user_config)?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project = match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!(
                "No project configuration file ({}) found in current directory or ancestors.",
                PROJECT_CONFIG_FILENAME
            );
            None
        }
    };

    let mut merged = merge_configs(user.unwrap_or_default(), project);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config(override_path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => match default_user_config_path() {
            Some(path) => path,
            None => {
                warn!("Could not determine user config directory.");
                return Ok(None);
            }
        },
    };

    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.doxgen.toml`.
///
/// Stops at the first directory that contains `.git`.
pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };

    let mut profiles = user.profiles;
    for (name, overlay) in project.profiles {
        let base = profiles.remove(&name).unwrap_or_default();
        profiles.insert(
            name,
            ProfileConfig {
                input: overlay.input.or(base.input),
                output: overlay.output.or(base.output),
                project: overlay.project.or(base.project),
                synopsis: overlay.synopsis.or(base.synopsis),
                version: overlay.version.or(base.version),
            },
        );
    }

    Config {
        doxygen: DoxygenConfig {
            path: project.doxygen.path.or(user.doxygen.path),
        },
        assets: AssetsConfig {
            directory: project.assets.directory.or(user.assets.directory),
        },
        profiles,
    }
}

fn expand(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        *v = shellexpand::tilde(v.as_str()).into_owned();
    }
}

fn expand_config_paths(config: &mut Config) {
    expand(&mut config.doxygen.path);
    expand(&mut config.assets.directory);
    for (name, profile) in config.profiles.iter_mut() {
        expand(&mut profile.input);
        expand(&mut profile.output);
        debug!(
            "Expanded profile '{}': input={:?} output={:?}",
            name, profile.input, profile.output
        );
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(assets) = config.assets_dir() {
        if assets.exists() && !assets.is_dir() {
            anyhow::bail!(DoxgenError::Config(format!(
                "Configured assets path '{}' exists but is not a directory.",
                assets.display()
            )));
        }
    }
    for (name, profile) in &config.profiles {
        if name.is_empty() || name.contains('.') {
            anyhow::bail!(DoxgenError::Config(format!(
                "Invalid profile name '{}': names must be non-empty and contain no '.'.",
                name
            )));
        }
        if profile.input.as_deref() == Some("") {
            anyhow::bail!(DoxgenError::Config(format!(
                "Profile '{}' has an empty input directory.",
                name
            )));
        }
        if profile.output.as_deref() == Some("") {
            anyhow::bail!(DoxgenError::Config(format!(
                "Profile '{}' has an empty output directory.",
                name
            )));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [doxygen]
            path = "/opt/doxygen/bin/doxygen"

            [profiles.api]
            input = "~/src/lib"
            output = "/srv/docs/api"
            project = "My Library"
            version = "1.4.0"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");
        assert_eq!(
            config.doxygen.path.as_deref(),
            Some("/opt/doxygen/bin/doxygen")
        );
        assert_eq!(config.assets, AssetsConfig::default());
        let api = &config.profiles["api"];
        assert_eq!(api.input.as_deref(), Some("~/src/lib")); // Not yet expanded
        assert_eq!(api.project.as_deref(), Some("My Library"));
        assert_eq!(api.synopsis, None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[doxygen]\nbinary = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_overrides_per_field() {
        let mut user = Config::default();
        user.doxygen.path = Some("/usr/bin/doxygen".into());
        user.profiles.insert(
            "api".into(),
            ProfileConfig {
                input: Some("/user/src".into()),
                output: Some("/user/docs".into()),
                project: Some("User Name".into()),
                ..Default::default()
            },
        );
        user.profiles.insert("other".into(), ProfileConfig::default());

        let mut project = Config::default();
        project.profiles.insert(
            "api".into(),
            ProfileConfig {
                output: Some("/project/docs".into()),
                version: Some("2.0".into()),
                ..Default::default()
            },
        );

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.doxygen.path.as_deref(), Some("/usr/bin/doxygen"));
        let api = &merged.profiles["api"];
        assert_eq!(api.input.as_deref(), Some("/user/src"));
        assert_eq!(api.output.as_deref(), Some("/project/docs"));
        assert_eq!(api.project.as_deref(), Some("User Name"));
        assert_eq!(api.version.as_deref(), Some("2.0"));
        assert!(merged.profiles.contains_key("other"));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.assets.directory = Some("~/doxgen-assets".into());
        config.profiles.insert(
            "api".into(),
            ProfileConfig {
                input: Some("~/code".into()),
                output: Some("/absolute/docs".into()),
                project: Some("~not-a-path".into()),
                ..Default::default()
            },
        );

        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.assets.directory,
            Some(home_dir.join("doxgen-assets").to_string_lossy().into_owned())
        );
        let api = &config.profiles["api"];
        assert_eq!(
            api.input,
            Some(home_dir.join("code").to_string_lossy().into_owned())
        );
        assert_eq!(api.output.as_deref(), Some("/absolute/docs"));
        assert_eq!(api.project.as_deref(), Some("~not-a-path")); // Metadata is left alone
    }

    #[test]
    fn test_validate_rejects_dotted_profile_name() {
        let mut config = Config::default();
        config
            .profiles
            .insert("a.b".into(), ProfileConfig::default());
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid profile name"));
    }

    #[test]
    fn test_validate_rejects_empty_output() {
        let mut config = Config::default();
        config.profiles.insert(
            "api".into(),
            ProfileConfig {
                output: Some(String::new()),
                ..Default::default()
            },
        );
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_assets_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let mut config = Config::default();
        config.assets.directory = Some(file_path.to_string_lossy().to_string());
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();

        let found = find_project_config_path(&nested).unwrap();
        assert_eq!(found, root.path().join("a").join(PROJECT_CONFIG_FILENAME));
    }

    #[test]
    fn test_project_config_search_stops_at_git_root() {
        let root = tempdir().unwrap();
        let repo = root.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        // Above the repository root; must not be picked up.
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_missing_profile_is_config_error() {
        let config = Config::default();
        let err = config.profile("api").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DoxgenError>(),
            Some(DoxgenError::Config(_))
        ));
    }

    #[test]
    fn test_configured_doxygen_path_wins() {
        let mut config = Config::default();
        config.doxygen.path = Some("/custom/doxygen".into());
        assert_eq!(
            config.doxygen_executable(),
            Some(PathBuf::from("/custom/doxygen"))
        );
    }
}

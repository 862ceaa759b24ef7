//! # doxgen Settings Store
//!
//! File: cli/src/core/settings.rs
//!
//! ## Overview
//!
//! Key/value persistence for the values a user edits: the Doxygen path, the
//! assets directory and per-profile paths and metadata. Commands talk to the
//! `SettingsStore` trait; the TOML file store is the implementation used by
//! the CLI, writing the same files `core::config` reads.
//!
//! ## Keys
//!
//! | Key                               | Meaning                          |
//! |-----------------------------------|----------------------------------|
//! | `doxygen.path`                    | Doxygen executable               |
//! | `assets.directory`                | Doxyfile template + stylesheets  |
//! | `profiles.<name>.input`           | Source directory                 |
//! | `profiles.<name>.output`          | Documentation output directory   |
//! | `profiles.<name>.project`         | `PROJECT_NAME`                   |
//! | `profiles.<name>.synopsis`        | `PROJECT_BRIEF`                  |
//! | `profiles.<name>.version`         | `PROJECT_NUMBER`                 |
//!
//! Unknown keys are rejected, so a typo never lands in a file that
//! `core::config` would later refuse to parse.
//!
use crate::common::fs::io;
use crate::core::error::{DoxgenError, Result};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Persistent key/value settings.
pub trait SettingsStore {
    /// Reads a setting. `Ok(None)` means the key is valid but unset.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Writes a setting and persists it immediately.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Field of a profile addressable through the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Input,
    Output,
    Project,
    Synopsis,
    Version,
}

impl ProfileField {
    fn as_str(self) -> &'static str {
        match self {
            ProfileField::Input => "input",
            ProfileField::Output => "output",
            ProfileField::Project => "project",
            ProfileField::Synopsis => "synopsis",
            ProfileField::Version => "version",
        }
    }
}

/// A validated settings key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingKey {
    DoxygenPath,
    AssetsDirectory,
    Profile { name: String, field: ProfileField },
}

impl SettingKey {
    pub fn profile(name: impl Into<String>, field: ProfileField) -> Self {
        SettingKey::Profile {
            name: name.into(),
            field,
        }
    }

    /// Table path of the key inside the TOML document.
    fn segments(&self) -> Vec<&str> {
        match self {
            SettingKey::DoxygenPath => vec!["doxygen", "path"],
            SettingKey::AssetsDirectory => vec!["assets", "directory"],
            SettingKey::Profile { name, field } => vec!["profiles", name.as_str(), field.as_str()],
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments().join("."))
    }
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split('.').collect();
        let parsed = match parts.as_slice() {
            ["doxygen", "path"] => Some(SettingKey::DoxygenPath),
            ["assets", "directory"] => Some(SettingKey::AssetsDirectory),
            ["profiles", name, field] if !name.is_empty() => {
                let field = match *field {
                    "input" => Some(ProfileField::Input),
                    "output" => Some(ProfileField::Output),
                    "project" => Some(ProfileField::Project),
                    "synopsis" => Some(ProfileField::Synopsis),
                    "version" => Some(ProfileField::Version),
                    _ => None,
                };
                field.map(|field| SettingKey::profile(*name, field))
            }
            _ => None,
        };
        parsed.ok_or_else(|| {
            anyhow!(DoxgenError::Settings(format!(
                "Unknown setting '{}'. Expected doxygen.path, assets.directory or profiles.<name>.<input|output|project|synopsis|version>.",
                key
            )))
        })
    }
}

/// `SettingsStore` backed by a single TOML file.
///
/// The file is read once on `open` and rewritten on every `set`. A missing
/// file is treated as empty and created on the first write.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    table: toml::Table,
}

impl TomlFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = if path.is_file() {
            let content = io::read_file_to_string(&path)?;
            content
                .parse::<toml::Table>()
                .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?
        } else {
            debug!("Settings file {} does not exist yet", path.display());
            toml::Table::new()
        };
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.table)
            .with_context(|| format!("Failed to serialize settings for {}", self.path.display()))?;
        io::write_string_to_file(&self.path, &content)
    }
}

impl SettingsStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let key: SettingKey = key.parse()?;
        let segments = key.segments();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(None);
        };

        let mut table = &self.table;
        for segment in parents {
            match table.get(*segment).and_then(toml::Value::as_table) {
                Some(next) => table = next,
                None => return Ok(None),
            }
        }
        Ok(table
            .get(*last)
            .and_then(toml::Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key: SettingKey = key.parse()?;
        let segments = key.segments();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut table = &mut self.table;
        for segment in parents {
            table = table
                .entry(segment.to_string())
                .or_insert(toml::Value::Table(toml::Table::new()))
                .as_table_mut()
                .ok_or_else(|| {
                    anyhow!(DoxgenError::Settings(format!(
                        "'{}' in {} is not a table",
                        segment,
                        self.path.display()
                    )))
                })?;
        }
        table.insert(last.to_string(), toml::Value::String(value.to_string()));

        self.save()?;
        info!("Set {} = {:?} in {}", key, value, self.path.display());
        Ok(())
    }
}

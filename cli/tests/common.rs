//! # doxgen CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the real `doxgen` binary inside its own `TestEnv`: a temporary directory
//! that is both the working directory and a fake repository root (it holds a
//! `.git` directory, so the project config search never leaves it), with the
//! user config pinned to a file inside it via `--config`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `Command` for the `doxgen` binary built for this test run.
pub fn doxgen_cmd() -> Command {
    Command::cargo_bin("doxgen").expect("Failed to find doxgen binary for testing")
}

pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir(root.path().join(".git")).expect("Failed to create .git");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// The user config file passed with `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.root().join("user-config.toml")
    }

    /// `doxgen` running in this environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = doxgen_cmd();
        cmd.current_dir(self.root())
            .env_remove("DOXGEN_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Creates `rel` under the root and returns its absolute path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.root().join(rel);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Writes an executable shell script standing in for Doxygen.
    ///
    /// The script receives the rendered Doxyfile path as `$1`.
    #[cfg(unix)]
    pub fn fake_doxygen(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.mkdir("bin").join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }

    /// A profile section for the user config.
    pub fn profile_toml(name: &str, input: &Path, output: &Path) -> String {
        format!(
            "[profiles.{}]\ninput = {:?}\noutput = {:?}\n",
            name,
            input.display().to_string(),
            output.display().to_string()
        )
    }
}

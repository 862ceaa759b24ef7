//! # doxgen Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Everything a generation run needs apart from process execution itself,
//! which lives in `common::process`:
//!
//! - `config`: Configuration loading, merging, and validation
//! - `settings`: Key/value persistence behind `doxgen config get|set`
//! - `plan`: Resolves a configured profile into a `GenerationPlan`
//! - `doxyfile`: Renders the Doxyfile for a plan
//! - `staging`: Copies stylesheets into the output directory
//! - `generation`: Starts runs on worker threads and post-processes them
//! - `package`: Reads `package.json` metadata for `doxgen config import`
//! - `error`: Error types and the crate-wide `Result`
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::generation::GenerationOrchestrator;
//! use crate::core::plan::GenerationPlan;
//!
//! let cfg = config::load_config(None)?;
//! let plan = GenerationPlan::from_profile("api", cfg.profile("api")?, cfg.assets_dir().as_deref())?;
//! let orchestrator = GenerationOrchestrator::new();
//! let request = orchestrator.prepare(&plan, &doxygen)?;
//! let handle = orchestrator.start_generation(request)?;
//! ```
//!
pub mod config;
pub mod doxyfile;
pub mod error;
pub mod generation;
pub mod package;
pub mod plan;
pub mod settings;
pub mod staging;

//! # doxgen System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host-level checks that sit outside the process execution core: deciding
//! whether a path names something the OS can execute, and locating the Doxygen
//! executable when the configuration does not name one.
//!
//! ## Architecture
//!
//! - **`tools`**: `is_executable`, `find_doxygen`, and `open_path` (hand a file or
//!   directory to the platform's default opener).
//!
//! ```rust
//! use crate::common::system::tools;
//!
//! let doxygen = tools::find_doxygen().ok_or_else(|| anyhow::anyhow!("install doxygen"))?;
//! assert!(tools::is_executable(&doxygen));
//! ```
//!

/// Executable detection, Doxygen lookup and the platform opener.
pub mod tools;

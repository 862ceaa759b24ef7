//! # doxgen Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! - **`copy`**: Overwriting file copies through `fs_extra`, used for asset staging.
//! - **`io`**: `ensure_dir_exists`, `read_file_to_string`, `write_string_to_file`
//!   and `write_lines_to_file`.
//!
//! Import from the submodule, e.g. `use crate::common::fs::io::ensure_dir_exists;`.
//!

/// Overwriting file copies (`copy_file_overwrite`).
pub mod copy;
/// Basic file I/O (`ensure_dir_exists`, `write_lines_to_file`, ...).
pub mod io;

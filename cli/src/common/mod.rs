//! # doxgen Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks that know nothing about profiles or Doxyfiles:
//!
//! - **`fs`**: Directory creation, text file I/O and overwrite copies.
//! - **`process`**: The output buffer and the runner that executes an external program.
//! - **`system`**: Executable checks, `PATH` lookup and the platform opener.
//!
//! Command handlers and `core` import from the specific submodule:
//!
//! ```rust
//! use crate::common::fs::io;
//! use crate::common::process::{OutputBuffer, ProcessRunner};
//! use crate::common::system::tools;
//! ```
//!

/// Filesystem operations (I/O, overwrite copies).
pub mod fs;
/// External process execution and output capture.
pub mod process;
/// Executable checks and host integration.
pub mod system;

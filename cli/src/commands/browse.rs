//! # doxgen Browse Command
//!
//! File: cli/src/commands/browse.rs
//!
//! ## Overview
//!
//! `doxgen browse PROFILE` prints the entry page of a profile's generated HTML,
//! or opens it with `--open`. `--dir` targets the output directory instead.
//!
use crate::commands::{profile_output_dir, GlobalOptions};
use crate::common::system::tools;
use crate::core::error::{DoxgenError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Page opened for a generated profile.
const ENTRY_PAGE: &str = "annotated.html";

/// Arguments for `doxgen browse`.
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    profile: String,
    /// Open the target with the platform's default handler.
    #[arg(long)]
    open: bool,
    /// Target the output directory instead of the HTML entry page.
    #[arg(long)]
    dir: bool,
}

pub async fn handle_browse(args: BrowseArgs, globals: &GlobalOptions) -> Result<()> {
    let cfg = globals.load_config()?;
    let output_dir = profile_output_dir(&cfg, &args.profile)?;
    let target = browse_target(&output_dir, args.dir);
    if !target.exists() {
        anyhow::bail!(DoxgenError::FileSystem(format!(
            "{} does not exist. Run `doxgen generate {}` first.",
            target.display(),
            args.profile
        )));
    }

    if args.open {
        tools::open_path(&target)?;
    } else {
        println!("{}", target.display());
    }
    Ok(())
}

fn browse_target(output_dir: &Path, dir: bool) -> PathBuf {
    if dir {
        output_dir.to_path_buf()
    } else {
        output_dir.join("html").join(ENTRY_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_target() {
        let out = Path::new("/docs/api");
        assert_eq!(browse_target(out, false), PathBuf::from("/docs/api/html/annotated.html"));
        assert_eq!(browse_target(out, true), PathBuf::from("/docs/api"));
    }
}

//! # doxgen Doxyfile Rendering
//!
//! File: cli/src/core/doxyfile.rs
//!
//! ## Overview
//!
//! Produces the `Doxyfile` a generation run hands to Doxygen. The template is
//! either `<assets>/Doxyfile.tera` or the default bundled with doxgen.
//!
//! ## Architecture
//!
//! Rendering happens in two passes:
//! 1. The template is rendered with Tera using a `DoxyfileContext`
//!    (`project_name`, `synopsis`, `version`, `input_dir`, `output_dir`,
//!    `stylesheets`, `generated_at`).
//! 2. The options doxgen owns are pinned by rewriting their assignment lines
//!    (`set_option`). This keeps a plain Doxyfile produced by `doxygen -g`,
//!    which has no placeholders at all, usable as a template.
//!
//! Pinned options: `PROJECT_NAME`, `PROJECT_BRIEF`, `PROJECT_NUMBER`, `INPUT`,
//! `OUTPUT_DIRECTORY`, `HTML_EXTRA_STYLESHEET`.
//!
//! ## Examples
//!
//! ```text
//! PROJECT_NAME           =            (template line)
//! PROJECT_NAME           = "My Library"   (after pinning)
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{DoxgenError, Result};
use crate::core::plan::GenerationPlan;
use anyhow::anyhow;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info};

/// File name of a user-provided template inside the assets directory.
pub const TEMPLATE_FILENAME: &str = "Doxyfile.tera";
/// File name of the rendered configuration inside the output directory.
pub const DOXYFILE_NAME: &str = "Doxyfile";

const DEFAULT_TEMPLATE: &str = include_str!("../../assets/Doxyfile.tera");

// Doxygen aligns the '=' of every option at this column.
const OPTION_WIDTH: usize = 23;

/// Variables available to a Doxyfile template.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DoxyfileContext {
    pub project_name: String,
    pub synopsis: String,
    pub version: String,
    pub input_dir: String,
    pub output_dir: String,
    /// Staged stylesheet paths, in staging order.
    pub stylesheets: Vec<String>,
    pub generated_at: String,
}

impl DoxyfileContext {
    pub fn new(plan: &GenerationPlan, stylesheets: &[PathBuf]) -> Self {
        Self {
            project_name: plan.project_name.clone(),
            synopsis: plan.synopsis.clone(),
            version: plan.version.clone(),
            input_dir: plan.input_dir.display().to_string(),
            output_dir: plan.output_dir.display().to_string(),
            stylesheets: stylesheets
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn pinned_options(&self) -> [(&'static str, String); 6] {
        let stylesheets = self
            .stylesheets
            .iter()
            .map(|s| quote(s))
            .collect::<Vec<_>>()
            .join(" ");
        [
            ("PROJECT_NAME", quote(&self.project_name)),
            ("PROJECT_BRIEF", quote(&self.synopsis)),
            ("PROJECT_NUMBER", quote_if_needed(&self.version)),
            ("INPUT", quote(&self.input_dir)),
            ("OUTPUT_DIRECTORY", quote(&self.output_dir)),
            ("HTML_EXTRA_STYLESHEET", stylesheets),
        ]
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn quote_if_needed(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Returns the template text: `<assets_dir>/Doxyfile.tera` if it exists, else the bundled default.
pub fn load_template(assets_dir: Option<&Path>) -> Result<String> {
    if let Some(dir) = assets_dir {
        let custom = dir.join(TEMPLATE_FILENAME);
        if custom.is_file() {
            info!("Using Doxyfile template {}", custom.display());
            return io::read_file_to_string(&custom);
        }
        debug!("No {} in {}, using the bundled template", TEMPLATE_FILENAME, dir.display());
    }
    Ok(DEFAULT_TEMPLATE.to_string())
}

/// Renders `template` with `context` and pins the options doxgen owns.
pub fn render_doxyfile(template: &str, context: &DoxyfileContext) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(DoxgenError::Template { source: e })
            .context("Failed to create Tera context for the Doxyfile")
    })?;
    let mut rendered = Tera::one_off(template, &tera_context, false).map_err(|e| {
        anyhow!(DoxgenError::Template { source: e }).context("Tera rendering failed for the Doxyfile")
    })?;

    for (key, value) in context.pinned_options() {
        rendered = set_option(&rendered, key, &value);
    }
    Ok(rendered)
}

/// Renders the Doxyfile into `output_dir` and returns its path.
pub fn write_doxyfile(output_dir: &Path, template: &str, context: &DoxyfileContext) -> Result<PathBuf> {
    let rendered = render_doxyfile(template, context)?;
    let path = output_dir.join(DOXYFILE_NAME);
    io::write_string_to_file(&path, &rendered)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Sets `key` to `value` in Doxyfile text.
///
/// Every `KEY = ...` assignment of `key` (including its `\` continuation lines)
/// is replaced by a single assignment. `KEY += ...` lines are dropped too, since
/// they would append to the pinned value. If the key is absent it is appended.
pub fn set_option(text: &str, key: &str, value: &str) -> String {
    let assignment = if value.is_empty() {
        format!("{:<width$}=", key, width = OPTION_WIDTH)
    } else {
        format!("{:<width$}= {}", key, value, width = OPTION_WIDTH)
    };

    let mut output = Vec::new();
    let mut replaced = false;
    let mut skipping_continuation = false;
    for line in text.lines() {
        if skipping_continuation {
            skipping_continuation = line.trim_end().ends_with('\\');
            continue;
        }
        if assigns(line, key) {
            skipping_continuation = line.trim_end().ends_with('\\');
            if !replaced {
                output.push(assignment.clone());
                replaced = true;
            }
            continue;
        }
        output.push(line.to_string());
    }
    if !replaced {
        output.push(assignment);
    }

    let mut result = output.join("\n");
    result.push('\n');
    result
}

fn assigns(line: &str, key: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return false;
    }
    match trimmed.strip_prefix(key) {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.starts_with('=') || rest.starts_with("+=")
        }
        None => false,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn context() -> DoxyfileContext {
        DoxyfileContext {
            project_name: "My Library".into(),
            synopsis: "Public API".into(),
            version: "1.4.0".into(),
            input_dir: "/src/lib".into(),
            output_dir: "/docs/lib".into(),
            stylesheets: vec![
                "/docs/lib/html/awesome.css".into(),
                "/docs/lib/html/sidebar.css".into(),
            ],
            generated_at: "2024-01-01 00:00:00".into(),
        }
    }

    #[test]
    fn test_set_option_replaces_existing_line() {
        let text = "PROJECT_NAME           =\nPROJECT_NUMBER         =\n";
        let result = set_option(text, "PROJECT_NAME", "\"Demo\"");
        assert_eq!(
            result,
            "PROJECT_NAME           = \"Demo\"\nPROJECT_NUMBER         =\n"
        );
    }

    #[test]
    fn test_set_option_does_not_match_longer_keys() {
        let text = "INPUT_ENCODING         = UTF-8\nINPUT                  = old\n";
        let result = set_option(text, "INPUT", "\"/src\"");
        assert!(result.contains("INPUT_ENCODING         = UTF-8"));
        assert!(result.contains("INPUT                  = \"/src\""));
        assert!(!result.contains("old"));
    }

    #[test]
    fn test_set_option_drops_continuations_and_appends() {
        let text = "INPUT = a \\\n        b \\\n        c\nINPUT += d\nRECURSIVE = YES\n";
        let result = set_option(text, "INPUT", "\"/src\"");
        assert_eq!(
            result,
            "INPUT                  = \"/src\"\nRECURSIVE = YES\n"
        );
    }

    #[test]
    fn test_set_option_ignores_comments_and_appends_missing_key() {
        let text = "# PROJECT_BRIEF = commented out\nQUIET = NO\n";
        let result = set_option(text, "PROJECT_BRIEF", "\"Brief\"");
        assert!(result.starts_with("# PROJECT_BRIEF = commented out\n"));
        assert!(result.ends_with("PROJECT_BRIEF          = \"Brief\"\n"));
    }

    #[test]
    fn test_render_bundled_template() -> Result<()> {
        let rendered = render_doxyfile(DEFAULT_TEMPLATE, &context())?;
        assert!(rendered.contains("PROJECT_NAME           = \"My Library\""));
        assert!(rendered.contains("PROJECT_BRIEF          = \"Public API\""));
        assert!(rendered.contains("PROJECT_NUMBER         = 1.4.0"));
        assert!(rendered.contains("INPUT                  = \"/src/lib\""));
        assert!(rendered.contains("OUTPUT_DIRECTORY       = \"/docs/lib\""));
        assert!(rendered.contains(
            "HTML_EXTRA_STYLESHEET  = \"/docs/lib/html/awesome.css\" \"/docs/lib/html/sidebar.css\""
        ));
        assert!(rendered.contains("2024-01-01 00:00:00"));
        assert_eq!(rendered.matches("PROJECT_NAME ").count(), 1);
        Ok(())
    }

    #[test]
    fn test_stock_doxyfile_without_placeholders() -> Result<()> {
        // What `doxygen -g` produces for these keys.
        let stock = "PROJECT_NAME           = \"My Project\"\nPROJECT_NUMBER         =\nINPUT                  =\nGENERATE_LATEX         = YES\n";
        let rendered = render_doxyfile(stock, &context())?;
        assert!(rendered.contains("PROJECT_NAME           = \"My Library\""));
        assert!(rendered.contains("INPUT                  = \"/src/lib\""));
        assert!(rendered.contains("GENERATE_LATEX         = YES"));
        assert!(rendered.contains("OUTPUT_DIRECTORY       = \"/docs/lib\""));
        Ok(())
    }

    #[test]
    fn test_values_with_quotes_are_escaped() -> Result<()> {
        let mut ctx = context();
        ctx.project_name = "The \"Best\" Library".into();
        ctx.version = "1.0 beta".into();
        ctx.stylesheets.clear();
        let rendered = render_doxyfile(DEFAULT_TEMPLATE, &ctx)?;
        assert!(rendered.contains(r#"PROJECT_NAME           = "The \"Best\" Library""#));
        assert!(rendered.contains("PROJECT_NUMBER         = \"1.0 beta\""));
        assert!(rendered.contains("HTML_EXTRA_STYLESHEET  =\n"));
        Ok(())
    }

    #[test]
    fn test_invalid_template_syntax() {
        let result = render_doxyfile("PROJECT_NAME = {{ project_name", &context());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Tera rendering failed"));
    }

    #[test]
    fn test_custom_template_is_preferred() -> Result<()> {
        let assets = tempdir()?;
        std::fs::write(assets.path().join(TEMPLATE_FILENAME), "CUSTOM = {{ version }}\n")?;
        let template = load_template(Some(assets.path()))?;
        assert_eq!(template, "CUSTOM = {{ version }}\n");

        let empty = tempdir()?;
        assert_eq!(load_template(Some(empty.path()))?, DEFAULT_TEMPLATE);
        assert_eq!(load_template(None)?, DEFAULT_TEMPLATE);
        Ok(())
    }

    #[test]
    fn test_write_doxyfile_into_output_dir() -> Result<()> {
        let out = tempdir()?;
        let path = write_doxyfile(out.path(), DEFAULT_TEMPLATE, &context())?;
        assert_eq!(path, out.path().join(DOXYFILE_NAME));
        assert!(io::read_file_to_string(&path)?.contains("GENERATE_HTML          = YES"));
        Ok(())
    }
}

use crate::error::{Result, SsotError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DOCS_DIR: &str = "docs";
pub const SITE_OUT_DIR: &str = "build/site";

pub const CONFIG_FILE: &str = "ssot.yaml";
pub const README_MD: &str = "README.md";
pub const AGENTS_MD: &str = "AGENTS.md";

pub const MARKDOWN_EXT: &str = ".md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Join `rel` onto `root` unless it is already absolute.
pub fn resolve_under(root: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// Render `path` relative to `root` with forward slashes, falling back to
/// the full path when it lies outside `root`.
pub fn display_relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(MARKDOWN_EXT))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Field name validation
// ---------------------------------------------------------------------------

static FIELD_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn field_name_re() -> &'static Regex {
    FIELD_NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").unwrap())
}

pub fn validate_field_name(name: &str) -> Result<()> {
    if field_name_re().is_match(name) {
        Ok(())
    } else {
        Err(SsotError::InvalidFieldName(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

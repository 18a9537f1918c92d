use crate::discover::discover_markdown;
use crate::error::{Result, SsotError};
use crate::frontmatter::Frontmatter;
use crate::paths;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// Something wrong with a single document. Problems are collected, never
/// raised, so one bad file cannot hide the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// No well-formed frontmatter block. Field checks are skipped.
    MissingFrontmatter,
    MissingField { field: String },
    Unreadable { reason: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::MissingFrontmatter => write!(f, "missing frontmatter block"),
            Problem::MissingField { field } => write!(f, "missing required field '{field}'"),
            Problem::Unreadable { reason } => write!(f, "failed to read file: {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Path relative to the root, `/`-separated.
    pub path: String,
    pub problems: Vec<Problem>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: Vec<FileReport>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileReport::is_ok)
    }

    pub fn problem_count(&self) -> usize {
        self.files.iter().map(|f| f.problems.len()).sum()
    }

    pub fn failing_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.is_ok())
    }
}

// ---------------------------------------------------------------------------
// Checking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Directory to scan; relative paths resolve against the root.
    pub docs_dir: PathBuf,
    pub required_fields: Vec<String>,
}

impl CheckOptions {
    /// Reject field sets that could never be matched or would pass everything.
    pub fn validate(&self) -> Result<()> {
        if self.required_fields.is_empty() {
            return Err(SsotError::EmptyFieldSet);
        }
        for field in &self.required_fields {
            paths::validate_field_name(field)?;
        }
        Ok(())
    }
}

/// Problems in one document's text.
pub fn check_document(content: &str, required_fields: &[String]) -> Vec<Problem> {
    match Frontmatter::parse(content) {
        None => vec![Problem::MissingFrontmatter],
        Some(fm) => fm
            .missing(required_fields)
            .into_iter()
            .map(|field| Problem::MissingField {
                field: field.to_string(),
            })
            .collect(),
    }
}

/// Check every Markdown file under the docs directory.
///
/// Only configuration failures (bad options, missing docs directory) are
/// returned as errors. Per-file trouble, unreadable files included, lands
/// in the report.
pub fn check_tree(root: &Path, opts: &CheckOptions) -> Result<Report> {
    opts.validate()?;
    let dir = paths::resolve_under(root, &opts.docs_dir);
    let discovery = discover_markdown(&dir)?;

    let mut files: Vec<FileReport> = discovery
        .unreadable
        .into_iter()
        .map(|(path, reason)| FileReport {
            path: paths::display_relative(root, &path),
            problems: vec![Problem::Unreadable { reason }],
        })
        .collect();

    for path in &discovery.documents {
        // Delimiters and keys are ASCII, so stray non-UTF-8 bytes elsewhere
        // must not fail the document.
        let problems = match std::fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                check_document(&content, &opts.required_fields)
            }
            Err(e) => vec![Problem::Unreadable {
                reason: e.to_string(),
            }],
        };
        debug!(path = %path.display(), problems = problems.len(), "checked");
        files.push(FileReport {
            path: paths::display_relative(root, path),
            problems,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    let report = Report { files };
    info!(
        files = report.files.len(),
        problems = report.problem_count(),
        "frontmatter check complete"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

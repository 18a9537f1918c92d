//! Staging of root-level Markdown into the docs site tree.
//!
//! Pages such as `README.md` live at the repository root but are published
//! next to `docs/`. Rather than keeping wrapper copies inside `docs/`, each
//! page is copied into an output directory with its relative links
//! rewritten for the published layout.

use crate::config::{Rewrite, SiteConfig};
use crate::error::{Result, SsotError};
use crate::io::atomic_write;
use crate::paths;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedPage {
    pub target: String,
    pub source: String,
    pub bytes: usize,
    /// False in dry-run mode.
    pub written: bool,
}

/// Apply `rewrites` in order as plain substring replacements. Empty `from`
/// patterns are skipped.
pub fn rewrite_links(content: &str, rewrites: &[Rewrite]) -> String {
    rewrites
        .iter()
        .filter(|r| !r.from.is_empty())
        .fold(content.to_string(), |acc, r| acc.replace(&r.from, &r.to))
}

fn validate_target(target: &str) -> Result<()> {
    let path = Path::new(target);
    let ok = !target.is_empty()
        && !target.contains('\0')
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if ok {
        Ok(())
    } else {
        Err(SsotError::InvalidTarget(target.to_string()))
    }
}

/// Copy every configured page into `out_dir` (relative paths resolve
/// against `root`).
///
/// All targets and sources are checked before anything is written, so a
/// bad table leaves the output directory untouched.
pub fn stage(
    root: &Path,
    site: &SiteConfig,
    out_dir: &Path,
    dry_run: bool,
) -> Result<Vec<StagedPage>> {
    let out_dir = paths::resolve_under(root, out_dir);

    let mut sources: Vec<PathBuf> = Vec::with_capacity(site.pages.len());
    for page in &site.pages {
        validate_target(&page.target)?;
        let source = root.join(&page.source);
        if !source.is_file() {
            return Err(SsotError::SourceNotFound(source));
        }
        sources.push(source);
    }

    let mut staged = Vec::with_capacity(site.pages.len());
    for (page, source) in site.pages.iter().zip(sources) {
        let text = std::fs::read_to_string(&source)?;
        let text = rewrite_links(&text, &page.rewrites);
        if !dry_run {
            atomic_write(&out_dir.join(&page.target), text.as_bytes())?;
            info!(page = %page.target, source = %page.source, "staged page");
        }
        staged.push(StagedPage {
            target: page.target.clone(),
            source: page.source.clone(),
            bytes: text.len(),
            written: !dry_run,
        });
    }

    Ok(staged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

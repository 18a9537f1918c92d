use crate::error::{Result, SsotError};
use crate::paths;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Outcome of walking a docs directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Markdown files, sorted by path.
    pub documents: Vec<PathBuf>,
    /// Entries the walk could not descend into or stat, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Recursively find every `*.md` file under `dir`.
///
/// A missing `dir` is an error; an existing but empty one is not. Symlinked
/// directories are not followed. Symlinked files are kept so a dangling link
/// shows up as an unreadable document rather than vanishing.
pub fn discover_markdown(dir: &Path) -> Result<Discovery> {
    if !dir.is_dir() {
        return Err(SsotError::DocsDirNotFound(dir.to_path_buf()));
    }

    let mut discovery = Discovery::default();
    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf());
                warn!(path = %path.display(), "failed to read directory entry: {err}");
                discovery.unreadable.push((path, err.to_string()));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if paths::is_markdown(entry.path()) {
            discovery.documents.push(entry.into_path());
        }
    }

    discovery.documents.sort();
    discovery.unreadable.sort();
    debug!(
        dir = %dir.display(),
        documents = discovery.documents.len(),
        unreadable = discovery.unreadable.len(),
        "discovered markdown"
    );
    Ok(discovery)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

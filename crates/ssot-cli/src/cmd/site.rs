use crate::output::print_json;
use anyhow::Context;
use ssot_core::config::Config;
use ssot_core::site;
use std::path::{Path, PathBuf};

pub fn run(root: &Path, out: Option<PathBuf>, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load ssot.yaml")?;
    let out_dir = out.unwrap_or_else(|| PathBuf::from(&config.site.out_dir));

    let staged = site::stage(root, &config.site, &out_dir, dry_run)
        .with_context(|| format!("failed to stage site into {}", out_dir.display()))?;

    if json {
        print_json(&staged)?;
        return Ok(());
    }

    let verb = if dry_run { "Would stage" } else { "Staged" };
    for page in &staged {
        println!("{verb} {} <- {}", page.target, page.source);
    }
    if staged.is_empty() {
        println!("No pages configured.");
    }
    Ok(())
}

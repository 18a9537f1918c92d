use crate::output::print_json;
use anyhow::Context;
use ssot_core::check::{check_tree, CheckOptions, Report};
use ssot_core::config::{Config, FieldSet};
use std::path::{Path, PathBuf};

pub struct CheckArgs {
    pub dir: Option<PathBuf>,
    pub fields: Option<Vec<String>>,
    pub field_set: Option<String>,
}

pub fn run(root: &Path, args: CheckArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load ssot.yaml")?;

    let required_fields = match (args.fields, args.field_set) {
        (Some(fields), _) => fields.into_iter().map(|f| f.trim().to_string()).collect(),
        (None, Some(name)) => name.parse::<FieldSet>()?.fields(),
        (None, None) => config.required_fields(),
    };
    let opts = CheckOptions {
        docs_dir: args.dir.unwrap_or_else(|| PathBuf::from(&config.docs_dir)),
        required_fields,
    };

    let report = check_tree(root, &opts)
        .with_context(|| format!("cannot check {}", opts.docs_dir.display()))?;

    if json {
        let value = serde_json::json!({
            "passed": report.passed(),
            "problem_count": report.problem_count(),
            "files": report.files,
        });
        print_json(&value)?;
    } else {
        print_report(&report);
    }

    if !report.passed() {
        anyhow::bail!(
            "{} problem(s) in {} file(s)",
            report.problem_count(),
            report.failing_files().count()
        );
    }

    Ok(())
}

fn print_report(report: &Report) {
    for file in &report.files {
        println!("Checking {}...", file.path);
        for problem in &file.problems {
            println!("  ERROR: {problem}");
        }
    }

    if report.passed() {
        println!("Frontmatter validation passed.");
    } else {
        println!("Frontmatter validation failed.");
    }
}

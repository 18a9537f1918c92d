#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const VALID_A: &str = "---
title: A
slug: a
status: living
last_updated: 2025-01-01
tags: [x]
summary: \"s\"
---
# A
";

fn ssot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ssot").unwrap();
    cmd.current_dir(dir.path()).env("SSOT_ROOT", dir.path());
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn docs_dir(dir: &TempDir) {
    std::fs::create_dir_all(dir.path().join("docs")).unwrap();
}

// ---------------------------------------------------------------------------
// ssot check
// ---------------------------------------------------------------------------

#[test]
fn check_complete_frontmatter_passes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/a.md", VALID_A);

    ssot(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout("Checking docs/a.md...\nFrontmatter validation passed.\n");
}

#[test]
fn check_partial_frontmatter_lists_missing_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/b.md", "---\ntitle: B\nslug: b\n---\n# B\n");

    let out = ssot(&dir).arg("check").assert().failure().code(1);
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout,
        "Checking docs/b.md...\n\
         \x20 ERROR: missing required field 'status'\n\
         \x20 ERROR: missing required field 'last_updated'\n\
         \x20 ERROR: missing required field 'tags'\n\
         \x20 ERROR: missing required field 'summary'\n\
         Frontmatter validation failed.\n"
    );
}

#[test]
fn check_without_frontmatter_reports_once() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/c.md", "# C\n\n---\ntitle: C\n---\n");

    ssot(&dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("  ERROR: missing frontmatter block"))
        .stdout(predicate::str::contains("missing required field").not());
}

#[test]
fn check_unclosed_frontmatter_same_as_absent() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/d.md", "---\ntitle: D\nslug: d\n# D\n");

    ssot(&dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Checking docs/d.md..."))
        .stdout(predicate::str::contains("  ERROR: missing frontmatter block"))
        .stdout(predicate::str::contains("Frontmatter validation failed."));
}

#[test]
fn check_empty_docs_dir_passes_trivially() {
    let dir = TempDir::new().unwrap();
    docs_dir(&dir);

    ssot(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout("Frontmatter validation passed.\n");
}

#[test]
fn check_missing_docs_dir_is_hard_error() {
    let dir = TempDir::new().unwrap();

    ssot(&dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("docs directory not found"));
}

#[test]
fn check_aggregates_one_error_per_file() {
    let dir = TempDir::new().unwrap();
    for name in ["one", "two", "three"] {
        write(
            dir.path(),
            &format!("docs/{name}.md"),
            &VALID_A.replace("status: living\n", ""),
        );
    }

    let out = ssot(&dir).arg("check").assert().code(1);
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("ERROR").count(), 3);
    for name in ["one", "two", "three"] {
        assert!(stdout.contains(&format!("Checking docs/{name}.md...")));
    }
}

#[test]
fn check_output_is_sorted_and_recursive() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/z.md", VALID_A);
    write(dir.path(), "docs/guide/b.md", VALID_A);
    write(dir.path(), "docs/a.md", VALID_A);
    write(dir.path(), "docs/image.png", "binary");

    ssot(&dir).arg("check").assert().success().stdout(
        "Checking docs/a.md...\n\
         Checking docs/guide/b.md...\n\
         Checking docs/z.md...\n\
         Frontmatter validation passed.\n",
    );
}

#[test]
fn check_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/a.md", VALID_A);
    write(dir.path(), "docs/b.md", "---\ntitle: B\nslug: b\n---\n");

    let first = ssot(&dir).arg("check").output().unwrap();
    let second = ssot(&dir).arg("check").output().unwrap();
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.status.code(), Some(1));
}

#[test]
fn check_does_not_modify_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/c.md", "# C\n");
    ssot(&dir).arg("check").assert().code(1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("docs/c.md")).unwrap(),
        "# C\n"
    );
}

#[test]
fn check_dir_override() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/bad.md", "# bad\n");
    write(dir.path(), "handbook/a.md", VALID_A);

    ssot(&dir)
        .args(["check", "--dir", "handbook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking handbook/a.md..."));
}

#[test]
fn check_fields_override() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/b.md", "---\ntitle: B\nslug: b\n---\n");

    ssot(&dir)
        .args(["check", "--fields", "title,slug"])
        .assert()
        .success();
}

#[test]
fn check_template_field_set() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/a.md", VALID_A);

    ssot(&dir)
        .args(["check", "--field-set", "template"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "  ERROR: missing required field 'document_type'",
        ));
}

#[test]
fn check_unknown_field_set_is_error() {
    let dir = TempDir::new().unwrap();
    docs_dir(&dir);

    ssot(&dir)
        .args(["check", "--field-set", "strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field set 'strict'"));
}

#[test]
fn check_honours_config_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "ssot.yaml",
        "docs_dir: handbook\nrequired_fields: [title]\n",
    );
    write(dir.path(), "handbook/a.md", "---\ntitle: A\n---\n");

    ssot(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking handbook/a.md..."));
}

#[test]
fn check_json_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/a.md", VALID_A);
    write(dir.path(), "docs/c.md", "# C\n");

    let out = ssot(&dir).args(["--json", "check"]).assert().code(1);
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(value["passed"], false);
    assert_eq!(value["problem_count"], 1);
    assert_eq!(value["files"][0]["path"], "docs/a.md");
    assert_eq!(value["files"][1]["problems"][0]["kind"], "missing_frontmatter");
}

// ---------------------------------------------------------------------------
// ssot site
// ---------------------------------------------------------------------------

fn seed_site_sources(root: &Path) {
    write(root, "README.md", "See [docs](./docs/a.md) and [license](./LICENSE).\n");
    write(root, "AGENTS.md", "Rules in ./docs/rules.md\n");
    write(root, "_templates/TOPIC_TEMPLATE.md", "topic\n");
    write(root, "_templates/SECTION_TEMPLATE.md", "section\n");
    write(root, "_templates/FRONT_MATTER.md", "front matter\n");
}

#[test]
fn site_stages_default_pages() {
    let dir = TempDir::new().unwrap();
    seed_site_sources(dir.path());

    ssot(&dir)
        .arg("site")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged index.md <- README.md"))
        .stdout(predicate::str::contains(
            "Staged _templates/FRONT_MATTER.md <- _templates/FRONT_MATTER.md",
        ));

    let index = std::fs::read_to_string(dir.path().join("build/site/index.md")).unwrap();
    assert!(index.contains("[docs](a.md)"));
    assert!(index.contains("/blob/main/LICENSE)"));
}

#[test]
fn site_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    seed_site_sources(dir.path());

    ssot(&dir)
        .args(["site", "--dry-run", "--out", "public"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would stage AGENTS.md <- AGENTS.md"));
    assert!(!dir.path().join("public").exists());
}

#[test]
fn site_missing_source_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "readme\n");

    ssot(&dir)
        .arg("site")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("site source not found"));
    assert!(!dir.path().join("build/site").exists());
}

// ---------------------------------------------------------------------------
// ssot config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_defaults() {
    let dir = TempDir::new().unwrap();

    ssot(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid. No warnings."));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ssot.yaml", "required_fields: [title, \"bad name\"]\n");

    ssot(&dir)
        .args(["config", "validate"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[error] invalid field name 'bad name'"));
}

#[test]
fn config_show_prints_effective_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ssot.yaml", "field_set: template\n");

    ssot(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docs_dir: docs"))
        .stdout(predicate::str::contains(
            "# effective required fields: title, slug, summary, document_type, tags, last_updated",
        ));
}

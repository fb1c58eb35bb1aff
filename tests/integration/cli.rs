//! Tests for the `docprep` binary.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::{Workbench, dependency, docprep, lib, reactor};

#[test]
fn test_sources_aggregate_prints_one_dir_per_line() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let root = suite.dir().canonicalize()?;

    let output = docprep(suite.dir())?.args(["sources", "--aggregate"]).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            root.join("core").join("src/main/flex").display().to_string(),
            root.join("ui").join("src/main/flex").display().to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_libraries_from_module_directory() -> Result<()> {
    let bench = Workbench::new()?;
    reactor(&bench);
    let ui = bench.project(
        "ui-standalone",
        &format!(
            "[project]\ngroup = \"org.example\"\nartifact = \"ui\"\nversion = \"1.0\"\n\n{}",
            dependency(&lib("x"))
        ),
    );

    docprep(ui.dir())?
        .arg("libraries")
        .assert()
        .success()
        .stdout(predicate::str::contains(bench.repo.path_for(&lib("x")).display().to_string()));

    docprep(ui.dir())?
        .args(["libraries", "--external"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_template_on_windows_prints_directory() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    bench.install_bundle("4.0.0.2000")?;
    let out = bench.path().join("templates");

    docprep(suite.dir())?
        .args(["template", "--generator-version", "4.0.0.2000", "--platform", "windows", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("templates"));

    assert!(out.join("asDocHelper").is_file());
    Ok(())
}

#[test]
fn test_prepare_emits_generator_configuration() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    bench.install_bundle("4.1.0.16076")?;

    let output = docprep(suite.dir())?.args(["prepare", "--aggregate", "--compact"]).output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config["source-path"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        config["library-path"],
        serde_json::json!([
            bench.repo.path_for(&lib("x")).display().to_string(),
            bench.repo.path_for(&lib("z")).display().to_string(),
        ])
    );
    assert_eq!(config["main-title"], "suite Documentation");
    assert!(config["output"].as_str().is_some_and(|p| p.ends_with("asdoc")));
    Ok(())
}

#[test]
fn test_prepare_skips_without_sources() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);

    docprep(suite.dir())?
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Skipped: source path doesn't exist"));
    Ok(())
}

#[test]
fn test_missing_descriptor_exits_with_error() -> Result<()> {
    let bench = Workbench::new()?;
    let empty = bench.path().join("empty");
    std::fs::create_dir_all(&empty)?;

    docprep(&empty)?
        .arg("sources")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("docprep.toml"));
    Ok(())
}

//! Shared setup for the integration suite.
//!
//! [`Workbench`] owns a temporary directory holding a file-based artifact
//! repository (`repo/`) and any number of project directories next to it.

use anyhow::Result;
use assert_cmd::Command;
use docprep_cli::core::{ArtifactType, Coordinate};
use docprep_cli::template::bundle_coordinate;
use docprep_cli::test_utils::{ProjectFixture, RepositoryFixture, write_zip_with_mode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workbench {
    temp: TempDir,
    pub repo: RepositoryFixture,
}

impl Workbench {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let repo = RepositoryFixture::new(temp.path().join("repo"));
        Ok(Self {
            temp,
            repo,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// `[repositories]` table pointing at this workbench's repository.
    ///
    /// Uses a TOML literal string so Windows separators survive.
    pub fn repositories_table(&self) -> String {
        format!("[repositories]\nlocal = '{}'\n", self.repo.root().display())
    }

    /// Write a project descriptor at `relative`, appending the repositories table.
    pub fn project(&self, relative: &str, descriptor: &str) -> ProjectFixture {
        let content = format!("{descriptor}\n{}", self.repositories_table());
        ProjectFixture::new(self.path().join(relative), &content)
    }

    /// Install a template bundle whose helper scripts carry mode 0644.
    pub fn install_bundle(&self, version: &str) -> Result<PathBuf> {
        let coordinate = bundle_coordinate(&version.parse()?);
        let path = self.repo.path_for(&coordinate);
        std::fs::create_dir_all(path.parent().expect("bundle has a parent"))?;
        write_zip_with_mode(
            &path,
            &[
                ("index.html", "<html/>", 0o644),
                ("asDocHelper", "#!/bin/sh\n", 0o644),
                ("asDocHelper.linux", "#!/bin/sh\n", 0o644),
                ("images/", "", 0o755),
                ("images/logo.png", "png", 0o644),
            ],
        );
        Ok(path)
    }
}

pub fn lib(name: &str) -> Coordinate {
    Coordinate::new("org.example", name, "1.0", ArtifactType::Library)
}

pub fn app(name: &str) -> Coordinate {
    Coordinate::new("org.example", name, "1.0", ArtifactType::Application)
}

pub fn playerglobal() -> Coordinate {
    Coordinate::new("com.adobe.flex.framework", "playerglobal", "10.0", ArtifactType::Library)
}

/// TOML `[[dependencies]]` entry for `coordinate`.
pub fn dependency(coordinate: &Coordinate) -> String {
    format!(
        "[[dependencies]]\ngroup = \"{}\"\nartifact = \"{}\"\nversion = \"{}\"\ntype = \"{}\"\n",
        coordinate.group, coordinate.artifact, coordinate.version, coordinate.artifact_type
    )
}

/// A three-project reactor:
///
/// - `suite` aggregates `core` and `ui` and declares nothing
/// - `core` depends on `x`, which depends on the application `y`
/// - `ui` depends on `x`, `z` and the sentinel `playerglobal`
///
/// Every project except `suite` has a source root.
pub fn reactor(bench: &Workbench) -> ProjectFixture {
    bench.repo.install(&lib("x"), &[(app("y"), false, false)]);
    bench.repo.install(&app("y"), &[]);
    bench.repo.install(&lib("z"), &[]);
    bench.repo.install(&playerglobal(), &[]);

    bench
        .project(
            "suite/core",
            &format!("[project]\nartifact = \"core\"\n\n{}", dependency(&lib("x"))),
        )
        .with_source_dir("src/main/flex");
    bench
        .project(
            "suite/ui",
            &format!(
                "[project]\nartifact = \"ui\"\n\n{}\n{}\n{}",
                dependency(&lib("x")),
                dependency(&lib("z")),
                dependency(&playerglobal())
            ),
        )
        .with_source_dir("src/main/flex");
    bench.project(
        "suite",
        "[project]\ngroup = \"org.example\"\nartifact = \"suite\"\nversion = \"1.0\"\ntype = \"pom\"\nmodules = [\"core\", \"ui\"]\n",
    )
}

/// The `docprep` binary with `--project` set.
pub fn docprep(project: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("docprep")?;
    cmd.arg("--project").arg(project).env_remove("RUST_LOG");
    Ok(cmd)
}

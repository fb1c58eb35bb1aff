use anyhow::Result;
use docprep_cli::core::DocprepError;
use docprep_cli::paths::{resolve_external_library_paths, resolve_library_paths};
use docprep_cli::project::load_workspace;
use docprep_cli::test_utils::{ProjectFixture, RepositoryFixture, init_test_logging};

use crate::common::{Workbench, app, dependency, lib, playerglobal, reactor};

#[test]
fn test_aggregate_library_path_over_reactor() -> Result<()> {
    init_test_logging(None);
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let workspace = load_workspace(suite.dir())?;
    let repository = workspace.repository();

    let paths = resolve_library_paths(
        &workspace.project,
        Some(&workspace.reactor),
        true,
        &repository,
        &workspace.context,
    )?;

    // x is reached from both modules but listed once; y is an application
    // and playerglobal is a sentinel, so neither is on the library path.
    assert_eq!(paths, vec![bench.repo.path_for(&lib("x")), bench.repo.path_for(&lib("z"))]);
    Ok(())
}

#[test]
fn test_direct_library_path_of_module() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let workspace = load_workspace(suite.dir())?;
    let ui = workspace
        .reactor
        .iter()
        .find(|p| p.name() == "ui")
        .expect("ui is part of the reactor");
    let repository = workspace.repository();

    let paths = resolve_library_paths(ui, Some(&workspace.reactor), false, &repository, &workspace.context)?;
    assert_eq!(paths, vec![bench.repo.path_for(&lib("x")), bench.repo.path_for(&lib("z"))]);

    let external = resolve_external_library_paths(ui)?;
    assert_eq!(external, vec![bench.repo.path_for(&playerglobal())]);
    Ok(())
}

#[test]
fn test_missing_transitive_dependency_aborts() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let workspace = load_workspace(suite.dir())?;
    std::fs::remove_file(bench.repo.path_for(&app("y")))?;
    let repository = workspace.repository();

    let err = resolve_library_paths(
        &workspace.project,
        Some(&workspace.reactor),
        true,
        &repository,
        &workspace.context,
    )
    .unwrap_err();

    match err {
        DocprepError::ResolutionError {
            coordinate,
            ..
        } => assert!(coordinate.contains("org.example:y"), "unexpected coordinate {coordinate}"),
        other => panic!("expected a resolution error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_remote_repository_fills_local() -> Result<()> {
    let bench = Workbench::new()?;
    let mirror = RepositoryFixture::new(bench.path().join("mirror"));
    mirror.install(&lib("remote-only"), &[]);

    let project = ProjectFixture::new(
        bench.path().join("app"),
        &format!(
            "[project]\ngroup = \"org.example\"\nartifact = \"app\"\nversion = \"1.0\"\n\n{}\n{}remotes = ['file://{}']\n",
            dependency(&lib("remote-only")),
            bench.repositories_table(),
            mirror.root().display()
        ),
    );

    let workspace = load_workspace(project.dir())?;
    let repository = workspace.repository();
    let paths =
        resolve_library_paths(&workspace.project, Some(&workspace.reactor), true, &repository, &workspace.context)?;

    let local = bench.repo.path_for(&lib("remote-only"));
    assert_eq!(paths, vec![local.clone()]);
    assert!(local.is_file(), "remote artifact was copied into the local repository");
    Ok(())
}

#[test]
fn test_dependency_on_reactor_module_uses_its_dependencies() -> Result<()> {
    let bench = Workbench::new()?;
    bench.repo.install(&lib("x"), &[]);

    let parent = bench.project(
        "multi",
        "[project]\ngroup = \"org.example\"\nartifact = \"multi\"\nversion = \"1.0\"\ntype = \"pom\"\nmodules = [\"lib\", \"app\"]\n",
    );
    bench.project("multi/lib", &format!("[project]\nartifact = \"lib\"\n\n{}", dependency(&lib("x"))));
    bench.project(
        "multi/app",
        &format!("[project]\nartifact = \"app\"\ntype = \"swf\"\n\n{}", dependency(&lib("lib"))),
    );

    // lib is built by the reactor and was never installed.
    let workspace = load_workspace(parent.dir())?;
    let repository = workspace.repository();
    let paths =
        resolve_library_paths(&workspace.project, Some(&workspace.reactor), true, &repository, &workspace.context)?;

    assert_eq!(paths, vec![bench.repo.path_for(&lib("x"))]);
    assert!(!bench.repo.path_for(&lib("lib")).exists());
    Ok(())
}

use anyhow::Result;
use docprep_cli::paths::resolve_source_paths;
use docprep_cli::project::load_workspace;

use crate::common::{Workbench, reactor};

#[test]
fn test_aggregate_sources_follow_reactor_order() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let workspace = load_workspace(suite.dir())?;
    let root = suite.dir().canonicalize()?;

    let paths = resolve_source_paths(&workspace.project, Some(&workspace.reactor), true);

    assert_eq!(
        paths,
        vec![root.join("core").join("src/main/flex"), root.join("ui").join("src/main/flex")],
        "suite has no source root, modules follow in declaration order"
    );
    Ok(())
}

#[test]
fn test_single_project_without_sources_is_empty() -> Result<()> {
    let bench = Workbench::new()?;
    let suite = reactor(&bench);
    let workspace = load_workspace(suite.dir())?;

    assert!(resolve_source_paths(&workspace.project, Some(&workspace.reactor), false).is_empty());
    Ok(())
}

#[test]
fn test_aggregate_without_modules_uses_project_alone() -> Result<()> {
    let bench = Workbench::new()?;
    let standalone = bench.project(
        "standalone",
        "[project]\ngroup = \"org.example\"\nartifact = \"standalone\"\nversion = \"1.0\"\nsource-roots = [\"src\", \"missing\"]\n",
    );
    std::fs::create_dir_all(standalone.dir().join("src"))?;
    let workspace = load_workspace(standalone.dir())?;

    let paths = resolve_source_paths(&workspace.project, None, true);
    assert_eq!(paths, vec![standalone.dir().canonicalize()?.join("src")]);
    Ok(())
}

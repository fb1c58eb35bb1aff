//! Loading projects, reactors and repository settings from disk.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::descriptor::{DependencySpec, ProjectDescriptor, RepositoriesSection};
use super::{Project, Reactor};
use crate::config::DocSettings;
use crate::constants::{DEFAULT_LOCAL_REPOSITORY, DEFAULT_SENTINELS, DEFAULT_TARGET_DIR, DESCRIPTOR_FILE};
use crate::core::{Artifact, Coordinate, SentinelKey};
use crate::resolver::{LocalRepository, RepositoryContext};
use crate::utils::{resolve_path, safe_canonicalize};

/// Everything loaded from a project directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// The project the build was started from
    pub project: Project,
    /// The project followed by its modules, depth first
    pub reactor: Reactor,
    /// Repository locations from the root descriptor
    pub context: RepositoryContext,
    /// The root descriptor's `[doc]` table
    pub settings: DocSettings,
}

impl Workspace {
    /// A repository over this workspace's repository context.
    #[must_use]
    pub fn repository(&self) -> LocalRepository {
        LocalRepository::new(self.context.clone())
    }
}

/// Load the project in `dir` and every module it aggregates.
///
/// Direct dependencies are located in the repository while loading, so a
/// dependency missing from every repository fails here. A dependency on a
/// reactor module with the same version is satisfied by the reactor: the
/// module's own dependencies take its place and it never needs to be installed.
pub fn load_workspace(dir: &Path) -> Result<Workspace> {
    let base_dir = safe_canonicalize(dir)
        .with_context(|| format!("Project directory not found: {}", dir.display()))?;
    let descriptor = ProjectDescriptor::load(&base_dir.join(DESCRIPTOR_FILE))?;

    let context = repository_context(&base_dir, &descriptor.repositories)?;
    let repository = LocalRepository::new(context.clone());

    let mut members = Vec::new();
    let parent = Inherited::default();
    collect(&base_dir, descriptor.clone(), &parent, true, &mut Vec::new(), &mut members)?;

    let mut projects = Vec::with_capacity(members.len());
    for index in 0..members.len() {
        let mut dependencies = Vec::new();
        locate_dependencies(index, &members, &repository, false, &mut Vec::new(), &mut dependencies)?;
        let mut project = members[index].project.clone();
        project.dependencies = dependencies;
        projects.push(project);
    }

    tracing::debug!(
        "Loaded reactor of {} projects from {}",
        projects.len(),
        base_dir.display()
    );

    let reactor = Reactor::new(projects);
    let project = reactor
        .execution_root()
        .cloned()
        .context("Reactor has no execution root")?;

    Ok(Workspace {
        project,
        reactor,
        context,
        settings: descriptor.doc,
    })
}

/// Values a module inherits from its aggregating parent.
#[derive(Default)]
struct Inherited {
    group: Option<String>,
    version: Option<String>,
    managed_versions: BTreeMap<String, String>,
}

/// A reactor project whose dependencies are not located yet.
struct Member {
    project: Project,
    specs: Vec<DependencySpec>,
}

/// Collect `base_dir` and its modules in preorder.
///
/// `ancestors` holds the directories of the aggregating chain above `base_dir`.
fn collect(
    base_dir: &Path,
    descriptor: ProjectDescriptor,
    parent: &Inherited,
    execution_root: bool,
    ancestors: &mut Vec<PathBuf>,
    members: &mut Vec<Member>,
) -> Result<()> {
    let section = &descriptor.project;
    let Some(group) = section.group.clone().or_else(|| parent.group.clone()) else {
        bail!("{}: [project] has no group and no parent to inherit one from", base_dir.display());
    };
    let Some(version) = section.version.clone().or_else(|| parent.version.clone()) else {
        bail!("{}: [project] has no version and no parent to inherit one from", base_dir.display());
    };

    let mut managed_versions = parent.managed_versions.clone();
    managed_versions.extend(descriptor.dependency_management.clone());

    let coordinate =
        Coordinate::new(group.clone(), section.artifact.clone(), version.clone(), section.artifact_type.clone());

    let target_dir = base_dir.join(
        section.target_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_DIR)),
    );

    members.push(Member {
        project: Project {
            coordinate,
            base_dir: base_dir.to_path_buf(),
            source_roots: section.source_roots.clone(),
            target_dir,
            dependencies: Vec::new(),
            managed_versions: managed_versions.clone(),
            execution_root,
        },
        specs: descriptor.dependencies.clone(),
    });

    let inherited = Inherited {
        group: Some(group),
        version: Some(version),
        managed_versions,
    };
    ancestors.push(base_dir.to_path_buf());
    for module in &section.modules {
        let module_dir = safe_canonicalize(&base_dir.join(module))
            .with_context(|| format!("Module directory not found: {}", module.display()))?;
        if ancestors.contains(&module_dir) {
            bail!(
                "Module cycle: {} aggregates its own ancestor {}",
                base_dir.display(),
                module_dir.display()
            );
        }
        if members.iter().any(|m| m.project.base_dir == module_dir) {
            bail!("Module {} is aggregated more than once", module_dir.display());
        }
        let module_descriptor = ProjectDescriptor::load(&module_dir.join(DESCRIPTOR_FILE))
            .with_context(|| format!("Failed to load module {}", module.display()))?;
        collect(&module_dir, module_descriptor, &inherited, false, ancestors, members)?;
    }
    ancestors.pop();

    Ok(())
}

/// The reactor member producing `coordinate`, matched on `group:artifact` and version.
fn reactor_member(members: &[Member], coordinate: &Coordinate) -> Option<usize> {
    members.iter().position(|m| {
        m.project.coordinate.management_key() == coordinate.management_key()
            && m.project.coordinate.version == coordinate.version
    })
}

/// Locate the dependencies of `members[index]` into `out`.
///
/// Dependencies on reactor members are replaced by that member's own
/// dependencies, whose optional entries are skipped. `expanding` holds the
/// members currently being replaced. The first occurrence of an identity wins.
fn locate_dependencies(
    index: usize,
    members: &[Member],
    repository: &LocalRepository,
    transitive: bool,
    expanding: &mut Vec<usize>,
    out: &mut Vec<Artifact>,
) -> Result<()> {
    expanding.push(index);
    let owner = &members[index].project.coordinate;

    for spec in &members[index].specs {
        if transitive && spec.optional {
            continue;
        }

        if let Some(sibling) = reactor_member(members, &spec.coordinate) {
            if expanding.contains(&sibling) {
                tracing::debug!("Ignoring reactor dependency cycle {owner} -> {}", spec.coordinate);
            } else {
                tracing::debug!("{owner} depends on reactor module {}", spec.coordinate);
                locate_dependencies(sibling, members, repository, true, expanding, out)?;
            }
            continue;
        }

        let identity = spec.coordinate.identity_key();
        if out.iter().any(|a| a.coordinate.identity_key() == identity) {
            continue;
        }

        let file = repository
            .locate(&spec.coordinate)
            .with_context(|| format!("Failed to locate dependency of {owner}"))?;
        let global = spec.global || repository.context().is_sentinel(&spec.coordinate);
        out.push(Artifact::new(spec.coordinate.clone()).global(global).resolved_at(file));
    }

    expanding.pop();
    Ok(())
}

/// Build the repository context from the root descriptor.
fn repository_context(base_dir: &Path, section: &RepositoriesSection) -> Result<RepositoryContext> {
    let local = section.local.as_deref().unwrap_or(DEFAULT_LOCAL_REPOSITORY);
    let local = absolutize(base_dir, resolve_path(local)?);

    let remotes = section
        .remotes
        .iter()
        .map(|remote| {
            let path = remote.strip_prefix("file://").unwrap_or(remote);
            resolve_path(path).map(|p| absolutize(base_dir, p))
        })
        .collect::<Result<Vec<_>>>()?;

    let sentinels = match &section.sentinels {
        Some(keys) => keys.iter().map(|k| k.parse::<SentinelKey>()).collect::<Result<Vec<_>, _>>()?,
        None => DEFAULT_SENTINELS.iter().map(|k| k.parse::<SentinelKey>()).collect::<Result<Vec<_>, _>>()?,
    };

    Ok(RepositoryContext {
        local,
        remotes,
        sentinels,
    })
}

fn absolutize(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { base_dir.join(path) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArtifactType, DocprepError};
    use crate::test_utils::RepositoryFixture;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_single_project() {
        let temp = TempDir::new().unwrap();
        let repo = RepositoryFixture::new(temp.path().join("repo"));
        let player =
            Coordinate::new("com.adobe.flex.framework", "playerglobal", "10.0", ArtifactType::Library);
        let util = Coordinate::new("org.example", "util", "1.0", ArtifactType::Library);
        repo.install(&player, &[]);
        let util_file = repo.install(&util, &[]);

        let dir = temp.path().join("app");
        write(
            &dir.join(DESCRIPTOR_FILE),
            r#"
[project]
group = "org.example"
artifact = "app"
version = "1.0"

[[dependencies]]
group = "com.adobe.flex.framework"
artifact = "playerglobal"
version = "10.0"

[[dependencies]]
group = "org.example"
artifact = "util"
version = "1.0"

[repositories]
local = "../repo"

[doc]
main-title = "App"
"#,
        );

        let workspace = load_workspace(&dir).unwrap();
        assert_eq!(workspace.reactor.len(), 1);
        assert!(workspace.project.execution_root);
        assert_eq!(workspace.project.coordinate.to_string(), "org.example:app:swc:1.0");
        assert_eq!(workspace.project.target_dir, workspace.project.base_dir.join("target"));

        let deps = &workspace.project.dependencies;
        assert!(deps[0].global, "playerglobal is a default sentinel");
        assert!(!deps[1].global);
        assert_eq!(
            deps[1].location().unwrap().canonicalize().unwrap(),
            util_file.canonicalize().unwrap()
        );

        assert_eq!(workspace.settings.main_title.as_deref(), Some("App"));
        assert_eq!(workspace.context.sentinels.len(), DEFAULT_SENTINELS.len());
    }

    #[test]
    fn test_load_reactor_inherits_from_parent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        write(
            &root.join(DESCRIPTOR_FILE),
            r#"
[project]
group = "org.example"
artifact = "parent"
version = "2.0"
type = "pom"
modules = ["lib", "app"]

[dependency-management]
"org.example:util" = "3.0"

[repositories]
local = "repo"
sentinels = []
"#,
        );
        write(&root.join("lib").join(DESCRIPTOR_FILE), "[project]\nartifact = \"lib\"\n");
        write(
            &root.join("app").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"app\"\ntype = \"swf\"\nmodules = [\"nested\"]\n",
        );
        write(
            &root.join("app").join("nested").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"nested\"\nversion = \"9.9\"\n",
        );

        let workspace = load_workspace(&root).unwrap();
        let coords: Vec<String> =
            workspace.reactor.iter().map(|p| p.coordinate.to_string()).collect();
        assert_eq!(
            coords,
            vec![
                "org.example:parent:pom:2.0",
                "org.example:lib:swc:2.0",
                "org.example:app:swf:2.0",
                "org.example:nested:swc:9.9",
            ]
        );
        assert_eq!(workspace.project.name(), "parent");
        assert!(workspace.reactor.iter().skip(1).all(|p| !p.execution_root));
        assert!(workspace.reactor.iter().all(|p| p.managed_versions["org.example:util"] == "3.0"));
        assert!(workspace.context.sentinels.is_empty());
        assert_eq!(workspace.context.local, workspace.project.base_dir.join("repo"));
    }

    #[test]
    fn test_missing_descriptor() {
        let temp = TempDir::new().unwrap();
        let err = load_workspace(temp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocprepError>(),
            Some(DocprepError::DescriptorNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_dependency_fails_load() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join(DESCRIPTOR_FILE),
            r#"
[project]
group = "org.example"
artifact = "app"
version = "1.0"

[[dependencies]]
group = "org.example"
artifact = "absent"
version = "1.0"

[repositories]
local = "repo"
"#,
        );

        let err = load_workspace(temp.path()).unwrap_err();
        let resolution = err.chain().find_map(|e| e.downcast_ref::<DocprepError>());
        assert!(matches!(resolution, Some(DocprepError::ResolutionError { .. })), "{err:#}");
    }

    #[test]
    fn test_reactor_module_dependency_needs_no_installed_artifact() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let repo = RepositoryFixture::new(root.join("repo"));
        let util = Coordinate::new("org.example", "util", "1.0", ArtifactType::Library);
        let util_file = repo.install(&util, &[]);
        repo.install(&Coordinate::new("org.example", "extra", "1.0", ArtifactType::Library), &[]);

        write(
            &root.join(DESCRIPTOR_FILE),
            r#"
[project]
group = "org.example"
artifact = "parent"
version = "1.0"
type = "pom"
modules = ["lib", "app"]

[repositories]
local = "repo"
"#,
        );
        write(
            &root.join("lib").join(DESCRIPTOR_FILE),
            r#"
[project]
artifact = "lib"

[[dependencies]]
group = "org.example"
artifact = "util"
version = "1.0"

[[dependencies]]
group = "org.example"
artifact = "extra"
version = "1.0"
optional = true
"#,
        );
        write(
            &root.join("app").join(DESCRIPTOR_FILE),
            r#"
[project]
artifact = "app"
type = "swf"

[[dependencies]]
group = "org.example"
artifact = "lib"
version = "1.0"
"#,
        );

        // lib is never installed. Its optional extra stays off app.
        let workspace = load_workspace(&root).unwrap();
        let lib = workspace.reactor.iter().find(|p| p.name() == "lib").unwrap();
        assert_eq!(lib.dependencies.len(), 2);
        let app = workspace.reactor.iter().find(|p| p.name() == "app").unwrap();
        let deps: Vec<String> = app.dependencies.iter().map(|a| a.coordinate.to_string()).collect();
        assert_eq!(deps, vec!["org.example:util:swc:1.0"]);
        assert_eq!(
            app.dependencies[0].location().unwrap().canonicalize().unwrap(),
            util_file.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_reactor_module_with_other_version_is_located() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        write(
            &root.join(DESCRIPTOR_FILE),
            "[project]\ngroup = \"org.example\"\nartifact = \"parent\"\nversion = \"2.0\"\ntype = \"pom\"\nmodules = [\"lib\", \"app\"]\n\n[repositories]\nlocal = \"repo\"\n",
        );
        write(&root.join("lib").join(DESCRIPTOR_FILE), "[project]\nartifact = \"lib\"\n");
        write(
            &root.join("app").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"app\"\n\n[[dependencies]]\ngroup = \"org.example\"\nartifact = \"lib\"\nversion = \"1.0\"\n",
        );

        let err = load_workspace(&root).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to locate dependency of org.example:app"), "{err:#}");
    }

    #[test]
    fn test_mutually_dependent_modules_load() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        write(
            &root.join(DESCRIPTOR_FILE),
            "[project]\ngroup = \"g\"\nartifact = \"parent\"\nversion = \"1\"\ntype = \"pom\"\nmodules = [\"a\", \"b\"]\n\n[repositories]\nlocal = \"repo\"\n",
        );
        write(
            &root.join("a").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"a\"\n\n[[dependencies]]\ngroup = \"g\"\nartifact = \"b\"\nversion = \"1\"\n",
        );
        write(
            &root.join("b").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"b\"\n\n[[dependencies]]\ngroup = \"g\"\nartifact = \"a\"\nversion = \"1\"\n",
        );

        let workspace = load_workspace(&root).unwrap();
        assert!(workspace.reactor.iter().all(|p| p.dependencies.is_empty()));
    }

    #[test]
    fn test_module_aggregating_itself_is_a_cycle() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join(DESCRIPTOR_FILE),
            "[project]\ngroup = \"g\"\nartifact = \"loop\"\nversion = \"1\"\nmodules = [\".\"]\n",
        );

        let err = load_workspace(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Module cycle"), "{err:#}");
    }

    #[test]
    fn test_module_aggregating_its_parent_is_a_cycle() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join(DESCRIPTOR_FILE),
            "[project]\ngroup = \"g\"\nartifact = \"parent\"\nversion = \"1\"\nmodules = [\"child\"]\n",
        );
        write(
            &temp.path().join("child").join(DESCRIPTOR_FILE),
            "[project]\nartifact = \"child\"\nmodules = [\"..\"]\n",
        );

        let err = load_workspace(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Module cycle"), "{err:#}");
    }

    #[test]
    fn test_module_listed_twice_fails() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join(DESCRIPTOR_FILE),
            "[project]\ngroup = \"g\"\nartifact = \"parent\"\nversion = \"1\"\nmodules = [\"m\", \"./m\"]\n",
        );
        write(&temp.path().join("m").join(DESCRIPTOR_FILE), "[project]\nartifact = \"m\"\n");

        let err = load_workspace(temp.path()).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err:#}");
    }

    #[test]
    fn test_remote_file_urls() {
        let temp = TempDir::new().unwrap();
        let section = RepositoriesSection {
            local: Some("repo".to_string()),
            remotes: vec![format!("file://{}", temp.path().join("mirror").display()), "mirror2".into()],
            sentinels: Some(vec!["g:a:c".to_string()]),
        };
        let ctx = repository_context(temp.path(), &section).unwrap();
        assert_eq!(ctx.remotes, vec![temp.path().join("mirror"), temp.path().join("mirror2")]);
        assert_eq!(ctx.sentinels[0].classifier.as_deref(), Some("c"));
    }
}

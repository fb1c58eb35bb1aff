//! Projects and reactors.
//!
//! A [`Project`] is one buildable unit: its own artifact coordinate, its
//! compile-source roots and its directly declared dependencies (already
//! located in the repository, with dependencies on reactor members replaced
//! by those members' own dependencies). A [`Reactor`] is the ordered set of sibling
//! projects built together in one pass, execution root first.
//!
//! Both are immutable once loaded. [`loader::load_workspace`] builds them from
//! `docprep.toml` descriptors on disk.

pub mod descriptor;
pub mod loader;

pub use descriptor::{DependencySpec, ProjectDescriptor};
pub use loader::{Workspace, load_workspace};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_SOURCE_ROOT, DEFAULT_TARGET_DIR};
use crate::core::{Artifact, Coordinate};

/// A single project in a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// The project's own artifact
    pub coordinate: Coordinate,
    /// Directory containing the project descriptor
    pub base_dir: PathBuf,
    /// Compile-source roots in declaration order (relative entries are
    /// interpreted against `base_dir`)
    pub source_roots: Vec<PathBuf>,
    /// Build output directory
    pub target_dir: PathBuf,
    /// Direct dependencies in declaration order, reactor members substituted
    pub dependencies: Vec<Artifact>,
    /// `group:artifact` → version overrides for transitive dependencies
    pub managed_versions: BTreeMap<String, String>,
    /// Whether this is the project the build was started from
    pub execution_root: bool,
}

impl Project {
    /// A project with the default source root and target directory, no
    /// dependencies, marked as execution root.
    pub fn new(coordinate: Coordinate, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            coordinate,
            source_roots: vec![PathBuf::from(DEFAULT_SOURCE_ROOT)],
            target_dir: base_dir.join(DEFAULT_TARGET_DIR),
            base_dir,
            dependencies: Vec::new(),
            managed_versions: BTreeMap::new(),
            execution_root: true,
        }
    }

    /// Display name used in titles and log messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.coordinate.artifact
    }

    /// Base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Ordered set of projects built together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reactor {
    projects: Vec<Project>,
}

impl Reactor {
    #[must_use]
    pub const fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
        }
    }

    /// A reactor containing only `project`.
    #[must_use]
    pub fn single(project: Project) -> Self {
        Self::new(vec![project])
    }

    /// Projects in reactor order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// The project marked as execution root, if any.
    #[must_use]
    pub fn execution_root(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.execution_root)
    }
}

impl<'a> IntoIterator for &'a Reactor {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

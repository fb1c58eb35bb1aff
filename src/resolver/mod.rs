//! Transitive dependency resolution.
//!
//! The core never walks dependency graphs itself. It builds a
//! [`ResolutionRequest`] from a project and hands it to a
//! [`DependencyResolver`] collaborator, which returns the full transitive
//! closure as resolved [`Artifact`]s.
//!
//! # Contract
//!
//! - The result contains every transitive dependency of the request's root,
//!   each with a resolved file location. The root artifact itself is not part
//!   of the result.
//! - Failure to resolve any coordinate aborts the whole call with
//!   [`DocprepError::ResolutionError`]. No partial set is ever returned.
//! - Managed versions (`group:artifact` → version) override the version of
//!   every dependency reached transitively.
//! - Artifacts matching one of the context's [`SentinelKey`]s come back with
//!   `global = true`.
//!
//! [`repository::LocalRepository`] is the file-system implementation used by
//! the CLI. Tests substitute in-memory resolvers.

pub mod repository;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::{Artifact, Coordinate, DocprepError, SentinelKey};
use crate::project::Project;

pub use repository::LocalRepository;

/// Repository locations and sentinel configuration for a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryContext {
    /// Local repository root; remote hits are copied here
    pub local: PathBuf,
    /// Remote repositories in lookup order
    pub remotes: Vec<PathBuf>,
    /// Keys of artifacts treated as global sentinels
    pub sentinels: Vec<SentinelKey>,
}

impl RepositoryContext {
    /// A context with only a local repository and no sentinels.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            local: root.into(),
            ..Self::default()
        }
    }

    /// Whether `coordinate` is a configured sentinel.
    #[must_use]
    pub fn is_sentinel(&self, coordinate: &Coordinate) -> bool {
        self.sentinels.iter().any(|key| key.matches(coordinate))
    }
}

/// Everything a resolver needs to compute one transitive closure.
#[derive(Debug, Clone)]
pub struct ResolutionRequest<'a> {
    /// The artifact whose dependencies are resolved
    pub root: &'a Coordinate,
    /// Directly declared dependencies of the root, in declaration order
    pub dependencies: &'a [Artifact],
    /// `group:artifact` → version overrides for transitive dependencies
    pub managed_versions: &'a BTreeMap<String, String>,
    /// Repositories and sentinels
    pub context: &'a RepositoryContext,
}

/// Resolution collaborator.
pub trait DependencyResolver {
    /// Resolve the full transitive closure of `request`.
    fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<Artifact>, DocprepError>;
}

/// Resolve every transitive dependency of `project`.
///
/// The request is rooted at the project's own coordinate and carries its
/// declared dependencies and managed-version map.
pub fn resolve_transitive(
    resolver: &dyn DependencyResolver,
    project: &Project,
    context: &RepositoryContext,
) -> Result<Vec<Artifact>, DocprepError> {
    tracing::debug!(
        target: "resolver",
        "Resolving transitive dependencies of {} ({} declared)",
        project.coordinate,
        project.dependencies.len()
    );

    let request = ResolutionRequest {
        root: &project.coordinate,
        dependencies: &project.dependencies,
        managed_versions: &project.managed_versions,
        context,
    };
    let artifacts = resolver.resolve(&request)?;

    tracing::debug!(
        target: "resolver",
        "{} resolved to {} artifacts",
        project.coordinate,
        artifacts.len()
    );
    Ok(artifacts)
}

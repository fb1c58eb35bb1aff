//! Library path aggregation.

use indexmap::IndexSet;
use std::path::PathBuf;

use crate::core::{ArtifactFilter, DocprepError};
use crate::project::{Project, Reactor};
use crate::resolver::{DependencyResolver, RepositoryContext, resolve_transitive};

/// Library archives visible to the generator.
///
/// Without `aggregate` the project's direct dependencies are filtered with
/// [`ArtifactFilter::library_path`] and mapped to their locations in
/// declaration order; the resolver is not consulted.
///
/// With `aggregate` each reactor project is resolved transitively in reactor
/// order, filtered the same way, and accumulated into an ordered set keyed by
/// location: a location keeps the position of its first occurrence. An
/// aggregate request with no reactor treats `project` as a single-member
/// reactor.
///
/// # Errors
///
/// Any resolution failure aborts the call with the resolver's error. A
/// surviving direct dependency without a location is a
/// [`DocprepError::ResolutionError`].
pub fn resolve_library_paths(
    project: &Project,
    reactor: Option<&Reactor>,
    aggregate: bool,
    resolver: &dyn DependencyResolver,
    context: &RepositoryContext,
) -> Result<Vec<PathBuf>, DocprepError> {
    let filter = ArtifactFilter::library_path();

    if !aggregate {
        return filter
            .select(&project.dependencies)
            .map(|artifact| artifact.location().map(PathBuf::from))
            .collect();
    }

    let single;
    let reactor = match reactor {
        Some(reactor) => reactor,
        None => {
            single = Reactor::single(project.clone());
            &single
        }
    };

    tracing::debug!(
        target: "resolver",
        "Aggregating library path over {} projects with {}",
        reactor.len(),
        filter
    );

    let mut paths: IndexSet<PathBuf> = IndexSet::new();
    for member in reactor {
        let artifacts = resolve_transitive(resolver, member, context)?;
        for artifact in filter.select(&artifacts) {
            let location = artifact.location()?;
            if !paths.insert(location.to_path_buf()) {
                tracing::trace!(target: "resolver", "{} already on the library path", artifact);
            }
        }
    }

    Ok(paths.into_iter().collect())
}

/// Locations of the project's direct global libraries.
///
/// These are the runtime baseline libraries the generator links against
/// without documenting them.
pub fn resolve_external_library_paths(project: &Project) -> Result<Vec<PathBuf>, DocprepError> {
    ArtifactFilter::external_library_path()
        .select(&project.dependencies)
        .map(|artifact| artifact.location().map(PathBuf::from))
        .collect()
}

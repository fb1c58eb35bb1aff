//! Source path resolution.

use std::path::PathBuf;

use crate::project::{Project, Reactor};
use crate::utils::existing_paths;

/// Source directories to document.
///
/// Without `aggregate` this is the project's own source roots that exist on
/// disk, in declaration order. With `aggregate` it is the same list for every
/// reactor project in reactor order, concatenated without deduplication. An
/// aggregate request with no reactor treats `project` as a single-member
/// reactor.
///
/// An empty result is a normal outcome; callers decide whether to skip.
#[must_use]
pub fn resolve_source_paths(project: &Project, reactor: Option<&Reactor>, aggregate: bool) -> Vec<PathBuf> {
    if !aggregate {
        return existing_source_roots(project);
    }

    match reactor {
        Some(reactor) => reactor.iter().flat_map(existing_source_roots).collect(),
        None => existing_source_roots(project),
    }
}

fn existing_source_roots(project: &Project) -> Vec<PathBuf> {
    let found = existing_paths(&project.base_dir, &project.source_roots);
    if found.len() < project.source_roots.len() {
        tracing::trace!(
            "{}: {} of {} source roots exist",
            project.name(),
            found.len(),
            project.source_roots.len()
        );
    }
    found
}

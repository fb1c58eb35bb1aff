//! File-system artifact repository.
//!
//! Artifacts live under a Maven-style layout:
//!
//! ```text
//! <root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<ext>
//! <root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>.toml
//! ```
//!
//! The optional `.toml` descriptor next to an artifact lists its own
//! dependencies as `[[dependencies]]` tables, using the same fields as the
//! project descriptor. An artifact without a descriptor has no dependencies.
//!
//! Lookups try the local repository first, then each remote in order. Remote
//! repositories are plain directories (or `file://` URLs normalised to
//! directories by the loader); a hit is copied into the local repository
//! together with its descriptor so the next lookup is local.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{DependencyResolver, RepositoryContext, ResolutionRequest};
use crate::core::{Artifact, Coordinate, DocprepError};
use crate::project::DependencySpec;
use crate::utils::fs::copy_file;

/// Dependencies recorded next to an artifact in the repository.
#[derive(Debug, Default, Deserialize)]
struct ArtifactDescriptor {
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
}

/// Artifact repository rooted at a local directory with optional remotes.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    context: RepositoryContext,
}

impl LocalRepository {
    /// Repository over the locations in `context`.
    #[must_use]
    pub const fn new(context: RepositoryContext) -> Self {
        Self {
            context,
        }
    }

    /// The repository locations and sentinels.
    #[must_use]
    pub const fn context(&self) -> &RepositoryContext {
        &self.context
    }

    /// Local path of the file for `coordinate`, fetching it from a remote if
    /// needed.
    pub fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf, DocprepError> {
        Lookup::new(&self.context).locate(coordinate)
    }
}

impl DependencyResolver for LocalRepository {
    fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<Artifact>, DocprepError> {
        Lookup::new(request.context).resolve(request)
    }
}

/// One pending node of the breadth-first walk.
struct Pending {
    coordinate: Coordinate,
    global: bool,
    file: Option<PathBuf>,
    via: String,
}

/// Lookup over a single set of repository roots.
struct Lookup<'a> {
    context: &'a RepositoryContext,
}

impl<'a> Lookup<'a> {
    const fn new(context: &'a RepositoryContext) -> Self {
        Self {
            context,
        }
    }

    fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf, DocprepError> {
        let relative = coordinate.relative_dir().join(coordinate.file_name());
        self.find(coordinate, &relative)?.ok_or_else(|| {
            DocprepError::resolution(
                coordinate,
                format!(
                    "{} not found in local repository {} or {} remote repositories",
                    relative.display(),
                    self.context.local.display(),
                    self.context.remotes.len()
                ),
            )
        })
    }

    /// Find `relative` locally or in a remote; remote hits are copied into
    /// the local repository.
    fn find(&self, coordinate: &Coordinate, relative: &Path) -> Result<Option<PathBuf>, DocprepError> {
        let local = self.context.local.join(relative);
        if local.is_file() {
            return Ok(Some(local));
        }

        for remote in &self.context.remotes {
            let candidate = remote.join(relative);
            if candidate.is_file() {
                tracing::debug!(
                    target: "resolver",
                    "Fetching {} from {}",
                    relative.display(),
                    remote.display()
                );
                copy_file(&candidate, &local)
                    .map_err(|e| DocprepError::resolution(coordinate, format!("{e:#}")))?;
                return Ok(Some(local));
            }
        }

        Ok(None)
    }

    fn dependencies_of(&self, coordinate: &Coordinate) -> Result<Vec<DependencySpec>, DocprepError> {
        let relative = coordinate.relative_dir().join(coordinate.descriptor_name());
        let Some(path) = self.find(coordinate, &relative)? else {
            return Ok(Vec::new());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            DocprepError::resolution(coordinate, format!("cannot read {}: {e}", path.display()))
        })?;
        let descriptor: ArtifactDescriptor = toml::from_str(&content).map_err(|e| {
            DocprepError::resolution(coordinate, format!("invalid descriptor {}: {e}", path.display()))
        })?;
        Ok(descriptor.dependencies)
    }

    /// Breadth-first walk with nearest-wins mediation.
    ///
    /// The first coordinate reached for an identity key wins; later
    /// declarations of the same identity are ignored regardless of version.
    fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<Artifact>, DocprepError> {
        let mut chosen: HashMap<String, String> = HashMap::new();
        chosen.insert(request.root.identity_key(), request.root.version.clone());

        let mut queue: VecDeque<Pending> = request
            .dependencies
            .iter()
            .map(|dep| Pending {
                coordinate: dep.coordinate.clone(),
                global: dep.global,
                file: dep.file.clone(),
                via: request.root.to_string(),
            })
            .collect();

        let mut resolved = Vec::new();

        while let Some(pending) = queue.pop_front() {
            let key = pending.coordinate.identity_key();
            if let Some(version) = chosen.get(&key) {
                if *version != pending.coordinate.version {
                    tracing::debug!(
                        target: "resolver",
                        "Omitting {} (via {}): {} already selected",
                        pending.coordinate,
                        pending.via,
                        version
                    );
                }
                continue;
            }
            chosen.insert(key, pending.coordinate.version.clone());

            let file = match pending.file {
                Some(file) => file,
                None => self.locate(&pending.coordinate)?,
            };
            let global = pending.global || self.context.is_sentinel(&pending.coordinate);

            for spec in self.dependencies_of(&pending.coordinate)? {
                if spec.optional {
                    tracing::trace!(
                        target: "resolver",
                        "Skipping optional {} of {}",
                        spec.coordinate,
                        pending.coordinate
                    );
                    continue;
                }
                let mut coordinate = spec.coordinate;
                if let Some(version) = request.managed_versions.get(&coordinate.management_key()) {
                    coordinate.version.clone_from(version);
                }
                queue.push_back(Pending {
                    coordinate,
                    global: spec.global,
                    file: None,
                    via: pending.coordinate.to_string(),
                });
            }

            tracing::trace!(target: "resolver", "Resolved {} at {}", pending.coordinate, file.display());
            resolved.push(Artifact::new(pending.coordinate).global(global).resolved_at(file));
        }

        Ok(resolved)
    }
}

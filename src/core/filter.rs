//! Composable artifact predicates.
//!
//! Every resolution path selects artifacts through an [`ArtifactFilter`]. The
//! filter is a small expression tree, so it can be built once, logged, and
//! evaluated against any number of artifacts without side effects.
//!
//! ```rust,no_run
//! use docprep_cli::core::filter::{ArtifactFilter, and, global, not, type_is};
//! use docprep_cli::core::ArtifactType;
//!
//! // Equivalent to ArtifactFilter::library_path()
//! let filter = and([type_is(ArtifactType::Library), not(global())]);
//! ```

use std::fmt;

use super::artifact::{Artifact, ArtifactType};

/// Predicate over an [`Artifact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactFilter {
    /// Packaging type equals the given type
    TypeIs(ArtifactType),
    /// Artifact is a global sentinel
    Global,
    /// Logical negation
    Not(Box<ArtifactFilter>),
    /// Logical conjunction; an empty list matches everything
    All(Vec<ArtifactFilter>),
    /// Logical disjunction; an empty list matches nothing
    Any(Vec<ArtifactFilter>),
}

impl ArtifactFilter {
    /// Filter used for library paths: `type == Library AND NOT global`.
    #[must_use]
    pub fn library_path() -> Self {
        and([type_is(ArtifactType::Library), not(global())])
    }

    /// Filter used for the external library path: global libraries only.
    #[must_use]
    pub fn external_library_path() -> Self {
        and([type_is(ArtifactType::Library), global()])
    }

    /// Evaluate the predicate. Total over every artifact.
    #[must_use]
    pub fn matches(&self, artifact: &Artifact) -> bool {
        match self {
            Self::TypeIs(expected) => artifact.artifact_type() == expected,
            Self::Global => artifact.global,
            Self::Not(inner) => !inner.matches(artifact),
            Self::All(filters) => filters.iter().all(|f| f.matches(artifact)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(artifact)),
        }
    }

    /// Matching artifacts, in input order.
    pub fn select<'a, I>(&'a self, artifacts: I) -> impl Iterator<Item = &'a Artifact> + 'a
    where
        I: IntoIterator<Item = &'a Artifact>,
        I::IntoIter: 'a,
    {
        artifacts.into_iter().filter(move |artifact| self.matches(artifact))
    }
}

impl fmt::Display for ArtifactFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeIs(t) => write!(f, "type({t})"),
            Self::Global => f.write_str("global"),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::All(filters) => write_list(f, "all", filters),
            Self::Any(filters) => write_list(f, "any", filters),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, filters: &[ArtifactFilter]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{filter}")?;
    }
    f.write_str(")")
}

/// `type == artifact_type`
#[must_use]
pub const fn type_is(artifact_type: ArtifactType) -> ArtifactFilter {
    ArtifactFilter::TypeIs(artifact_type)
}

/// `is global sentinel`
#[must_use]
pub const fn global() -> ArtifactFilter {
    ArtifactFilter::Global
}

/// `NOT filter`
#[must_use]
pub fn not(filter: ArtifactFilter) -> ArtifactFilter {
    ArtifactFilter::Not(Box::new(filter))
}

/// `AND` over all filters
pub fn and(filters: impl IntoIterator<Item = ArtifactFilter>) -> ArtifactFilter {
    ArtifactFilter::All(filters.into_iter().collect())
}

/// `OR` over all filters
pub fn or(filters: impl IntoIterator<Item = ArtifactFilter>) -> ArtifactFilter {
    ArtifactFilter::Any(filters.into_iter().collect())
}

//! The `docprep.toml` project descriptor.
//!
//! ```toml
//! [project]
//! group = "org.example"
//! artifact = "app"
//! version = "1.0.0"
//! type = "swc"
//! source-roots = ["src/main/flex"]
//! modules = ["lib", "app"]
//!
//! [[dependencies]]
//! group = "com.adobe.flex.framework"
//! artifact = "playerglobal"
//! version = "10.0"
//! type = "swc"
//! global = true
//!
//! [dependency-management]
//! "org.example:util" = "2.0.0"
//!
//! [repositories]
//! local = "~/.docprep/repository"
//! remotes = ["file:///srv/mirror"]
//!
//! [doc]
//! aggregate = true
//! ```
//!
//! Module descriptors may omit `group` and `version`; they are inherited from
//! the aggregating parent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{DocSettings, parse_config};
use crate::constants::DEFAULT_SOURCE_ROOT;
use crate::core::{ArtifactType, Coordinate};

/// A whole descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectDescriptor {
    pub project: ProjectSection,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencySpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependency_management: BTreeMap<String, String>,

    #[serde(default)]
    pub repositories: RepositoriesSection,

    #[serde(default)]
    pub doc: DocSettings,
}

impl ProjectDescriptor {
    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        parse_config(path)
    }
}

/// The `[project]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectSection {
    /// Inherited from the parent when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    pub artifact: String,

    /// Inherited from the parent when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "type", default)]
    pub artifact_type: ArtifactType,

    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<PathBuf>,

    /// Build output directory, relative to the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,

    /// Reactor members, as directories relative to this project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<PathBuf>,
}

fn default_source_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_SOURCE_ROOT)]
}

/// One `[[dependencies]]` entry, in a project descriptor or next to an
/// artifact in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    /// Baseline library supplied by the runtime
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub global: bool,

    /// Not followed when reached transitively
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl DependencySpec {
    pub const fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            global: false,
            optional: false,
        }
    }
}

/// The `[repositories]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositoriesSection {
    /// Local repository; `~` and environment variables are expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,

    /// Remote repositories (directories or `file://` URLs) in lookup order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<String>,

    /// `group:artifact[:classifier]` keys of global sentinel artifacts;
    /// the runtime baseline libraries when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinels: Option<Vec<String>>,
}

//! Artifact identity and resolution state.
//!
//! An [`Artifact`] is a [`Coordinate`] plus two pieces of resolution state:
//! the "global sentinel" flag and the resolved file location. Coordinates are
//! plain values; artifacts are produced by the project loader (direct
//! dependencies) or by a [`crate::resolver::DependencyResolver`] (transitive
//! closures).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::DocprepError;

/// Packaging type of an artifact.
///
/// Serialized as the lowercase packaging string used in descriptors and as
/// the file extension in the repository layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactType {
    /// Compiled library archive (`swc`), the only type visible on the library path
    #[default]
    Library,
    /// Runnable application bundle (`swf`)
    Application,
    /// Plain zip archive (`zip`), e.g. template bundles
    Archive,
    /// Any other packaging string
    Other(String),
}

impl ArtifactType {
    /// The packaging string, which doubles as the file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            Self::Library => "swc",
            Self::Application => "swf",
            Self::Archive => "zip",
            Self::Other(ext) => ext,
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl From<&str> for ArtifactType {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "swc" => Self::Library,
            "swf" => Self::Application,
            "zip" => Self::Archive,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for ArtifactType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for ArtifactType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.extension())
    }
}

impl<'de> Deserialize<'de> for ArtifactType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Full identity of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Group identifier, dot separated (`org.example`)
    pub group: String,
    /// Artifact identifier
    pub artifact: String,
    /// Version string
    pub version: String,
    /// Packaging type
    #[serde(rename = "type", default)]
    pub artifact_type: ArtifactType,
    /// Optional classifier distinguishing secondary artifacts of one version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Coordinate {
    /// Create an unclassified coordinate.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        artifact_type: ArtifactType,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            artifact_type,
            classifier: None,
        }
    }

    /// Attach a classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Replace the version, keeping everything else.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// `group:artifact`, the key used by managed-version overrides.
    #[must_use]
    pub fn management_key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// `group:artifact:type[:classifier]`, identity without the version.
    ///
    /// Used for nearest-wins mediation: two coordinates with the same identity
    /// key are the same dependency at (possibly) different versions.
    #[must_use]
    pub fn identity_key(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}:{}:{}:{}",
                self.group, self.artifact, self.artifact_type, classifier
            ),
            None => format!("{}:{}:{}", self.group, self.artifact, self.artifact_type),
        }
    }

    /// File name inside the repository version directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact,
                self.version,
                classifier,
                self.artifact_type.extension()
            ),
            None => format!("{}-{}.{}", self.artifact, self.version, self.artifact_type.extension()),
        }
    }

    /// Name of the descriptor listing this artifact's own dependencies.
    #[must_use]
    pub fn descriptor_name(&self) -> String {
        format!("{}-{}.toml", self.artifact, self.version)
    }

    /// Version directory relative to a repository root.
    #[must_use]
    pub fn relative_dir(&self) -> PathBuf {
        let mut dir = PathBuf::new();
        for segment in self.group.split('.') {
            dir.push(segment);
        }
        dir.push(&self.artifact);
        dir.push(&self.version);
        dir
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.artifact_type)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

impl FromStr for Coordinate {
    type Err = DocprepError;

    /// Parses `group:artifact:version`, `group:artifact:type:version` or
    /// `group:artifact:type:classifier:version`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(DocprepError::ConfigError {
                message: format!("Invalid artifact coordinate '{s}'"),
            });
        }
        match parts.as_slice() {
            [group, artifact, version] => {
                Ok(Self::new(*group, *artifact, *version, ArtifactType::default()))
            }
            [group, artifact, kind, version] => {
                Ok(Self::new(*group, *artifact, *version, parse_type(kind)))
            }
            [group, artifact, kind, classifier, version] => {
                Ok(Self::new(*group, *artifact, *version, parse_type(kind))
                    .with_classifier(*classifier))
            }
            _ => Err(DocprepError::ConfigError {
                message: format!(
                    "Invalid artifact coordinate '{s}': expected group:artifact[:type[:classifier]]:version"
                ),
            }),
        }
    }
}

fn parse_type(raw: &str) -> ArtifactType {
    ArtifactType::from(raw)
}

/// A dependency descriptor together with its resolution state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Identity
    pub coordinate: Coordinate,
    /// Marks a well-known baseline artifact that never appears on the library path
    pub global: bool,
    /// Resolved file-system location, present only after resolution
    pub file: Option<PathBuf>,
}

impl Artifact {
    /// An unresolved, non-sentinel artifact.
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            global: false,
            file: None,
        }
    }

    /// Set the sentinel flag.
    #[must_use]
    pub const fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Attach a resolved location.
    #[must_use]
    pub fn resolved_at(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The packaging type.
    #[must_use]
    pub const fn artifact_type(&self) -> &ArtifactType {
        &self.coordinate.artifact_type
    }

    /// Resolved location, or a resolution error naming the coordinate.
    pub fn location(&self) -> Result<&Path, DocprepError> {
        self.file
            .as_deref()
            .ok_or_else(|| DocprepError::resolution(&self.coordinate, "artifact has not been resolved"))
    }

    /// Whether the artifact has a resolved location.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.file.is_some()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

/// Identifies artifacts that must be treated as global sentinels.
///
/// The classifier is part of the identity: a key without a classifier matches
/// only unclassified artifacts, and a key with a classifier matches only that
/// classifier. Versions are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentinelKey {
    /// Group identifier
    pub group: String,
    /// Artifact identifier
    pub artifact: String,
    /// Classifier, compared exactly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl SentinelKey {
    /// Whether `coordinate` is identified by this key.
    #[must_use]
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group == coordinate.group
            && self.artifact == coordinate.artifact
            && self.classifier == coordinate.classifier
    }
}

impl FromStr for SentinelKey {
    type Err = DocprepError;

    /// Parses `group:artifact` or `group:artifact:classifier`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => Ok(Self {
                group: (*group).to_string(),
                artifact: (*artifact).to_string(),
                classifier: None,
            }),
            [group, artifact, classifier]
                if !group.is_empty() && !artifact.is_empty() && !classifier.is_empty() =>
            {
                Ok(Self {
                    group: (*group).to_string(),
                    artifact: (*artifact).to_string(),
                    classifier: Some((*classifier).to_string()),
                })
            }
            _ => Err(DocprepError::ConfigError {
                message: format!(
                    "Invalid sentinel '{s}': expected group:artifact or group:artifact:classifier"
                ),
            }),
        }
    }
}

//! Generator version parsing and range checks.
//!
//! Documentation generator releases are numbered with an arbitrary number of
//! dot-separated numeric components (`4.0.0.14159`), which is not semver.
//! [`GeneratorVersion`] compares component-wise with missing trailing
//! components treated as zero, so `4.0` == `4.0.0.0`.
//!
//! Version-gated behavior is expressed with [`VersionRange`], evaluated at the
//! call site:
//!
//! ```rust,no_run
//! use docprep_cli::version::{GeneratorVersion, VersionRange};
//!
//! # fn example() -> Result<(), docprep_cli::core::DocprepError> {
//! let legacy = VersionRange::at_most("4.0.0.3127".parse()?);
//! let version: GeneratorVersion = "4.0.0.2000".parse()?;
//! assert!(legacy.contains(&version));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::DocprepError;

/// A dotted numeric version such as `4.0.0.3127`.
///
/// A trailing qualifier introduced by `-` (e.g. `4.1.0-SNAPSHOT`) is kept for
/// display but ignored for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeneratorVersion {
    components: Vec<u64>,
    raw: String,
}

impl GeneratorVersion {
    /// A version from numeric components, e.g. `[4, 0, 0, 3127]`.
    #[must_use]
    pub fn from_components(components: &[u64]) -> Self {
        let raw = components.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        Self {
            components: components.to_vec(),
            raw,
        }
    }

    /// Numeric components in order.
    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The version as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for GeneratorVersion {
    type Err = DocprepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let numeric = trimmed.split_once('-').map_or(trimmed, |(head, _)| head);
        let invalid = || DocprepError::InvalidVersion {
            version: s.to_string(),
        };

        if numeric.is_empty() {
            return Err(invalid());
        }

        let components = numeric
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            components,
            raw: trimmed.to_string(),
        })
    }
}

impl TryFrom<String> for GeneratorVersion {
    type Error = DocprepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GeneratorVersion> for String {
    fn from(value: GeneratorVersion) -> Self {
        value.raw
    }
}

impl fmt::Display for GeneratorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for GeneratorVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for GeneratorVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GeneratorVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GeneratorVersion {}

/// Inclusive version range; either bound may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRange {
    min: Option<GeneratorVersion>,
    max: Option<GeneratorVersion>,
}

impl VersionRange {
    /// Every version.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Versions less than or equal to `max`.
    #[must_use]
    pub const fn at_most(max: GeneratorVersion) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Versions greater than or equal to `min`.
    #[must_use]
    pub const fn at_least(min: GeneratorVersion) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Versions within `[min, max]`.
    #[must_use]
    pub const fn between(min: GeneratorVersion, max: GeneratorVersion) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Whether `version` falls inside the range.
    #[must_use]
    pub fn contains(&self, version: &GeneratorVersion) -> bool {
        self.min.as_ref().is_none_or(|min| version >= min)
            && self.max.as_ref().is_none_or(|max| version <= max)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, &self.max) {
            (None, None) => f.write_str("*"),
            (Some(min), None) => write!(f, ">={min}"),
            (None, Some(max)) => write!(f, "<={max}"),
            (Some(min), Some(max)) => write!(f, "[{min}, {max}]"),
        }
    }
}

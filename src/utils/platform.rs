//! Platform-specific utilities and cross-platform compatibility helpers
//!
//! The documentation step cares about the host platform in exactly one place:
//! the permission repair applied after extracting the template bundle only
//! matters where the execute bit exists, and the helper script carries a
//! `.linux` suffix on Linux. [`HostPlatform`] models that distinction and can
//! be detected from the running OS or overridden from configuration.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docprep_cli::utils::platform::{HostPlatform, resolve_path};
//!
//! # fn example() -> anyhow::Result<()> {
//! let platform = HostPlatform::detect();
//! if platform.is_windows() {
//!     println!("Running on Windows");
//! }
//!
//! let repo = resolve_path("~/.docprep/repository")?;
//! println!("Repository: {}", repo.display());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::DocprepError;

/// Operating system family the generator runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    /// Windows family; has no execute bit
    Windows,
    /// Linux
    Linux,
    /// Any other Unix-like system (macOS, BSD, ...)
    Other,
}

impl HostPlatform {
    /// Platform of the running process.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Whether this is the Windows family.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Whether this is Linux.
    #[must_use]
    pub const fn is_linux(self) -> bool {
        matches!(self, Self::Linux)
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other => "other",
        })
    }
}

impl FromStr for HostPlatform {
    type Err = DocprepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "other" | "macos" | "darwin" | "unix" => Ok(Self::Other),
            _ => Err(DocprepError::ConfigError {
                message: format!("Unknown host platform '{s}' (expected windows, linux or other)"),
            }),
        }
    }
}

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Resolves a path with tilde expansion and environment variable substitution.
///
/// - `~/path` expands to `{home}/path`
/// - `$VAR/path` and `${VAR}/path` expand environment variables
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand path: {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Canonicalizes a path, with a readable error if it does not exist.
pub fn safe_canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize().with_context(|| {
        format!(
            "Failed to canonicalize path: {}\n\n\
                Possible causes:\n\
                - Path does not exist\n\
                - Permission denied\n\
                - Invalid path characters",
            path.display()
        )
    })
}

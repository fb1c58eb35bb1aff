//! Template bundle provisioning.
//!
//! The documentation generator reads its HTML templates from a directory.
//! Templates ship as a versioned zip artifact
//! (`com.adobe.flex.compiler:asdoc:zip:template:<generator-version>`) which
//! [`TemplateProvisioner::provision`] locates, extracts and fixes up:
//!
//! ```text
//! NotProvisioned ─▶ Extracting ─▶ Extracted ─┬─▶ PermissionFixed
//!                                            └─▶ PermissionFixSkipped
//! ```
//!
//! Bundles up to and including generator `4.0.0.3127` ship the helper
//! script `asDocHelper` (`asDocHelper.linux` on Linux) without the execute
//! bit. On every non-Windows host those versions get `chmod u+x` on the
//! helper after extraction. Newer bundles and Windows hosts skip the fix.
//!
//! Provisioning is idempotent: an already populated directory is extracted
//! over, and the fix is re-applied when it applies.

pub mod extract;

pub use extract::{Extractor, ZipExtractor};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{
    LEGACY_PERMISSION_FIX_MAX_VERSION, LINUX_HELPER_SUFFIX, TEMPLATE_ARTIFACT, TEMPLATE_CLASSIFIER,
    TEMPLATE_GROUP, TEMPLATE_HELPER,
};
use crate::core::{ArtifactType, Coordinate, DocprepError};
use crate::process::{ProcessCommand, ProcessRunner, run_success};
use crate::resolver::LocalRepository;
use crate::utils::{HostPlatform, ensure_dir};
use crate::version::{GeneratorVersion, VersionRange};

/// Provides the bundle archive for a coordinate.
pub trait BundleSource {
    /// Local path of the archive identified by `coordinate`.
    fn locate_bundle(&self, coordinate: &Coordinate) -> Result<PathBuf, DocprepError>;
}

impl BundleSource for LocalRepository {
    fn locate_bundle(&self, coordinate: &Coordinate) -> Result<PathBuf, DocprepError> {
        self.locate(coordinate)
    }
}

/// Where a template directory is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateState {
    NotProvisioned,
    Extracting,
    Extracted,
    PermissionFixed,
    PermissionFixSkipped,
}

impl fmt::Display for TemplateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotProvisioned => "not provisioned",
            Self::Extracting => "extracting",
            Self::Extracted => "extracted",
            Self::PermissionFixed => "permission fixed",
            Self::PermissionFixSkipped => "permission fix skipped",
        })
    }
}

/// Outcome of a successful [`TemplateProvisioner::provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedTemplate {
    /// Canonical template directory
    pub path: PathBuf,
    /// Terminal state reached
    pub state: TemplateState,
    /// Files written by the extractor
    pub files: usize,
}

/// Where the templates path comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Provision the versioned bundle into a directory
    Bundle {
        version: GeneratorVersion,
        output: PathBuf,
        platform: HostPlatform,
    },
    /// Use an existing directory as-is
    Configured(PathBuf),
}

/// Whether the helper script of `version` needs its execute bit set on `platform`.
#[must_use]
pub fn needs_permission_fix(version: &GeneratorVersion, platform: HostPlatform) -> bool {
    let legacy = VersionRange::at_most(GeneratorVersion::from_components(&LEGACY_PERMISSION_FIX_MAX_VERSION));
    !platform.is_windows() && legacy.contains(version)
}

/// Path of the helper script inside a template directory.
#[must_use]
pub fn helper_path(template_dir: &Path, platform: HostPlatform) -> PathBuf {
    let suffix = if platform.is_linux() { LINUX_HELPER_SUFFIX } else { "" };
    template_dir.join(format!("{TEMPLATE_HELPER}{suffix}"))
}

/// Coordinate of the template bundle for a generator version.
#[must_use]
pub fn bundle_coordinate(version: &GeneratorVersion) -> Coordinate {
    Coordinate::new(TEMPLATE_GROUP, TEMPLATE_ARTIFACT, version.as_str(), ArtifactType::Archive)
        .with_classifier(TEMPLATE_CLASSIFIER)
}

/// Locates, extracts and fixes up template bundles.
pub struct TemplateProvisioner<'a> {
    bundles: &'a dyn BundleSource,
    extractor: &'a dyn Extractor,
    runner: &'a dyn ProcessRunner,
}

impl<'a> TemplateProvisioner<'a> {
    pub fn new(
        bundles: &'a dyn BundleSource,
        extractor: &'a dyn Extractor,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            bundles,
            extractor,
            runner,
        }
    }

    /// Provision the bundle for `version` into `output`.
    ///
    /// # Errors
    ///
    /// - [`DocprepError::ResolutionError`] when the bundle cannot be located
    /// - [`DocprepError::ProvisioningError`] when the directory cannot be
    ///   created or the archive cannot be extracted
    /// - [`DocprepError::ExternalProcessError`] when `chmod` cannot be
    ///   launched or exits non-zero
    pub fn provision(
        &self,
        version: &GeneratorVersion,
        output: &Path,
        platform: HostPlatform,
    ) -> Result<ProvisionedTemplate, DocprepError> {
        let mut state = TemplateState::NotProvisioned;
        let coordinate = bundle_coordinate(version);
        let archive = self.bundles.locate_bundle(&coordinate)?;

        ensure_dir(output).map_err(|e| {
            DocprepError::provisioning("creating template directory", output, format!("{e:#}"))
        })?;

        transition(&mut state, TemplateState::Extracting, output);
        let files = self.extractor.extract(&archive, output)?;
        transition(&mut state, TemplateState::Extracted, output);

        let path = output.canonicalize().map_err(|e| {
            DocprepError::provisioning("resolving template directory", output, e)
        })?;

        if needs_permission_fix(version, platform) {
            let helper = helper_path(&path, platform);
            let chmod = ProcessCommand::new("chmod")
                .arg("u+x")
                .arg(helper.display().to_string())
                .with_context("template");
            run_success(self.runner, &chmod)?;
            transition(&mut state, TemplateState::PermissionFixed, output);
        } else {
            tracing::debug!(
                target: "template",
                "No permission fix needed for generator {} on {}",
                version,
                platform
            );
            transition(&mut state, TemplateState::PermissionFixSkipped, output);
        }

        tracing::info!(target: "template", "Templates for generator {} ready at {}", version, path.display());
        Ok(ProvisionedTemplate {
            path,
            state,
            files,
        })
    }

    /// Canonical templates path for `source`, provisioning when needed.
    pub fn templates_path(&self, source: &TemplateSource) -> Result<PathBuf, DocprepError> {
        match source {
            TemplateSource::Configured(path) => {
                tracing::debug!(target: "template", "Using configured templates at {}", path.display());
                path.canonicalize().map_err(|e| {
                    DocprepError::provisioning("resolving configured template path", path, e)
                })
            }
            TemplateSource::Bundle {
                version,
                output,
                platform,
            } => Ok(self.provision(version, output, *platform)?.path),
        }
    }
}

fn transition(state: &mut TemplateState, next: TemplateState, output: &Path) {
    tracing::trace!(target: "template", "{}: {} -> {}", output.display(), state, next);
    *state = next;
}

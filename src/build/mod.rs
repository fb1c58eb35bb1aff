//! Documentation build preparation.
//!
//! [`DocBuild::prepare`] decides whether documentation is generated for a
//! project at all and, when it is, assembles every derived input into a
//! [`GeneratorConfig`]:
//!
//! 1. An aggregate build runs only from the execution root; every other
//!    reactor project is skipped.
//! 2. No existing source directory means nothing to document; the build is
//!    skipped with a warning rather than failed.
//! 3. Library paths, templates and the output directory are resolved. Any
//!    failure here is fatal.
//!
//! The generator itself is not invoked here. The CLI prints the assembled
//! configuration as JSON.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::DocSettings;
use crate::constants::{DOC_OUTPUT_DIR, TEMPLATES_DIR};
use crate::core::DocprepError;
use crate::paths::{resolve_external_library_paths, resolve_library_paths, resolve_source_paths};
use crate::project::{Project, Reactor};
use crate::resolver::{DependencyResolver, RepositoryContext};
use crate::template::{TemplateProvisioner, TemplateSource};
use crate::utils::ensure_dir;

/// Why a build produced no configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Aggregate mode and this project is not the execution root
    NotExecutionRoot,
    /// No source directory exists
    NoSourcePaths,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotExecutionRoot => "aggregate mode is active and this is not the execution root",
            Self::NoSourcePaths => "source path doesn't exist",
        })
    }
}

/// Outcome of [`DocBuild::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preparation {
    Ready(Box<GeneratorConfig>),
    Skipped(SkipReason),
}

/// Everything the documentation generator is invoked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorConfig {
    pub source_path: Vec<PathBuf>,
    pub doc_sources: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc_namespaces: Vec<String>,
    pub library_path: Vec<PathBuf>,
    pub external_library_path: Vec<PathBuf>,
    pub templates_path: PathBuf,
    pub output: PathBuf,
    pub main_title: String,
    pub window_title: String,
    pub footer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lenient: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_xml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_xsl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_in_footer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_dependencies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_lookup_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_builtin_classes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_frameset_width: Option<u32>,
}

/// One documentation build step for one project.
pub struct DocBuild<'a> {
    pub project: &'a Project,
    pub reactor: Option<&'a Reactor>,
    pub settings: &'a DocSettings,
    pub resolver: &'a dyn DependencyResolver,
    pub context: &'a RepositoryContext,
    pub templates: &'a TemplateProvisioner<'a>,
}

impl DocBuild<'_> {
    /// Decide whether to build and assemble the generator configuration.
    pub fn prepare(&self) -> Result<Preparation, DocprepError> {
        let settings = self.settings;
        let project = self.project;

        if settings.aggregate && !project.execution_root {
            tracing::info!("Skipping documentation of {}, aggregate mode active", project.name());
            return Ok(Preparation::Skipped(SkipReason::NotExecutionRoot));
        }

        let source_path = resolve_source_paths(project, self.reactor, settings.aggregate);
        if source_path.is_empty() {
            tracing::warn!("Skipping documentation of {}, source path doesn't exist", project.name());
            return Ok(Preparation::Skipped(SkipReason::NoSourcePaths));
        }

        let library_path = resolve_library_paths(
            project,
            self.reactor,
            settings.aggregate,
            self.resolver,
            self.context,
        )?;
        let external_library_path = resolve_external_library_paths(project)?;

        let template_source = match &settings.template_path {
            Some(path) => TemplateSource::Configured(project.base_dir.join(path)),
            None => TemplateSource::Bundle {
                version: settings.generator_version()?,
                output: match &settings.templates_dir {
                    Some(dir) => project.base_dir.join(dir),
                    None => project.target_dir.join(TEMPLATES_DIR),
                },
                platform: settings.platform(),
            },
        };
        let templates_path = self.templates.templates_path(&template_source)?;

        let output = self.output_dir()?;

        let doc_sources = if settings.doc_sources.is_empty()
            && settings.doc_classes.is_empty()
            && settings.doc_namespaces.is_empty()
        {
            source_path.clone()
        } else {
            settings.doc_sources.iter().map(|p| project.base_dir.join(p)).collect()
        };

        let examples_path = match &settings.examples_path {
            Some(path) => Some(project.base_dir.join(path).canonicalize().map_err(|e| {
                DocprepError::provisioning("resolving examples path", path, e)
            })?),
            None => None,
        };

        tracing::debug!(
            "{}: {} source dirs, {} libraries, {} external libraries",
            project.name(),
            source_path.len(),
            library_path.len(),
            external_library_path.len()
        );

        Ok(Preparation::Ready(Box::new(GeneratorConfig {
            source_path,
            doc_sources,
            doc_classes: settings.doc_classes.clone(),
            doc_namespaces: settings.doc_namespaces.clone(),
            library_path,
            external_library_path,
            templates_path,
            output,
            main_title: settings.main_title_or(project.name()),
            window_title: settings.window_title_or(project.name()),
            footer: settings.footer(),
            examples_path,
            lenient: settings.lenient,
            keep_xml: settings.keep_xml,
            skip_xsl: settings.skip_xsl,
            date_in_footer: settings.date_in_footer,
            exclude_dependencies: settings.exclude_dependencies,
            include_lookup_only: settings.include_lookup_only,
            restore_builtin_classes: settings.restore_builtin_classes,
            left_frameset_width: settings.left_frameset_width,
        })))
    }

    /// Generator output directory, created if needed.
    fn output_dir(&self) -> Result<PathBuf, DocprepError> {
        let output = match &self.settings.output {
            Some(dir) => self.project.base_dir.join(dir),
            None => self.project.target_dir.join(DOC_OUTPUT_DIR),
        };
        ensure_dir(&output).map_err(|e| {
            DocprepError::provisioning("creating documentation output directory", &output, format!("{e:#}"))
        })?;
        output
            .canonicalize()
            .map_err(|e| DocprepError::provisioning("resolving documentation output directory", &output, e))
    }
}

//! Documentation build settings.
//!
//! Settings come from the `[doc]` table of the project descriptor and may be
//! overridden on the command line. Keys are kebab-case and every key is
//! optional:
//!
//! ```toml
//! [doc]
//! aggregate = true
//! generator-version = "4.0.0.2000"
//! main-title = "Example API"
//! footer = "Copyright Example Corp."
//! doc-namespaces = ["http://example.org/2009"]
//! lenient = true
//! ```
//!
//! Generator flags that are not set stay `None` and are omitted from the
//! emitted generator configuration, so the generator's own defaults apply.

pub mod parser;

pub use parser::parse_config;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_FOOTER, DEFAULT_GENERATOR_VERSION};
use crate::core::DocprepError;
use crate::utils::HostPlatform;
use crate::version::GeneratorVersion;

/// The `[doc]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocSettings {
    /// Document every reactor project in one run from the execution root
    pub aggregate: bool,

    /// Generator release the template bundle must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_version: Option<GeneratorVersion>,

    /// Host platform override; detected when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<HostPlatform>,

    /// Use this template directory instead of provisioning the bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// Extraction directory for the template bundle, relative to the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Generator output directory, relative to the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Fully qualified classes to document
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc_classes: Vec<String>,
    /// Namespace URIs to document
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc_namespaces: Vec<String>,
    /// Source files or directories to document; defaults to the source path
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc_sources: Vec<PathBuf>,

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

impl DocSettings {
    /// The configured generator version, or the built-in default.
    pub fn generator_version(&self) -> Result<GeneratorVersion, DocprepError> {
        match &self.generator_version {
            Some(version) => Ok(version.clone()),
            None => DEFAULT_GENERATOR_VERSION.parse(),
        }
    }

    /// The configured platform, or the running host.
    #[must_use]
    pub fn platform(&self) -> HostPlatform {
        self.platform.unwrap_or_default()
    }

    /// Main title, defaulting to `<project name> Documentation`.
    #[must_use]
    pub fn main_title_or(&self, project_name: &str) -> String {
        self.main_title.clone().unwrap_or_else(|| format!("{project_name} Documentation"))
    }

    /// Window title, defaulting to `<project name> Documentation`.
    #[must_use]
    pub fn window_title_or(&self, project_name: &str) -> String {
        self.window_title.clone().unwrap_or_else(|| format!("{project_name} Documentation"))
    }

    #[must_use]
    pub fn footer(&self) -> String {
        self.footer.clone().unwrap_or_else(|| DEFAULT_FOOTER.to_string())
    }
}

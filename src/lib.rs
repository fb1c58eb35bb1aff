//! docprep - documentation build inputs for single and multi-module projects
//!
//! A documentation generator for compiled component libraries needs four
//! things before it can run: the source directories to document, the library
//! archives the sources link against, the external (global) libraries that
//! are referenced but never linked in, and a template directory matching the
//! generator release. docprep computes all of them from a `docprep.toml`
//! project descriptor and a file-based artifact repository.
//!
//! # Architecture Overview
//!
//! - A project descriptor names the project [`core::Coordinate`], its direct
//!   dependencies, and optionally child modules. Loading it yields a
//!   [`project::Workspace`]: the current project plus the whole reactor.
//! - Every resolution path selects artifacts through composable
//!   [`core::ArtifactFilter`] predicates.
//! - Transitive resolution is hidden behind [`resolver::DependencyResolver`];
//!   [`resolver::LocalRepository`] is the file-based implementation.
//! - The template bundle is extracted by [`template::TemplateProvisioner`],
//!   which repairs the helper script's execute bit for legacy generator
//!   releases through a [`process::ProcessRunner`].
//!
//! # Core Modules
//!
//! ## Resolution
//! - [`core`] - Coordinates, artifacts, filters and the error taxonomy
//! - [`resolver`] - Transitive dependency resolution against repositories
//! - [`paths`] - Source path, library path and external library path
//!
//! ## Build Inputs
//! - [`template`] - Template bundle extraction and permission repair
//! - [`build`] - Assembly of the complete generator configuration
//! - [`process`] - External command execution
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`config`] - `[doc]` settings and TOML parsing
//! - [`project`] - Project descriptors, projects and the reactor
//! - [`utils`] - Platform detection and file system helpers
//! - [`version`] - Four-component generator versions
//!
//! # Descriptor Format (docprep.toml)
//!
//! ```toml
//! [project]
//! group = "org.example"
//! artifact = "suite"
//! version = "1.0.0"
//! type = "pom"
//! modules = ["core", "ui"]
//!
//! [[dependencies]]
//! group = "com.adobe.flex.framework"
//! artifact = "playerglobal"
//! version = "10.0"
//! type = "swc"
//!
//! [repositories]
//! local = "~/.docprep/repository"
//!
//! [doc]
//! aggregate = true
//! generator-version = "4.1.0.16076"
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! docprep sources --aggregate
//! docprep libraries
//! docprep libraries --external
//! docprep template --generator-version 4.0.0.2000
//! docprep prepare --aggregate
//! ```

// Resolution
pub mod core;
pub mod paths;
pub mod resolver;

// Build inputs
pub mod build;
pub mod process;
pub mod template;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod project;
pub mod utils;
pub mod version;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Common utilities for CLI commands

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::DocSettings;
use crate::project::{Workspace, load_workspace};
use crate::utils::HostPlatform;
use crate::version::GeneratorVersion;

/// Loaded project context shared by every command
#[derive(Debug)]
pub struct CommandContext {
    /// Project, reactor, repositories and settings from `docprep.toml`
    pub workspace: Workspace,
}

impl CommandContext {
    /// Load the project in `project_dir`, or the current directory when `None`.
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let dir = match project_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };
        tracing::debug!("Loading project from {}", dir.display());
        Ok(Self {
            workspace: load_workspace(&dir)?,
        })
    }
}

/// Setting overrides accepted by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Document every reactor project from the execution root
    #[arg(short, long)]
    pub aggregate: bool,

    /// Generator release to provision templates for
    #[arg(long, value_name = "VERSION")]
    pub generator_version: Option<GeneratorVersion>,

    /// Host platform (windows, linux, other); detected when omitted
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<HostPlatform>,

    /// Use an existing template directory instead of the bundle
    #[arg(long, value_name = "DIR")]
    pub template_path: Option<PathBuf>,
}

impl SettingsArgs {
    /// Apply the overrides on top of descriptor settings.
    pub fn apply(&self, settings: &mut DocSettings) {
        if self.aggregate {
            settings.aggregate = true;
        }
        if let Some(version) = &self.generator_version {
            settings.generator_version = Some(version.clone());
        }
        if let Some(platform) = self.platform {
            settings.platform = Some(platform);
        }
        if let Some(path) = &self.template_path {
            settings.template_path = Some(path.clone());
        }
    }
}

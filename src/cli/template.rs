//! Provision the template bundle.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::common::CommandContext;
use crate::constants::TEMPLATES_DIR;
use crate::process::SystemProcessRunner;
use crate::template::{TemplateProvisioner, ZipExtractor};
use crate::utils::HostPlatform;
use crate::version::GeneratorVersion;

/// Extract the template bundle and print its directory
#[derive(Args, Debug)]
pub struct TemplateCommand {
    /// Generator release; defaults to the descriptor setting
    #[arg(long, value_name = "VERSION")]
    generator_version: Option<GeneratorVersion>,

    /// Extraction directory; defaults to `<target>/templates`
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Host platform (windows, linux, other); detected when omitted
    #[arg(long, value_name = "PLATFORM")]
    platform: Option<HostPlatform>,
}

impl TemplateCommand {
    pub fn execute_with_project_dir(self, project_dir: Option<&Path>) -> Result<()> {
        let ctx = CommandContext::load(project_dir)?;
        let workspace = &ctx.workspace;
        let settings = &workspace.settings;

        let version = match self.generator_version {
            Some(version) => version,
            None => settings.generator_version()?,
        };
        let platform = self.platform.unwrap_or_else(|| settings.platform());
        let output = match self.output {
            Some(dir) => dir,
            None => match &settings.templates_dir {
                Some(dir) => workspace.project.base_dir.join(dir),
                None => workspace.project.target_dir.join(TEMPLATES_DIR),
            },
        };

        let repository = workspace.repository();
        let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &SystemProcessRunner);
        let provisioned = provisioner.provision(&version, &output, platform)?;

        tracing::debug!("Template state: {}", provisioned.state);
        println!("{}", provisioned.path.display());
        Ok(())
    }
}

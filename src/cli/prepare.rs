//! Assemble the generator configuration.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::common::{CommandContext, SettingsArgs};
use crate::build::{DocBuild, Preparation};
use crate::process::SystemProcessRunner;
use crate::template::{TemplateProvisioner, ZipExtractor};

/// Resolve every build input and print the generator configuration as JSON
#[derive(Args, Debug)]
pub struct PrepareCommand {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

impl PrepareCommand {
    pub fn execute_with_project_dir(self, project_dir: Option<&Path>) -> Result<()> {
        let ctx = CommandContext::load(project_dir)?;
        let workspace = &ctx.workspace;

        let mut settings = workspace.settings.clone();
        self.settings.apply(&mut settings);

        let repository = workspace.repository();
        let templates = TemplateProvisioner::new(&repository, &ZipExtractor, &SystemProcessRunner);
        let build = DocBuild {
            project: &workspace.project,
            reactor: Some(&workspace.reactor),
            settings: &settings,
            resolver: &repository,
            context: &workspace.context,
            templates: &templates,
        };

        match build.prepare()? {
            Preparation::Ready(config) => {
                let json = if self.compact {
                    serde_json::to_string(&config)?
                } else {
                    serde_json::to_string_pretty(&config)?
                };
                println!("{json}");
            }
            Preparation::Skipped(reason) => {
                println!("Skipped: {reason}");
            }
        }
        Ok(())
    }
}

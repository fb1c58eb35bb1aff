//! Print the source directories to document.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::common::CommandContext;
use crate::paths::resolve_source_paths;

/// Print source directories, one per line
#[derive(Args, Debug)]
pub struct SourcesCommand {
    /// Include every reactor project
    #[arg(short, long)]
    aggregate: bool,
}

impl SourcesCommand {
    pub fn execute_with_project_dir(self, project_dir: Option<&Path>) -> Result<()> {
        let ctx = CommandContext::load(project_dir)?;
        let workspace = &ctx.workspace;
        let aggregate = self.aggregate || workspace.settings.aggregate;

        let paths = resolve_source_paths(&workspace.project, Some(&workspace.reactor), aggregate);
        if paths.is_empty() {
            tracing::warn!("No source directories exist for {}", workspace.project.name());
        }
        for path in paths {
            println!("{}", path.display());
        }
        Ok(())
    }
}

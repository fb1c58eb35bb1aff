//! Print the library path.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::common::CommandContext;
use crate::paths::{resolve_external_library_paths, resolve_library_paths};

/// Print library archives, one per line
#[derive(Args, Debug)]
pub struct LibrariesCommand {
    /// Aggregate transitive libraries of every reactor project
    #[arg(short, long)]
    aggregate: bool,

    /// Print the external (global) library path instead
    #[arg(long, conflicts_with = "aggregate")]
    external: bool,
}

impl LibrariesCommand {
    pub fn execute_with_project_dir(self, project_dir: Option<&Path>) -> Result<()> {
        let ctx = CommandContext::load(project_dir)?;
        let workspace = &ctx.workspace;

        let paths = if self.external {
            resolve_external_library_paths(&workspace.project)?
        } else {
            let aggregate = self.aggregate || workspace.settings.aggregate;
            let repository = workspace.repository();
            resolve_library_paths(
                &workspace.project,
                Some(&workspace.reactor),
                aggregate,
                &repository,
                &workspace.context,
            )
            .with_context(|| format!("Failed to compute library path of {}", workspace.project.coordinate))?
        };

        for path in paths {
            println!("{}", path.display());
        }
        Ok(())
    }
}

//! Command-line interface for docprep.
//!
//! # Available Commands
//!
//! - `sources` - Print the source directories to document
//! - `libraries` - Print the library path (or the external library path)
//! - `template` - Provision the template bundle and print its directory
//! - `prepare` - Resolve every input and print the generator configuration
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--project <DIR>` - project directory (default: current directory)
//!
//! Logs go to stderr so stdout carries only command output. `RUST_LOG`
//! overrides the level chosen by the flags.
//!
//! ```bash
//! docprep sources --aggregate
//! docprep --project modules/app libraries
//! docprep template --generator-version 4.0.0.2000 --platform linux
//! docprep -v prepare --aggregate
//! ```

mod common;
mod libraries;
mod prepare;
mod sources;
mod template;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use common::SettingsArgs;

/// Runtime configuration derived from global flags.
///
/// Kept separate from [`Cli`] so tests can execute commands with a chosen
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter; `None` leaves logging off
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over `log_level`. Repeated calls are
    /// harmless.
    pub fn init_logging(&self) {
        let filter = match std::env::var("RUST_LOG") {
            Ok(value) if !value.is_empty() => EnvFilter::new(value),
            _ => match &self.log_level {
                Some(level) => EnvFilter::new(level),
                None => return,
            },
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(
    name = "docprep",
    about = "Compute documentation build inputs for single and multi-module projects",
    version,
    long_about = "docprep resolves the source directories, library archives and template bundle \
                  a documentation generator needs, for one project or a whole reactor."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project directory containing docprep.toml
    #[arg(short, long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the source directories to document
    Sources(sources::SourcesCommand),

    /// Print the library path
    Libraries(libraries::LibrariesCommand),

    /// Provision the template bundle
    Template(template::TemplateCommand),

    /// Print the generator configuration as JSON
    Prepare(prepare::PrepareCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("docprep_cli=debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("docprep_cli=info".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let project = self.project.as_deref();
        match self.command {
            Commands::Sources(cmd) => cmd.execute_with_project_dir(project),
            Commands::Libraries(cmd) => cmd.execute_with_project_dir(project),
            Commands::Template(cmd) => cmd.execute_with_project_dir(project),
            Commands::Prepare(cmd) => cmd.execute_with_project_dir(project),
        }
    }
}

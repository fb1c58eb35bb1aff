//! docprep CLI entry point
//!
//! Parses arguments, runs the command, and turns failures into a colored
//! error report with suggestions before exiting with status 1.
//!
//! - `sources` - source directories to document
//! - `libraries` - library path
//! - `template` - provision the template bundle
//! - `prepare` - full generator configuration as JSON

use anyhow::Result;
use clap::Parser;
use docprep_cli::cli;
use docprep_cli::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

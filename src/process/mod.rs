//! External process execution
//!
//! Provides a small builder for command lines ([`ProcessCommand`]) and the
//! [`ProcessRunner`] seam through which every subprocess is launched. The
//! production runner, [`SystemProcessRunner`], spawns the process with
//! `std::process::Command` and blocks until it exits; tests substitute a
//! recording runner.
//!
//! Failure classification:
//! - the process could not be launched → [`DocprepError::ExternalProcessError`]
//!   with `exit_code: None`
//! - the process ran and exited non-zero → [`run_success`] turns it into
//!   [`DocprepError::ExternalProcessError`] carrying the exit code
//!
//! # Examples
//!
//! ```rust,no_run
//! use docprep_cli::process::{ProcessCommand, SystemProcessRunner, run_success};
//!
//! # fn example() -> Result<(), docprep_cli::core::DocprepError> {
//! let chmod = ProcessCommand::new("chmod")
//!     .args(["u+x", "target/templates/asDocHelper.linux"])
//!     .with_context("template permissions");
//! run_success(&SystemProcessRunner, &chmod)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::process::{Command, Stdio};

use crate::core::DocprepError;

/// Builder for an external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    /// Executable name or path
    program: String,

    /// Arguments in order
    args: Vec<String>,

    /// Optional context string for log messages
    context: Option<String>,
}

impl ProcessCommand {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            context: None,
        }
    }

    /// Adds a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets a context included in debug log messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Executable name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The full command line, program first, space separated.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn log_prefix(&self) -> String {
        self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default()
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code
    pub exit_code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launches external processes.
///
/// Implementations block until the process exits. A process that cannot be
/// launched, or that is terminated without an exit code, is an
/// [`DocprepError::ExternalProcessError`] with `exit_code: None`; any exit
/// code, including non-zero, is returned as [`ProcessOutput`].
pub trait ProcessRunner {
    /// Run `command` to completion.
    fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, DocprepError>;
}

/// Runs processes on the host with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, DocprepError> {
        let start = std::time::Instant::now();
        let prefix = command.log_prefix();
        tracing::debug!(target: "process", "{}Executing command: {}", prefix, command);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| DocprepError::ExternalProcessError {
            command: command.command_line(),
            exit_code: None,
            reason: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let Some(exit_code) = output.status.code() else {
            tracing::debug!(target: "process", "{}Command terminated by signal", prefix);
            return Err(DocprepError::ExternalProcessError {
                command: command.command_line(),
                exit_code: None,
                reason: format!("terminated without an exit code ({})", output.status),
            });
        };

        if exit_code != 0 {
            tracing::debug!(target: "process", "{}Command failed with exit code: {}", prefix, exit_code);
            if !stderr.is_empty() {
                tracing::debug!(target: "process", "{}Error: {}", prefix, stderr.trim());
            }
        } else if !stdout.is_empty() {
            tracing::debug!(target: "process", "{}{}", prefix, stdout.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            tracing::debug!(target: "process::perf", "{}{} took {}ms", prefix, command.program, elapsed.as_millis());
        }

        Ok(ProcessOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

/// Run `command` and require a zero exit code.
///
/// Exactly one attempt is made.
pub fn run_success(
    runner: &dyn ProcessRunner,
    command: &ProcessCommand,
) -> Result<ProcessOutput, DocprepError> {
    let output = runner.run(command)?;
    if output.success() {
        Ok(output)
    } else {
        Err(DocprepError::ExternalProcessError {
            command: command.command_line(),
            exit_code: Some(output.exit_code),
            reason: output.stderr.trim().to_string(),
        })
    }
}

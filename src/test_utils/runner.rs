//! A process runner that records commands instead of running them.

use std::sync::Mutex;

use crate::core::DocprepError;
use crate::process::{ProcessCommand, ProcessOutput, ProcessRunner};

/// Records every command and answers with a fixed exit code.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_code: i32,
    spawn_error: bool,
    commands: Mutex<Vec<ProcessCommand>>,
}

impl RecordingRunner {
    /// Every command exits 0.
    pub fn succeeding() -> Self {
        Self::exiting_with(0)
    }

    /// Every command exits with `exit_code`.
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    /// Every command fails to launch.
    pub fn failing_to_spawn() -> Self {
        Self {
            spawn_error: true,
            ..Self::default()
        }
    }

    /// Recorded command lines in call order.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.lock().unwrap().iter().map(ProcessCommand::command_line).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, DocprepError> {
        self.commands.lock().unwrap().push(command.clone());
        if self.spawn_error {
            return Err(DocprepError::ExternalProcessError {
                command: command.command_line(),
                exit_code: None,
                reason: "No such file or directory (os error 2)".to_string(),
            });
        }
        Ok(ProcessOutput {
            exit_code: self.exit_code,
            stdout: String::new(),
            stderr: if self.exit_code == 0 { String::new() } else { "operation not permitted".to_string() },
        })
    }
}

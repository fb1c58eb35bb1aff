//! Error handling for docprep
//!
//! This module provides the typed error taxonomy for the resolution and
//! provisioning core, plus user-friendly error reporting for the CLI. The
//! error system follows two rules:
//! 1. **Strongly-typed errors** flow unwrapped out of every core operation
//! 2. **User-friendly messages** with actionable suggestions are produced only
//!    at the CLI boundary
//!
//! # Error Categories
//!
//! - **Resolution**: [`DocprepError::ResolutionError`] - a dependency coordinate
//!   could not be resolved; aborts the whole call
//! - **Provisioning**: [`DocprepError::ProvisioningError`] - archive extraction or
//!   directory creation failed
//! - **External processes**: [`DocprepError::ExternalProcessError`] - the
//!   permission-fix subprocess failed to spawn or exited non-zero
//! - **Descriptors and configuration**: [`DocprepError::DescriptorNotFound`],
//!   [`DocprepError::DescriptorParseError`], [`DocprepError::ConfigError`],
//!   [`DocprepError::InvalidVersion`]
//!
//! An empty source path is deliberately *not* an error. The build driver
//! reports it as [`crate::build::Preparation::Skipped`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use docprep_cli::core::{DocprepError, user_friendly_error};
//!
//! let error = DocprepError::ResolutionError {
//!     coordinate: "org.example:util:swc:1.0.0".to_string(),
//!     reason: "not found in any repository".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for docprep operations
///
/// Core operations return `Result<T, DocprepError>` so that fatal kinds reach
/// the immediate caller unchanged. Nothing in the core retries.
#[derive(Error, Debug)]
pub enum DocprepError {
    /// A declared or transitive dependency coordinate could not be resolved
    ///
    /// # Fields
    /// - `coordinate`: The offending coordinate (`group:artifact:type[:classifier]:version`)
    /// - `reason`: Why resolution failed
    #[error("Failed to resolve dependency {coordinate}: {reason}")]
    ResolutionError {
        /// The coordinate that could not be resolved
        coordinate: String,
        /// Why resolution failed
        reason: String,
    },

    /// Template provisioning failed
    ///
    /// Raised when the destination directory cannot be created or the bundle
    /// archive cannot be extracted (corrupt archive, unwritable destination,
    /// entries escaping the destination).
    #[error("Provisioning failed while {operation} at {path}: {reason}")]
    ProvisioningError {
        /// The provisioning step that failed (e.g., "extracting template bundle")
        operation: String,
        /// Path involved in the failure
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// External process failed to spawn or returned a non-zero exit code
    ///
    /// `exit_code` is `None` when the process could not be launched at all.
    #[error("Unable to execute {command}. Return value = {}", display_exit_code(.exit_code))]
    ExternalProcessError {
        /// The full command line
        command: String,
        /// Exit code, if the process ran
        exit_code: Option<i32>,
        /// Spawn error or captured stderr
        reason: String,
    },

    /// Project descriptor (docprep.toml) not found
    #[error("Project descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path where the descriptor was expected
        path: String,
    },

    /// Project or artifact descriptor parsing error
    #[error("Invalid descriptor syntax in {file}")]
    DescriptorParseError {
        /// Path to the descriptor that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Generator version string could not be parsed
    #[error("Invalid generator version: {version}")]
    InvalidVersion {
        /// The version string that failed to parse
        version: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl DocprepError {
    /// Shorthand for a [`DocprepError::ResolutionError`].
    pub fn resolution(coordinate: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::ResolutionError {
            coordinate: coordinate.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`DocprepError::ProvisioningError`].
    pub fn provisioning(
        operation: impl Into<String>,
        path: &std::path::Path,
        reason: impl fmt::Display,
    ) -> Self {
        Self::ProvisioningError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

fn display_exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`DocprepError`] with an optional suggestion and details for CLI
/// display.
///
/// ```rust,no_run
/// use docprep_cli::core::{DocprepError, ErrorContext};
///
/// let context = ErrorContext::new(DocprepError::DescriptorNotFound {
///     path: "docprep.toml".to_string(),
/// })
/// .with_suggestion("Create a docprep.toml in your project directory");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying docprep error
    pub error: DocprepError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`DocprepError`]
    #[must_use]
    pub const fn new(error: DocprepError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`DocprepError`] (also when wrapped in `anyhow` context),
/// [`std::io::Error`] and [`toml::de::Error`]. Anything else is reported with
/// its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let headline = error.to_string();

    let error = match error.downcast::<DocprepError>() {
        Ok(docprep_error) => {
            let ctx = create_error_context(docprep_error);
            // Keep the caller's context line when the typed error was wrapped
            return if ctx.details.is_none() && !chain.is_empty() {
                ctx.with_details(headline)
            } else {
                ctx
            };
        }
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DocprepError::Other {
                    message: headline,
                })
                .with_suggestion("Check ownership and permissions of the output and repository directories")
                .with_details("docprep could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DocprepError::Other {
                    message: headline,
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DocprepError::DescriptorParseError {
            file: "docprep.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your docprep.toml file. Verify quotes, brackets, and key names");
    }

    let mut message = headline;
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DocprepError::Other {
        message,
    })
}

/// Map each [`DocprepError`] variant to a context with tailored suggestions.
fn create_error_context(error: DocprepError) -> ErrorContext {
    match &error {
        DocprepError::ResolutionError {
            coordinate,
            ..
        } => {
            let suggestion = format!(
                "Check that {coordinate} is installed in the local repository or available from one of the configured remotes"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Library path resolution never returns a partial result; fix the missing coordinate and rerun")
        }

        DocprepError::ProvisioningError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Verify the template bundle archive is intact and the output directory is writable")
            .with_details("The template bundle must be extracted before the documentation generator can run"),

        DocprepError::ExternalProcessError {
            exit_code: None,
            ..
        } => ErrorContext::new(error)
            .with_suggestion(if cfg!(windows) {
                "The permission fix is not needed on Windows; set platform = \"windows\" under [doc]"
            } else {
                "Ensure 'chmod' is available in your PATH"
            })
            .with_details("The permission-fix process could not be launched"),

        DocprepError::ExternalProcessError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the permissions of the extracted template directory")
            .with_details("Older generator releases ship a helper script without the execute bit; docprep repairs it with chmod"),

        DocprepError::DescriptorNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create a docprep.toml in the project directory or pass --project <path>"),

        DocprepError::DescriptorParseError {
            file,
            reason,
        } => {
            let suggestion = format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, unknown keys"
            );
            let details = reason.clone();
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }

        DocprepError::InvalidVersion {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Generator versions are dotted numbers, e.g. 4.0.0.14159"),

        _ => ErrorContext::new(error),
    }
}

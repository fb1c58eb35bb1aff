//! Test utilities for docprep
//!
//! Helpers shared by unit tests and the integration suite (enable the
//! `test-utils` feature to use them from `tests/`):
//! - [`RepositoryFixture`] - artifact repository on disk with descriptors
//! - [`ProjectFixture`] - project directory with a `docprep.toml`
//! - [`write_zip`] - template bundle archives
//! - [`RecordingRunner`] - process runner that records instead of executing
//!
//! # Example
//!
//! ```rust,no_run
//! use docprep_cli::core::{ArtifactType, Coordinate};
//! use docprep_cli::test_utils::RepositoryFixture;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let repo = RepositoryFixture::new(temp.path().join("repo"));
//! repo.install(&Coordinate::new("org.example", "util", "1.0", ArtifactType::Library), &[]);
//! ```

pub mod fixtures;
pub mod runner;

pub use fixtures::{ProjectFixture, RepositoryFixture, write_zip, write_zip_with_mode};
pub use runner::RecordingRunner;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initializes the tracing subscriber once per process, regardless of how
/// many times it's called. Uses `level` when given, otherwise `RUST_LOG`;
/// with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=docprep_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true) // Show targets like "resolver" and "template"
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

//! Integration test suite for docprep
//!
//! End-to-end tests over real project directories, a real file-based
//! repository and, for the CLI tests, the compiled `docprep` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **source_paths**: per-project and aggregate source path resolution
//! - **library_paths**: transitive library aggregation over a reactor
//! - **template**: bundle extraction and the helper permission fix
//! - **cli**: command output and exit codes

mod common;

mod cli;
mod library_paths;
mod source_paths;
mod template;

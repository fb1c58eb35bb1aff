//! Derived build inputs: source directories and library archives.
//!
//! - [`source`] - compile-source roots of one project or a whole reactor
//! - [`library`] - library archives, from direct dependencies or aggregated
//!   transitive closures

pub mod library;
pub mod source;

pub use library::{resolve_external_library_paths, resolve_library_paths};
pub use source::resolve_source_paths;

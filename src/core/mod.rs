//! Core types and error handling for docprep
//!
//! This module holds the pieces every other module builds on:
//!
//! - [`error`] - the [`DocprepError`] taxonomy and CLI error presentation
//! - [`artifact`] - [`Coordinate`], [`ArtifactType`] and resolved [`Artifact`]s
//! - [`filter`] - composable [`ArtifactFilter`] predicates used by every
//!   resolution path

pub mod artifact;
pub mod error;
pub mod filter;

pub use artifact::{Artifact, ArtifactType, Coordinate, SentinelKey};
pub use error::{DocprepError, ErrorContext, user_friendly_error};
pub use filter::ArtifactFilter;

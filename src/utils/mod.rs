//! Cross-platform utilities and helpers
//!
//! - [`fs`] - Directory creation, existence filtering and copying
//! - [`platform`] - Host platform detection and path resolution

pub mod fs;
pub mod platform;

pub use fs::{ensure_dir, existing_paths};
pub use platform::{HostPlatform, is_windows, resolve_path, safe_canonicalize};

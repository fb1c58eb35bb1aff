//! File system helpers shared by the resolvers and the template provisioner.
//!
//! Directory creation is tolerant of "already exists", so every caller can
//! call [`ensure_dir`] unconditionally.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Returns
///
/// - `Ok(())` if the directory exists or was successfully created
/// - `Err` if the path exists but is not a directory, or creation fails
///
/// # Examples
///
/// ```rust,no_run
/// use docprep_cli::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("target/templates"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check that the path length is < 260 chars or that long path support is enabled"
            } else {
                "Check directory permissions and path validity"
            };

            format!("Failed to create directory: {}\n\n{}", path.display(), platform_help)
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Keeps the paths that exist on disk, in input order.
///
/// Relative paths are interpreted against `base`.
#[must_use]
pub fn existing_paths<P: AsRef<Path>>(base: &Path, paths: &[P]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            if p.is_absolute() { p.to_path_buf() } else { base.join(p) }
        })
        .filter(|p| p.exists())
        .collect()
}

/// Copies a file, creating the destination's parent directories.
///
/// The content is written to a temporary file next to `dst`, synced, and
/// renamed into place, so `dst` is either absent or complete. A failed copy
/// leaves nothing behind.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut source =
        fs::File::open(src).with_context(|| format!("Failed to open {}", src.display()))?;
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;

    io::copy(&mut source, temp.as_file_mut())
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(dst)
        .with_context(|| format!("Failed to move temp file to {}", dst.display()))?;
    Ok(())
}

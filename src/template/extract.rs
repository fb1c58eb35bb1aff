//! Archive extraction.
//!
//! The extractor overwrites whatever is already at the destination, so
//! extracting the same bundle twice leaves the same tree. Entries whose names
//! would land outside the destination (absolute paths, `..` components) fail
//! the whole extraction before anything outside is touched.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::core::DocprepError;
use crate::utils::fs::{ensure_dir, ensure_parent_dir};

/// Unpacks an archive into a directory.
pub trait Extractor {
    /// Extract `archive` into `destination`, returning the number of files written.
    fn extract(&self, archive: &Path, destination: &Path) -> Result<usize, DocprepError>;
}

/// Zip archive extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl Extractor for ZipExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<usize, DocprepError> {
        let fail = |reason: &dyn std::fmt::Display| {
            DocprepError::provisioning(
                format!("extracting {}", archive.display()),
                destination,
                reason,
            )
        };

        let file = File::open(archive).map_err(|e| fail(&e))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| fail(&e))?;

        // Every name is checked before anything is written.
        for index in 0..zip.len() {
            let entry = zip.by_index_raw(index).map_err(|e| fail(&e))?;
            if entry.enclosed_name().is_none() {
                return Err(fail(&format!("entry '{}' escapes the destination", entry.name())));
            }
        }

        let mut written = 0;
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| fail(&e))?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(fail(&format!("entry '{}' escapes the destination", entry.name())));
            };
            let target = destination.join(relative);

            if entry.is_dir() {
                ensure_dir(&target).map_err(|e| fail(&format!("{e:#}")))?;
                continue;
            }

            ensure_parent_dir(&target).map_err(|e| fail(&format!("{e:#}")))?;
            // An earlier extraction may have left the file read-only.
            match std::fs::remove_file(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(fail(&e)),
            }
            let mut out = File::create(&target).map_err(|e| fail(&e))?;
            io::copy(&mut entry, &mut out).map_err(|e| fail(&e))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&target, std::fs::Permissions::from_mode(mode & 0o7777))
                        .map_err(|e| fail(&e))?;
                }
            }

            tracing::trace!(target: "template", "Extracted {}", target.display());
            written += 1;
        }

        tracing::debug!(
            target: "template",
            "Extracted {} files from {} into {}",
            written,
            archive.display(),
            destination.display()
        );
        Ok(written)
    }
}

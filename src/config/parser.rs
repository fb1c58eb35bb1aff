//! TOML descriptor parsing with file path context.
//!
//! Both the project descriptor (`docprep.toml`) and anything else read from
//! disk as TOML go through [`parse_config`], so a missing file and a syntax
//! error are reported the same way everywhere:
//!
//! ```text
//! Invalid descriptor syntax in /work/app/docprep.toml
//! Caused by:
//!     TOML parse error at line 3, column 7
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::DocprepError;

/// Parse a TOML file into `T`.
///
/// A missing file is [`DocprepError::DescriptorNotFound`]; invalid syntax or
/// a structure that does not match `T` is [`DocprepError::DescriptorParseError`].
/// Both are wrapped with the file path as context.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if !path.is_file() {
        return Err(DocprepError::DescriptorNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .map_err(|e| DocprepError::DescriptorParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
        .with_context(|| {
            format!(
                "Invalid TOML syntax in {}\n\n\
                Common TOML syntax errors:\n\
                - Missing quotes around strings\n\
                - Unmatched brackets [ ] or braces {{ }}\n\
                - Misspelled keys (descriptor keys are kebab-case)",
                path.display()
            )
        })?;

    Ok(config)
}

//! Global constants used throughout the docprep codebase.
//!
//! Coordinates of the template bundle, the legacy permission-fix gate, and
//! default file names and directories.

/// Project descriptor file name.
pub const DESCRIPTOR_FILE: &str = "docprep.toml";

/// Default compile-source root of a project, relative to its base directory.
pub const DEFAULT_SOURCE_ROOT: &str = "src/main/flex";

/// Default build output directory, relative to the project base directory.
pub const DEFAULT_TARGET_DIR: &str = "target";

/// Directory under the target directory where the template bundle is extracted.
pub const TEMPLATES_DIR: &str = "templates";

/// Directory under the target directory where the generator writes its output.
pub const DOC_OUTPUT_DIR: &str = "asdoc";

/// Default local repository location.
pub const DEFAULT_LOCAL_REPOSITORY: &str = "~/.docprep/repository";

/// Group of the template bundle artifact.
pub const TEMPLATE_GROUP: &str = "com.adobe.flex.compiler";

/// Artifact id of the template bundle artifact.
pub const TEMPLATE_ARTIFACT: &str = "asdoc";

/// Classifier of the template bundle artifact.
pub const TEMPLATE_CLASSIFIER: &str = "template";

/// Newest generator release whose template bundle ships the helper script
/// without the execute bit. Inclusive.
pub const LEGACY_PERMISSION_FIX_MAX_VERSION: [u64; 4] = [4, 0, 0, 3127];

/// Helper script inside the template bundle that needs the execute bit.
pub const TEMPLATE_HELPER: &str = "asDocHelper";

/// Suffix of the helper script on Linux.
pub const LINUX_HELPER_SUFFIX: &str = ".linux";

/// Generator version used when the descriptor does not name one.
pub const DEFAULT_GENERATOR_VERSION: &str = "4.1.0.16076";

/// Footer used when the descriptor does not set one.
pub const DEFAULT_FOOTER: &str = "Generated by docprep";

/// Baseline libraries provided by the runtime, never placed on the library path.
pub const DEFAULT_SENTINELS: &[&str] =
    &["com.adobe.flex.framework:playerglobal", "com.adobe.flex.framework:airglobal"];

//! Test fixtures for repositories, projects and archives
//!
//! Fixtures write real files into a caller-owned directory so tests exercise
//! the same file-system code paths as the CLI.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::DESCRIPTOR_FILE;
use crate::core::Coordinate;
use crate::project::DependencySpec;
use crate::resolver::RepositoryContext;

/// A repository directory populated by tests.
#[derive(Clone, Debug)]
pub struct RepositoryFixture {
    root: PathBuf,
}

#[derive(serde::Serialize)]
struct DescriptorFile<'a> {
    dependencies: &'a [DependencySpec],
}

impl RepositoryFixture {
    /// Creates the repository root if needed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        fs::create_dir_all(&root).expect("create repository root");
        Self {
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A context with this repository as the local repository and no sentinels.
    pub fn context(&self) -> RepositoryContext {
        RepositoryContext::local(&self.root)
    }

    /// Where `coordinate` lives in this repository.
    pub fn path_for(&self, coordinate: &Coordinate) -> PathBuf {
        self.root.join(coordinate.relative_dir()).join(coordinate.file_name())
    }

    /// Install an artifact with dummy content and, when `dependencies` is not
    /// empty, a descriptor listing them as `(coordinate, global, optional)`.
    pub fn install(&self, coordinate: &Coordinate, dependencies: &[(Coordinate, bool, bool)]) -> PathBuf {
        let path = self.path_for(coordinate);
        fs::create_dir_all(path.parent().expect("artifact has a parent")).expect("create version dir");
        fs::write(&path, coordinate.to_string()).expect("write artifact");

        if !dependencies.is_empty() {
            let specs: Vec<DependencySpec> = dependencies
                .iter()
                .map(|(coordinate, global, optional)| DependencySpec {
                    coordinate: coordinate.clone(),
                    global: *global,
                    optional: *optional,
                })
                .collect();
            let content = toml::to_string(&DescriptorFile {
                dependencies: &specs,
            })
            .expect("serialize descriptor");
            let descriptor = self.root.join(coordinate.relative_dir()).join(coordinate.descriptor_name());
            fs::write(descriptor, content).expect("write descriptor");
        }

        path
    }
}

/// Builds a project directory with a descriptor and source roots.
#[derive(Clone, Debug)]
pub struct ProjectFixture {
    dir: PathBuf,
}

impl ProjectFixture {
    /// Writes `descriptor` as the project descriptor in `dir`.
    pub fn new(dir: impl Into<PathBuf>, descriptor: &str) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).expect("create project dir");
        fs::write(dir.join(DESCRIPTOR_FILE), descriptor).expect("write descriptor");
        Self {
            dir,
        }
    }

    /// Creates a source directory relative to the project.
    pub fn with_source_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.dir.join(relative)).expect("create source dir");
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Writes a zip archive; names ending in `/` become directory entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let with_mode: Vec<(&str, &str, u32)> =
        entries.iter().map(|(name, content)| (*name, *content, 0o644)).collect();
    write_zip_with_mode(path, &with_mode);
}

/// Writes a zip archive with explicit unix permissions per entry.
pub fn write_zip_with_mode(path: &Path, entries: &[(&str, &str, u32)]) {
    let file = fs::File::create(path).expect("create archive");
    let mut writer = zip::ZipWriter::new(file);

    for (name, content, mode) in entries {
        let options = zip::write::SimpleFileOptions::default().unix_permissions(*mode);
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add directory entry");
        } else {
            writer.start_file(*name, options).expect("start file entry");
            writer.write_all(content.as_bytes()).expect("write file entry");
        }
    }

    writer.finish().expect("finish archive");
}

// Shared helpers for integration tests.
//
// Provides temporary module directories and a fluent builder so each
// integration test can lay out template trees without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use recurse_directory::config::SearchPath;

/// A temporary module path entry backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct ModuleDir {
    /// Temporary directory acting as one module path entry.
    pub root: tempfile::TempDir,
}

impl ModuleDir {
    /// Create an empty module path entry.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of the module path entry.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of `<module>/templates` inside this entry.
    pub fn templates(&self, module: &str) -> PathBuf {
        self.root.path().join(module).join("templates")
    }

    /// Write a template at `<module>/templates/<relative>`.
    pub fn with_template(self, module: &str, relative: &str, content: &str) -> Self {
        let path = self.templates(module).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create template parent");
        }
        std::fs::write(&path, content).expect("write template");
        self
    }

    /// Create an (empty) directory at `<module>/templates/<relative>`.
    pub fn with_dir(self, module: &str, relative: &str) -> Self {
        std::fs::create_dir_all(self.templates(module).join(relative)).expect("create dir");
        self
    }
}

/// A search path made of the given module directories, in order.
pub fn search_path(dirs: &[&ModuleDir]) -> SearchPath {
    SearchPath::new(dirs.iter().map(|d| d.path()))
}

//! First-match resolution of a source reference against the module path.
use std::path::{Path, PathBuf};

use crate::config::SearchPath;
use crate::error::ResolutionError;
use crate::source::SourceReference;

/// The template directory a reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    base: PathBuf,
    search_path: String,
    path: PathBuf,
}

impl ResolvedRoot {
    /// The module path entry that contained the reference.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The rewritten `module/templates/sub/path` relative to [`Self::base`].
    #[must_use]
    pub fn search_path(&self) -> &str {
        &self.search_path
    }

    /// Full path of the template directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Find the first module path entry under which `reference` exists as a
/// directory.
///
/// # Errors
///
/// Returns [`ResolutionError::EmptySearchPath`] when there is nothing to
/// search and [`ResolutionError::NotFound`] when no entry matches.
pub fn resolve(
    reference: &SourceReference,
    candidates: &SearchPath,
) -> Result<ResolvedRoot, ResolutionError> {
    let search_path = reference.search_path();
    if candidates.is_empty() {
        return Err(ResolutionError::EmptySearchPath { search_path });
    }

    for base in candidates.iter() {
        let path = base.join(&search_path);
        if path.is_dir() {
            tracing::debug!(
                "template path {search_path} found in {}, using it as module dir",
                base.display()
            );
            return Ok(ResolvedRoot {
                base: base.to_path_buf(),
                search_path,
                path,
            });
        }
        tracing::debug!(
            "template path {search_path} not found in {}, trying next module path",
            base.display()
        );
    }

    Err(ResolutionError::NotFound {
        search_path,
        candidates: candidates.entries().to_vec(),
    })
}

//! Ordered module search path.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Separator between entries of a module path string.
pub const SEPARATOR: char = ':';

/// Environment variable consulted when no module path is given explicitly.
pub const ENV_VAR: &str = "RECURSE_MODULEPATH";

/// Ordered list of base directories searched for module templates.
///
/// Order is priority: the first entry containing a reference wins.
///
/// # Examples
///
/// ```
/// use recurse_directory::config::SearchPath;
/// use std::path::Path;
///
/// let search = SearchPath::parse("/etc/puppet/modules:/usr/share/puppet/modules");
/// assert_eq!(search.len(), 2);
/// assert_eq!(search.iter().next(), Some(Path::new("/etc/puppet/modules")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    /// Build a search path from explicit entries, keeping their order.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a `:`-separated module path. Empty segments are dropped.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(SEPARATOR).filter(|s| !s.is_empty()))
    }

    /// Resolve the search path from an explicit argument, the
    /// [`ENV_VAR`] environment variable, or the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback current directory cannot be read.
    pub fn from_args(explicit: Option<&str>) -> Result<Self> {
        if let Some(value) = explicit {
            return Ok(Self::parse(value));
        }

        if let Ok(value) = std::env::var(ENV_VAR) {
            return Ok(Self::parse(&value));
        }

        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Ok(Self::new([cwd]))
    }

    /// Iterate over entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// The entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the search path has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn parse_keeps_order() {
        let search = SearchPath::parse("/a:/b:/c");
        let entries: Vec<&Path> = search.iter().collect();
        assert_eq!(
            entries,
            vec![Path::new("/a"), Path::new("/b"), Path::new("/c")]
        );
    }

    #[test]
    fn parse_drops_empty_segments() {
        let search = SearchPath::parse(":/a::/b:");
        assert_eq!(search.entries(), &[PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn parse_empty_string_is_empty() {
        assert!(SearchPath::parse("").is_empty());
    }

    #[test]
    fn explicit_argument_wins_over_env() {
        let _lock = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::set_var(ENV_VAR, "/from/env");
        }
        let search = SearchPath::from_args(Some("/explicit"));
        unsafe {
            std::env::remove_var(ENV_VAR);
        }
        assert_eq!(search.unwrap().entries(), &[PathBuf::from("/explicit")]);
    }

    #[test]
    fn env_var_is_used_without_argument() {
        let _lock = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::set_var(ENV_VAR, "/one:/two");
        }
        let search = SearchPath::from_args(None);
        unsafe {
            std::env::remove_var(ENV_VAR);
        }
        assert_eq!(search.unwrap().len(), 2);
    }

    #[test]
    fn falls_back_to_current_directory() {
        let _lock = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::remove_var(ENV_VAR);
        }
        let search = SearchPath::from_args(None).unwrap();
        assert_eq!(search.entries(), &[std::env::current_dir().unwrap()]);
    }
}

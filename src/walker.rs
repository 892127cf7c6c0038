//! Lazy, deterministic traversal of a resolved template tree.
use std::fmt;
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::WalkError;

/// Whether a walked entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Anything that is not a directory; rendered as a template.
    File,
    /// A directory.
    Directory,
}

/// One entry strictly below the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    relative: String,
    kind: EntryKind,
    path: PathBuf,
}

impl TreeEntry {
    /// Path relative to the walk root, `/`-separated, never empty.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// File or directory.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Absolute path of the entry on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative)
    }
}

/// Walk every file and directory below `root`, depth first, siblings in
/// file-name order.
///
/// The root itself is never yielded. Symbolic links are not followed; a link
/// to a directory is reported as a directory without descending into it.
/// Traversal errors are yielded in place and the caller decides whether to
/// stop.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<TreeEntry, WalkError>> + use<> {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => to_tree_entry(&root, &entry),
            Err(source) => Some(Err(WalkError::Traverse {
                root: root.clone(),
                source,
            })),
        })
}

/// Convert a walkdir entry, dropping anything without a usable relative path.
///
/// A name that is not valid UTF-8 is an error: it has no faithful
/// destination path.
fn to_tree_entry(root: &Path, entry: &DirEntry) -> Option<Result<TreeEntry, WalkError>> {
    let relative = entry.path().strip_prefix(root).ok()?;
    if !is_named(relative) {
        return None;
    }
    let Some(relative) = relative_path(relative) else {
        return Some(Err(WalkError::NonUtf8Name {
            path: entry.path().to_path_buf(),
        }));
    };
    let is_dir = entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir());
    Some(Ok(TreeEntry {
        relative,
        kind: if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
        path: entry.path().to_path_buf(),
    }))
}

/// Whether the last component of `path` is a real name rather than `.` or `..`.
fn is_named(path: &Path) -> bool {
    matches!(path.components().next_back(), Some(Component::Normal(_)))
}

/// Join the normal components of `path` with `/`.
///
/// Returns `None` if any component is not valid UTF-8.
fn relative_path(path: &Path) -> Option<String> {
    let parts = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<&str>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn collect(root: &Path) -> Vec<(String, EntryKind)> {
        walk(root)
            .map(|e| {
                let e = e.unwrap();
                (e.relative().to_string(), e.kind())
            })
            .collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("z.conf.erb"), "z").unwrap();
        std::fs::write(dir.path().join("a/one.erb"), "1").unwrap();
        std::fs::write(dir.path().join("b/nested/two"), "2").unwrap();
        dir
    }

    #[test]
    fn yields_every_entry_below_root_in_order() {
        let dir = fixture();
        assert_eq!(
            collect(dir.path()),
            vec![
                ("a".to_string(), EntryKind::Directory),
                ("a/one.erb".to_string(), EntryKind::File),
                ("b".to_string(), EntryKind::Directory),
                ("b/nested".to_string(), EntryKind::Directory),
                ("b/nested/two".to_string(), EntryKind::File),
                ("z.conf.erb".to_string(), EntryKind::File),
            ]
        );
    }

    #[test]
    fn root_is_never_yielded() {
        let dir = fixture();
        assert!(walk(dir.path()).all(|e| !e.unwrap().relative().is_empty()));
    }

    #[test]
    fn empty_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(walk(dir.path()).count(), 0);
    }

    #[test]
    fn order_is_stable_across_walks() {
        let dir = fixture();
        assert_eq!(collect(dir.path()), collect(dir.path()));
    }

    #[test]
    fn entry_path_is_absolute_location() {
        let dir = fixture();
        let entries: Vec<TreeEntry> = walk(dir.path()).map(Result::unwrap).collect();
        assert_eq!(entries[1].path(), dir.path().join("a/one.erb"));
        assert_eq!(entries[1].to_string(), "a/one.erb");
    }

    #[test]
    fn missing_root_yields_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let results: Vec<_> = walk(&missing).collect();
        assert_eq!(results.len(), 1);
        match results.into_iter().next().unwrap().unwrap_err() {
            WalkError::Traverse { root, .. } => assert_eq!(root, missing),
            other => panic!("expected a traversal error, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt as _;

        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"a\xff.erb"));
        std::fs::write(&bad, "one").unwrap();
        std::fs::write(dir.path().join(OsStr::from_bytes(b"a\xfe.erb")), "two").unwrap();
        std::fs::write(dir.path().join("b.erb"), "ok").unwrap();

        let errors: Vec<WalkError> = walk(dir.path()).filter_map(Result::err).collect();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, WalkError::NonUtf8Name { path } if *path == bad)));
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_is_a_directory_but_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::fs::write(dir.path().join("real/file"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = collect(dir.path());
        assert!(entries.contains(&("link".to_string(), EntryKind::Directory)));
        assert!(!entries.iter().any(|(rel, _)| rel == "link/file"));
    }

    #[test]
    fn dot_entries_are_not_named() {
        assert!(!is_named(Path::new("")));
        assert!(!is_named(Path::new(".")));
        assert!(!is_named(Path::new("a/..")));
        assert!(is_named(Path::new("a/b")));
    }

    #[test]
    fn relative_path_joins_with_slash() {
        assert_eq!(relative_path(Path::new("a/b/c.erb")), Some("a/b/c.erb".to_string()));
    }
}

//! Declarative file and directory resources.
//!
//! Each walked [`TreeEntry`] becomes one [`ResourceDescriptor`] keyed by its
//! destination path. Descriptors only describe the desired state; applying
//! them is left to the consuming configuration engine.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::walker::{EntryKind, TreeEntry};

/// Suffix marking a template file; stripped from destination file names.
pub const TEMPLATE_SUFFIX: &str = ".erb";

/// Mode given to files when none is requested.
pub const DEFAULT_FILE_MODE: &str = "0600";

/// All descriptors produced by one invocation, keyed by destination path.
pub type OutputMapping = BTreeMap<String, ResourceDescriptor>;

/// Ownership and modes requested for generated resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// File mode; empty or absent means [`DEFAULT_FILE_MODE`].
    pub file_mode: Option<String>,
    /// Owner of files and directories.
    pub owner: Option<String>,
    /// Group of files and directories.
    pub group: Option<String>,
    /// Directory mode; directories get no mode when absent.
    pub dir_mode: Option<String>,
}

impl Attributes {
    /// The mode for files, falling back to [`DEFAULT_FILE_MODE`].
    #[must_use]
    pub fn effective_file_mode(&self) -> &str {
        non_empty(self.file_mode.as_ref()).unwrap_or(DEFAULT_FILE_MODE)
    }
}

/// Desired state of a regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResource {
    /// Rendered template content.
    pub content: String,
    /// Owner; omitted when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Group; omitted when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Permission mode.
    pub mode: String,
}

/// Desired state of a directory.
///
/// `owner` and `group` are always present, `null` when unset, so the
/// consuming engine falls back to its own process identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryResource {
    /// Owner, possibly unset.
    pub owner: Option<String>,
    /// Group, possibly unset.
    pub group: Option<String>,
    /// Permission mode; omitted when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// A file or directory that should exist at a destination path.
///
/// Serialized with an `ensure` tag:
///
/// ```
/// use recurse_directory::resources::{FileResource, ResourceDescriptor};
///
/// let file = ResourceDescriptor::File(FileResource {
///     content: "port=8080\n".into(),
///     owner: None,
///     group: None,
///     mode: "0600".into(),
/// });
/// assert_eq!(
///     serde_json::to_string(&file).unwrap(),
///     r#"{"ensure":"file","content":"port=8080\n","mode":"0600"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ensure", rename_all = "lowercase")]
pub enum ResourceDescriptor {
    /// A rendered file.
    File(FileResource),
    /// A directory.
    Directory(DirectoryResource),
}

impl ResourceDescriptor {
    /// The `ensure` value: `file` or `directory`.
    #[must_use]
    pub const fn ensure(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Directory(_) => "directory",
        }
    }

    /// Rendered content, for files.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File(file) => Some(&file.content),
            Self::Directory(_) => None,
        }
    }

    /// Requested mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<&str> {
        match self {
            Self::File(file) => Some(&file.mode),
            Self::Directory(dir) => dir.mode.as_deref(),
        }
    }
}

/// The destination-relative title of `entry`: files lose one trailing
/// [`TEMPLATE_SUFFIX`], directories keep their path.
///
/// # Examples
///
/// ```
/// use recurse_directory::resources::title;
/// use recurse_directory::walker::EntryKind;
///
/// assert_eq!(title("a.b.erb", EntryKind::File), "a.b");
/// assert_eq!(title("conf.erb", EntryKind::Directory), "conf.erb");
/// ```
#[must_use]
pub fn title(relative: &str, kind: EntryKind) -> &str {
    match kind {
        EntryKind::File => relative.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(relative),
        EntryKind::Directory => relative,
    }
}

/// Build the destination key and descriptor for one walked entry.
///
/// `content` is the rendered template for files and ignored for directories.
#[must_use]
pub fn assemble(
    entry: &TreeEntry,
    content: Option<String>,
    destination: &str,
    attrs: &Attributes,
) -> (String, ResourceDescriptor) {
    let title = title(entry.relative(), entry.kind());
    let key = format!("{destination}/{title}");

    let descriptor = match entry.kind() {
        EntryKind::File => ResourceDescriptor::File(FileResource {
            content: content.unwrap_or_default(),
            owner: non_empty(attrs.owner.as_ref()).map(String::from),
            group: non_empty(attrs.group.as_ref()).map(String::from),
            mode: attrs.effective_file_mode().to_string(),
        }),
        EntryKind::Directory => ResourceDescriptor::Directory(DirectoryResource {
            owner: attrs.owner.clone(),
            group: attrs.group.clone(),
            mode: attrs.dir_mode.clone(),
        }),
    };
    (key, descriptor)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

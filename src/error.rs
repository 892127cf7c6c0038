//! Domain-specific error types for template tree rendering.
//!
//! Library modules return these typed errors; the binary converts them to
//! [`anyhow::Error`] at the command boundary via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! RecurseError
//! ├── Reference(ReferenceError)   — malformed `module/path` reference
//! ├── Resolution(ResolutionError) — reference absent from every module path
//! ├── Walk(WalkError)             — traversal failure or non-UTF-8 entry name
//! └── Render(RenderError)         — template read or evaluation failure
//! ```
//!
//! Every variant is fatal: a failing call never yields a partial mapping.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by [`crate::operations::recurse_directory`].
#[derive(Error, Debug)]
pub enum RecurseError {
    /// The source reference could not be parsed.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The source reference was not found under any module path.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The template tree could not be traversed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A template could not be read or evaluated.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors that arise from parsing a `module/sub/path` source reference.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    /// The reference was empty.
    #[error("source reference is empty")]
    Empty,

    /// The first segment (the module name) was empty, e.g. `/configs`.
    #[error("source reference '{0}' does not start with a module name")]
    MissingModule(String),
}

/// Errors that arise from resolving a reference against the module path.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No module path contains the rewritten reference as a directory.
    #[error(
        "template path {search_path} not found in any modulepath ({}), please ensure proper source_dir",
        DisplayPaths(.candidates)
    )]
    NotFound {
        /// The rewritten `module/templates/sub/path` that was searched for.
        search_path: String,
        /// Every module path that was tried, in order.
        candidates: Vec<PathBuf>,
    },

    /// The module path contained no entries at all.
    #[error("template path {search_path} cannot be resolved: modulepath is empty")]
    EmptySearchPath {
        /// The rewritten `module/templates/sub/path` that was searched for.
        search_path: String,
    },
}

/// Errors that arise while walking the resolved template tree.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The filesystem could not be traversed.
    #[error("failed to walk template tree under {}", .root.display())]
    Traverse {
        /// Root of the walk.
        root: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// An entry name is not valid UTF-8 and cannot become a destination path.
    #[error("template tree entry {} has a name that is not valid UTF-8", .path.display())]
    NonUtf8Name {
        /// The offending entry.
        path: PathBuf,
    },
}

/// Errors that arise from rendering a single template file.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template file could not be read.
    #[error("failed to read template {}", .file.display())]
    Read {
        /// Template file that could not be read.
        file: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The template engine rejected or failed to evaluate the template.
    #[error(
        "Failed to parse template {}:\n  Filepath: {origin}\n  Line: {}\n  Detail: {detail}",
        .file.display(),
        DisplayLine(.line)
    )]
    Template {
        /// Template file being rendered.
        file: PathBuf,
        /// File the failure originated from (the template itself or an include).
        origin: String,
        /// Line of the failure, when the engine reports one.
        line: Option<usize>,
        /// Engine-provided failure detail.
        detail: String,
    },
}

/// Formats a path list as `[a, b, c]`.
struct DisplayPaths<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", path.display())?;
        }
        f.write_str("]")
    }
}

/// Formats an optional line number, `unknown` when absent.
struct DisplayLine<'a>(&'a Option<usize>);

impl fmt::Display for DisplayLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(line) => write!(f, "{line}"),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ReferenceError
    // -----------------------------------------------------------------------

    #[test]
    fn reference_error_empty_display() {
        assert_eq!(ReferenceError::Empty.to_string(), "source reference is empty");
    }

    #[test]
    fn reference_error_missing_module_display() {
        let e = ReferenceError::MissingModule("/configs".to_string());
        assert_eq!(
            e.to_string(),
            "source reference '/configs' does not start with a module name"
        );
    }

    // -----------------------------------------------------------------------
    // ResolutionError
    // -----------------------------------------------------------------------

    #[test]
    fn resolution_error_lists_every_candidate() {
        let e = ResolutionError::NotFound {
            search_path: "mymodule/templates/configs".to_string(),
            candidates: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        assert_eq!(
            e.to_string(),
            "template path mymodule/templates/configs not found in any modulepath ([/a, /b]), please ensure proper source_dir"
        );
    }

    #[test]
    fn resolution_error_empty_search_path_display() {
        let e = ResolutionError::EmptySearchPath {
            search_path: "m/templates".to_string(),
        };
        assert!(e.to_string().contains("modulepath is empty"));
        assert!(e.to_string().contains("m/templates"));
    }

    // -----------------------------------------------------------------------
    // RenderError
    // -----------------------------------------------------------------------

    #[test]
    fn render_error_template_display_with_line() {
        let e = RenderError::Template {
            file: PathBuf::from("/mods/m/templates/a.erb"),
            origin: "/mods/m/templates/a.erb".to_string(),
            line: Some(3),
            detail: "unexpected token".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Failed to parse template /mods/m/templates/a.erb:\n  Filepath: /mods/m/templates/a.erb\n  Line: 3\n  Detail: unexpected token"
        );
    }

    #[test]
    fn render_error_template_display_without_line() {
        let e = RenderError::Template {
            file: PathBuf::from("a.erb"),
            origin: "a.erb".to_string(),
            line: None,
            detail: "variable `port` not found".to_string(),
        };
        assert!(e.to_string().contains("Line: unknown"));
    }

    #[test]
    fn render_error_read_has_source() {
        use std::error::Error as StdError;
        let e = RenderError::Read {
            file: PathBuf::from("/x"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "failed to read template /x");
    }

    #[test]
    fn render_error_read_chain_mentions_io_error_once() {
        let e = RenderError::Read {
            file: PathBuf::from("/x"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let chain = format!("{:#}", anyhow::Error::from(e));
        assert_eq!(chain.matches("valid UTF-8").count(), 1, "got: {chain}");
    }

    // -----------------------------------------------------------------------
    // WalkError
    // -----------------------------------------------------------------------

    #[test]
    fn walk_error_non_utf8_name_display() {
        let e = WalkError::NonUtf8Name {
            path: PathBuf::from("/mods/m/templates/bad"),
        };
        assert_eq!(
            e.to_string(),
            "template tree entry /mods/m/templates/bad has a name that is not valid UTF-8"
        );
    }

    // -----------------------------------------------------------------------
    // RecurseError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn recurse_error_is_transparent() {
        let e: RecurseError = ReferenceError::Empty.into();
        assert_eq!(e.to_string(), "source reference is empty");
    }

    #[test]
    fn recurse_error_converts_to_anyhow() {
        let e: RecurseError = ResolutionError::EmptySearchPath {
            search_path: "m/templates".to_string(),
        }
        .into();
        let _anyhow_err: anyhow::Error = e.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<RecurseError>();
        assert_send_sync::<ReferenceError>();
        assert_send_sync::<ResolutionError>();
        assert_send_sync::<WalkError>();
        assert_send_sync::<RenderError>();
    }
}

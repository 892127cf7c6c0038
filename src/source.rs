//! Logical `module/sub/path` references.
use std::fmt;
use std::str::FromStr;

use crate::error::ReferenceError;

/// Directory inside every module that holds its templates.
pub const TEMPLATES_DIR: &str = "templates";

/// A parsed source reference: a module name plus a path inside that
/// module's `templates/` directory.
///
/// # Examples
///
/// ```
/// use recurse_directory::source::SourceReference;
///
/// let reference: SourceReference = "mymodule/configs/app".parse().unwrap();
/// assert_eq!(reference.module(), "mymodule");
/// assert_eq!(reference.subpath(), "configs/app");
/// assert_eq!(reference.search_path(), "mymodule/templates/configs/app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    module: String,
    subpath: String,
}

impl SourceReference {
    /// Parse a slash-delimited reference.
    ///
    /// The subpath is kept verbatim, including any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Empty`] for an empty string and
    /// [`ReferenceError::MissingModule`] when the first segment is empty.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        if reference.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let (module, subpath) = reference.split_once('/').unwrap_or((reference, ""));
        if module.is_empty() {
            return Err(ReferenceError::MissingModule(reference.to_string()));
        }
        Ok(Self {
            module: module.to_string(),
            subpath: subpath.to_string(),
        })
    }

    /// The module (namespace) name.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The path below the module's templates directory; may be empty.
    #[must_use]
    pub fn subpath(&self) -> &str {
        &self.subpath
    }

    /// The reference rewritten to `<module>/templates[/<subpath>]`, relative
    /// to a module path entry.
    #[must_use]
    pub fn search_path(&self) -> String {
        if self.subpath.is_empty() {
            format!("{}/{TEMPLATES_DIR}", self.module)
        } else {
            format!("{}/{TEMPLATES_DIR}/{}", self.module, self.subpath)
        }
    }
}

impl FromStr for SourceReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subpath.is_empty() {
            f.write_str(&self.module)
        } else {
            write!(f, "{}/{}", self.module, self.subpath)
        }
    }
}

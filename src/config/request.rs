//! The positional invocation arguments.
use crate::resources::Attributes;

/// One `recurse_directory` invocation: where templates come from, where the
/// resulting resources go, and the ownership and modes to give them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Logical `module/sub/path` reference to the template tree.
    pub source_dir: String,
    /// Absolute destination base directory on the target machine.
    pub destination_dir: String,
    /// Mode for rendered files; empty or absent means `0600`.
    pub file_mode: Option<String>,
    /// Owner for files and directories.
    pub file_owner: Option<String>,
    /// Group for files and directories.
    pub file_group: Option<String>,
    /// Mode for directories; no default.
    pub dir_mode: Option<String>,
}

impl Request {
    /// A request with only the required arguments set.
    #[must_use]
    pub fn new(source_dir: impl Into<String>, destination_dir: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            ..Self::default()
        }
    }

    /// Set the file mode.
    #[must_use]
    pub fn with_file_mode(mut self, mode: impl Into<String>) -> Self {
        self.file_mode = Some(mode.into());
        self
    }

    /// Set the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.file_owner = Some(owner.into());
        self
    }

    /// Set the group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.file_group = Some(group.into());
        self
    }

    /// Set the directory mode.
    #[must_use]
    pub fn with_dir_mode(mut self, mode: impl Into<String>) -> Self {
        self.dir_mode = Some(mode.into());
        self
    }

    /// The ownership and mode attributes applied to every resource.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        Attributes {
            file_mode: self.file_mode.clone(),
            owner: self.file_owner.clone(),
            group: self.file_group.clone(),
            dir_mode: self.dir_mode.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_leaves_optional_arguments_unset() {
        let request = Request::new("m/conf", "/etc/app");
        assert_eq!(request.source_dir, "m/conf");
        assert_eq!(request.destination_dir, "/etc/app");
        assert_eq!(request.attributes(), Attributes::default());
    }

    #[test]
    fn builders_populate_attributes() {
        let attrs = Request::new("m", "/d")
            .with_file_mode("0644")
            .with_owner("root")
            .with_group("wheel")
            .with_dir_mode("0755")
            .attributes();
        assert_eq!(attrs.file_mode.as_deref(), Some("0644"));
        assert_eq!(attrs.owner.as_deref(), Some("root"));
        assert_eq!(attrs.group.as_deref(), Some("wheel"));
        assert_eq!(attrs.dir_mode.as_deref(), Some("0755"));
    }
}

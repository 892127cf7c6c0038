//! Template variables: the context templates are evaluated against.
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::toml_loader;

/// Named values made available to every template.
///
/// Loaded from a TOML file whose top-level keys become variable names, then
/// overlaid with `KEY=VALUE` assignments from the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, toml::Value>);

impl Variables {
    /// An empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load variables from a TOML file. A missing file yields no variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        toml_loader::load_config(path)
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<toml::Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Apply a `KEY=VALUE` assignment; the value is kept as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment has no `=` or an empty key.
    pub fn assign(&mut self, assignment: &str) -> Result<()> {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("invalid variable assignment '{assignment}': expected KEY=VALUE");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("invalid variable assignment '{assignment}': empty variable name");
        }
        self.set(name, value);
        Ok(())
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&toml::Value> {
        self.0.get(name)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &toml::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! TOML configuration file parsing.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load and deserialize a TOML file.
///
/// A missing file deserializes from an empty document, so types whose
/// fields all default yield their empty value.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return toml::from_str("").context("Failed to create empty config");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_toml;
    use std::collections::BTreeMap;

    #[test]
    fn missing_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table: BTreeMap<String, toml::Value> =
            load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn parses_existing_file() {
        let (_dir, path) = write_temp_toml("port = 8080\nname = \"app\"\n");
        let table: BTreeMap<String, toml::Value> = load_config(&path).unwrap();
        assert_eq!(table.get("port"), Some(&toml::Value::Integer(8080)));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let (_dir, path) = write_temp_toml("port = \n");
        let err = load_config::<BTreeMap<String, toml::Value>>(&path).unwrap_err();
        assert!(
            err.to_string().contains("Failed to parse TOML config"),
            "unexpected error: {err}"
        );
    }
}

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{ConfigurationError, Result};
use crate::schema::FieldDescriptor;

fn default_primary_key() -> Option<String> {
    Some("id".to_string())
}

/// The `[migration]` block of a schema file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MigrationSettings {
    pub table: String,
    pub index_column: String,
    /// Drop an existing table of the same name before creating it.
    #[serde(default)]
    pub force: bool,
    #[serde(default = "default_primary_key")]
    pub primary_key: Option<String>,
}

/// A parsed schema file: migration settings plus one field list per table name.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    migration: MigrationSettings,
    #[serde(flatten)]
    tables: HashMap<String, Vec<FieldDescriptor>>,
}

impl SchemaConfig {
    /// Load a schema file. `.json` files are read as JSON, everything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading schema from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn settings(&self) -> &MigrationSettings {
        &self.migration
    }

    pub fn fields(&self, table: &str) -> Result<&[FieldDescriptor]> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| ConfigurationError::UnknownTable(table.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchemaError;

    const SAMPLE: &str = r#"
[migration]
table = "echi_splits"
index_column = "acd"
force = true

[[echi_splits]]
name = "row_date"
type = "datetime"

[[echi_splits]]
name = "acd"
type = "int"
length = 2

[[echi_splits]]
name = "split"
type = "int"
length = 4
"#;

    #[test]
    fn reads_toml_settings_and_fields() {
        let config = SchemaConfig::from_toml_str(SAMPLE).unwrap();
        let settings = config.settings();
        assert_eq!(settings.table, "echi_splits");
        assert_eq!(settings.index_column, "acd");
        assert!(settings.force);
        assert_eq!(settings.primary_key.as_deref(), Some("id"));

        let fields = config.fields("echi_splits").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], FieldDescriptor::new("acd", "int", Some(2)));
        assert_eq!(fields[0].length, None);
    }

    #[test]
    fn reads_json() {
        let json = r#"{
            "migration": { "table": "t", "index_column": "a", "primary_key": null },
            "t": [ { "name": "a", "type": "str", "length": 8 } ]
        }"#;
        let config = SchemaConfig::from_json_str(json).unwrap();
        assert!(!config.settings().force);
        assert_eq!(config.settings().primary_key, None);
        assert_eq!(config.fields("t").unwrap()[0].kind, "str");
    }

    #[test]
    fn unknown_table_is_a_configuration_error() {
        let config = SchemaConfig::from_toml_str(SAMPLE).unwrap();
        let err = config.fields("echi_agents").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Configuration(ConfigurationError::UnknownTable(_))
        ));
    }

    #[test]
    fn missing_migration_block_fails_to_parse() {
        let err = SchemaConfig::from_toml_str("[[t]]\nname = \"a\"\ntype = \"bool\"\n").unwrap_err();
        assert!(matches!(err, SchemaError::Toml(_)));
    }

    #[test]
    fn from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("schema.toml");
        std::fs::write(&toml_path, SAMPLE).unwrap();
        assert!(SchemaConfig::from_path(&toml_path).is_ok());

        let json_path = dir.path().join("schema.json");
        std::fs::write(&json_path, SAMPLE).unwrap();
        assert!(matches!(
            SchemaConfig::from_path(&json_path),
            Err(SchemaError::Json(_))
        ));

        assert!(matches!(
            SchemaConfig::from_path(dir.path().join("missing.toml")),
            Err(SchemaError::Io(_))
        ));
    }
}

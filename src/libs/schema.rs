use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SchemaError;

/// One entry of a table's field list, as written in the schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: &str, length: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            length,
        }
    }

    pub fn field_type(&self) -> Result<FieldType, SchemaError> {
        self.kind
            .parse::<FieldType>()
            .map_err(|_| SchemaError::UnsupportedFieldType {
                field: self.name.clone(),
                kind: self.kind.clone(),
            })
    }
}

/// Abstract field types understood by the schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    Str,
    Datetime,
    Bool,
    /// Stored exactly like `Bool`; the distinction only matters to loaders.
    BoolInt,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Str => "str",
            FieldType::Datetime => "datetime",
            FieldType::Bool => "bool",
            FieldType::BoolInt => "boolint",
        }
    }

    pub fn requires_length(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Str)
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(FieldType::Int),
            "str" => Ok(FieldType::Str),
            "datetime" => Ok(FieldType::Datetime),
            "bool" => Ok(FieldType::Bool),
            "boolint" => Ok(FieldType::BoolInt),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete storage type of a column, independent of the SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// `limit` is the declared display/byte width; scale is always 0.
    Integer { limit: u32, precision: u32, scale: u32 },
    Varchar(u32),
    Timestamp,
    Char(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: SqlType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    /// Surrogate auto-increment key prepended to the declared columns.
    pub primary_key: Option<String>,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.primary_key.as_deref() == Some(name) || self.column(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub table: String,
    pub column: String,
}

impl IndexSpec {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn name(&self) -> String {
        format!("index_{}_on_{}", self.table, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_field_types() {
        for kind in ["int", "str", "datetime", "bool", "boolint"] {
            let parsed: FieldType = kind.parse().unwrap();
            assert_eq!(parsed.as_str(), kind);
        }
        assert!("float".parse::<FieldType>().is_err());
        assert!("INT".parse::<FieldType>().is_err());
    }

    #[test]
    fn unknown_kind_reports_field_name() {
        let field = FieldDescriptor::new("weird", "blob", None);
        match field.field_type() {
            Err(SchemaError::UnsupportedFieldType { field, kind }) => {
                assert_eq!(field, "weird");
                assert_eq!(kind, "blob");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn index_name_follows_table_and_column() {
        let index = IndexSpec::new("echi_splits", "acd");
        assert_eq!(index.name(), "index_echi_splits_on_acd");
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Problems with the field list or migration settings. Reported once, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("field '{field}' of type '{kind}' requires a length")]
    MissingLength { field: String, kind: String },

    #[error("field '{field}' has invalid length {length}, expected a positive integer")]
    InvalidLength { field: String, length: i64 },

    #[error("field at position {position} has an empty name")]
    EmptyColumnName { position: usize },

    #[error("column '{0}' is declared more than once")]
    DuplicateColumn(String),

    #[error("column '{0}' collides with the primary key")]
    PrimaryKeyCollision(String),

    #[error("no field list found for table '{0}'")]
    UnknownTable(String),

    #[error("index column '{column}' is not a column of '{table}'")]
    UnknownIndexColumn { table: String, column: String },

    #[error("unsupported database url '{0}'")]
    UnsupportedDatabaseUrl(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field '{field}' has unsupported type '{kind}'")]
    UnsupportedFieldType { field: String, kind: String },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database not connected")]
    NotConnected,

    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML schema file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON schema file: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SchemaError::Configuration(_) | SchemaError::UnsupportedFieldType { .. }
        )
    }
}

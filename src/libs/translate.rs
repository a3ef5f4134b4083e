use std::collections::HashSet;

use crate::errors::{ConfigurationError, Result};
use crate::schema::{ColumnSpec, FieldDescriptor, FieldType, SqlType, TableSchema};

/// Map an ordered field list to column specs, one per field, order preserved.
///
/// Fails on the first unsupported type or bad length instead of skipping the field.
pub fn translate(fields: &[FieldDescriptor]) -> Result<Vec<ColumnSpec>> {
    let mut seen = HashSet::with_capacity(fields.len());
    let mut columns = Vec::with_capacity(fields.len());

    for (position, field) in fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyColumnName { position }.into());
        }
        // SQLite and MySQL fold column names case-insensitively.
        if !seen.insert(field.name.to_lowercase()) {
            return Err(ConfigurationError::DuplicateColumn(field.name.clone()).into());
        }
        columns.push(translate_field(field)?);
    }

    Ok(columns)
}

pub fn translate_field(field: &FieldDescriptor) -> Result<ColumnSpec> {
    let field_type = field.field_type()?;
    let sql_type = match field_type {
        FieldType::Int => {
            let n = required_length(field, field_type)?;
            SqlType::Integer {
                limit: n,
                precision: n,
                scale: 0,
            }
        }
        FieldType::Str => SqlType::Varchar(required_length(field, field_type)?),
        FieldType::Datetime => SqlType::Timestamp,
        FieldType::Bool | FieldType::BoolInt => SqlType::Char(1),
    };

    Ok(ColumnSpec {
        name: field.name.clone(),
        sql_type,
    })
}

fn required_length(field: &FieldDescriptor, field_type: FieldType) -> Result<u32> {
    let length = field.length.ok_or_else(|| ConfigurationError::MissingLength {
        field: field.name.clone(),
        kind: field_type.to_string(),
    })?;

    u32::try_from(length)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            ConfigurationError::InvalidLength {
                field: field.name.clone(),
                length,
            }
            .into()
        })
}

impl TableSchema {
    pub fn build(
        name: &str,
        primary_key: Option<&str>,
        fields: &[FieldDescriptor],
    ) -> Result<Self> {
        let columns = translate(fields)?;
        if let Some(pk) = primary_key {
            if columns.iter().any(|c| c.name.to_lowercase() == pk.to_lowercase()) {
                return Err(ConfigurationError::PrimaryKeyCollision(pk.to_string()).into());
            }
        }
        Ok(Self {
            name: name.to_string(),
            primary_key: primary_key.map(str::to_string),
            columns,
        })
    }
}

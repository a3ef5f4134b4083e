use crate::errors::ConfigurationError;
use crate::schema::{ColumnSpec, IndexSpec, SqlType, TableSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Pick the dialect from a sqlx-style connection url.
    pub fn from_url(url: &str) -> Result<Self, ConfigurationError> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(ConfigurationError::UnsupportedDatabaseUrl(url.to_string())),
        }
    }

    pub fn quote(&self, ident: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    pub fn column_type(&self, sql_type: &SqlType) -> String {
        match (self, sql_type) {
            (Dialect::MySql, SqlType::Integer { limit, .. }) => format!("INT({})", limit),
            (_, SqlType::Integer { .. }) => "INTEGER".to_string(),
            (_, SqlType::Varchar(n)) => format!("VARCHAR({})", n),
            (Dialect::MySql, SqlType::Timestamp) => "DATETIME".to_string(),
            (_, SqlType::Timestamp) => "TIMESTAMP".to_string(),
            (_, SqlType::Char(n)) => format!("CHAR({})", n),
        }
    }

    fn primary_key_type(&self) -> &'static str {
        match self {
            Dialect::Postgres => "SERIAL PRIMARY KEY",
            Dialect::MySql => "INT AUTO_INCREMENT PRIMARY KEY",
            Dialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL",
        }
    }

    fn column_def(&self, column: &ColumnSpec) -> String {
        format!("{} {}", self.quote(&column.name), self.column_type(&column.sql_type))
    }

    // -------- Tables --------
    pub fn create_table(&self, schema: &TableSchema) -> String {
        let mut sql = format!("CREATE TABLE {} (", self.quote(&schema.name));
        let mut cols: Vec<String> = Vec::with_capacity(schema.columns.len() + 1);
        if let Some(pk) = &schema.primary_key {
            cols.push(format!("{} {}", self.quote(pk), self.primary_key_type()));
        }
        cols.extend(schema.columns.iter().map(|c| self.column_def(c)));
        sql.push_str(&cols.join(", "));
        sql.push(')');
        sql
    }

    pub fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote(table))
    }

    pub fn drop_table_if_exists(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", self.quote(table))
    }

    // -------- Indexes --------
    pub fn create_index(&self, index: &IndexSpec) -> String {
        format!(
            "CREATE INDEX {} ON {} ({})",
            self.quote(&index.name()),
            self.quote(&index.table),
            self.quote(&index.column)
        )
    }

    pub fn drop_index(&self, index: &IndexSpec) -> String {
        match self {
            Dialect::MySql => format!(
                "DROP INDEX {} ON {}",
                self.quote(&index.name()),
                self.quote(&index.table)
            ),
            Dialect::Postgres | Dialect::Sqlite => {
                format!("DROP INDEX {}", self.quote(&index.name()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema {
            name: "echi_splits".into(),
            primary_key: Some("id".into()),
            columns: vec![
                ColumnSpec {
                    name: "acd".into(),
                    sql_type: SqlType::Integer {
                        limit: 2,
                        precision: 2,
                        scale: 0,
                    },
                },
                ColumnSpec {
                    name: "row_date".into(),
                    sql_type: SqlType::Timestamp,
                },
                ColumnSpec {
                    name: "intrvl".into(),
                    sql_type: SqlType::Varchar(5),
                },
                ColumnSpec {
                    name: "abncalls".into(),
                    sql_type: SqlType::Char(1),
                },
            ],
        }
    }

    #[test]
    fn dialect_from_url() {
        assert_eq!(Dialect::from_url("postgres://localhost/db").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_url("postgresql://u@h/db").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_url("mysql://root@localhost/echi").unwrap(), Dialect::MySql);
        assert_eq!(Dialect::from_url("sqlite::memory:").unwrap(), Dialect::Sqlite);
        assert!(Dialect::from_url("oracle://x").is_err());
    }

    #[test]
    fn postgres_create_table() {
        assert_eq!(
            Dialect::Postgres.create_table(&schema()),
            "CREATE TABLE \"echi_splits\" (\"id\" SERIAL PRIMARY KEY, \"acd\" INTEGER, \
             \"row_date\" TIMESTAMP, \"intrvl\" VARCHAR(5), \"abncalls\" CHAR(1))"
        );
    }

    #[test]
    fn mysql_create_table_keeps_int_width() {
        let sql = Dialect::MySql.create_table(&schema());
        assert!(sql.starts_with("CREATE TABLE `echi_splits` (`id` INT AUTO_INCREMENT PRIMARY KEY"));
        assert!(sql.contains("`acd` INT(2)"));
        assert!(sql.contains("`row_date` DATETIME"));
    }

    #[test]
    fn create_table_without_primary_key() {
        let mut s = schema();
        s.primary_key = None;
        let sql = Dialect::Sqlite.create_table(&s);
        assert!(sql.starts_with("CREATE TABLE \"echi_splits\" (\"acd\" INTEGER,"));
    }

    #[test]
    fn index_statements_share_the_name() {
        let index = IndexSpec::new("echi_splits", "acd");
        assert_eq!(
            Dialect::Sqlite.create_index(&index),
            "CREATE INDEX \"index_echi_splits_on_acd\" ON \"echi_splits\" (\"acd\")"
        );
        assert_eq!(
            Dialect::Postgres.drop_index(&index),
            "DROP INDEX \"index_echi_splits_on_acd\""
        );
        assert_eq!(
            Dialect::MySql.drop_index(&index),
            "DROP INDEX `index_echi_splits_on_acd` ON `echi_splits`"
        );
    }

    #[test]
    fn quoting_escapes_identifiers() {
        assert_eq!(Dialect::Postgres.quote("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(Dialect::MySql.quote("a`b"), "`a``b`");
    }
}

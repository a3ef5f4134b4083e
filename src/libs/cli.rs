//! Command line for running the configured migration.
//!
//! - echi-migrate up
//! - echi-migrate down
//! - echi-migrate print [--down]

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::config::SchemaConfig;
use crate::ddl::Dialect;
use crate::errors::Result;
use crate::migration::{MigrationRunner, SchemaMigration};

/// Create or drop a table described by a schema file
#[derive(Parser, Debug)]
#[command(name = "echi-migrate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the schema file (TOML, or JSON by extension)
    #[arg(long, global = true, default_value = "config/echi_schema.toml")]
    pub schema: PathBuf,

    /// Database connection url
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "sqlite://echi.db?mode=rwc"
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the table, then its index
    Up,

    /// Drop the index, then the table
    Down,

    /// Print the statements without connecting
    Print {
        /// Print the statements of `down` instead of `up`
        #[arg(long)]
        down: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = SchemaConfig::from_path(&self.schema)?;
        let migration = SchemaMigration::from_config(&config)?;

        match &self.command {
            Command::Print { down } => {
                let dialect = Dialect::from_url(&self.database_url)?;
                let statements = if *down {
                    migration.down_statements(dialect)
                } else {
                    migration.up_statements(dialect)
                };
                for sql in statements {
                    writeln!(out, "{};", sql)?;
                }
            }
            Command::Up => {
                let mut runner = MigrationRunner::new(self.database_url.clone(), migration)?;
                runner.connect().await?;
                runner.up().await?;
            }
            Command::Down => {
                let mut runner = MigrationRunner::new(self.database_url.clone(), migration)?;
                runner.connect().await?;
                runner.down().await?;
            }
        }
        Ok(())
    }
}

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use crate::config::SchemaConfig;
use crate::ddl::Dialect;
use crate::errors::{ConfigurationError, Result, SchemaError};
use crate::executor::DdlExecutor;
use crate::schema::{IndexSpec, TableSchema};

/// One table plus its index, created on `apply` and removed on `revert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMigration {
    table: TableSchema,
    index: IndexSpec,
    force: bool,
}

/// A single DDL statement of a migration, before it is rendered for a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlStep {
    DropTableIfExists,
    CreateTable,
    CreateIndex,
    DropIndex,
    DropTable,
}

impl SchemaMigration {
    pub fn new(table: TableSchema, index_column: &str) -> Result<Self> {
        if !table.has_column(index_column) {
            return Err(ConfigurationError::UnknownIndexColumn {
                table: table.name.clone(),
                column: index_column.to_string(),
            }
            .into());
        }
        let index = IndexSpec::new(&table.name, index_column);
        Ok(Self {
            table,
            index,
            force: false,
        })
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Build the migration described by a loaded schema file.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        let settings = config.settings();
        let fields = config.fields(&settings.table)?;
        let table = TableSchema::build(&settings.table, settings.primary_key.as_deref(), fields)?;
        Ok(Self::new(table, &settings.index_column)?.force(settings.force))
    }

    pub fn table(&self) -> &TableSchema {
        &self.table
    }

    pub fn index(&self) -> &IndexSpec {
        &self.index
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    /// Steps `apply` runs: the table always exists before its index.
    pub fn up_steps(&self) -> Vec<DdlStep> {
        let mut steps = Vec::with_capacity(3);
        if self.force {
            steps.push(DdlStep::DropTableIfExists);
        }
        steps.push(DdlStep::CreateTable);
        steps.push(DdlStep::CreateIndex);
        steps
    }

    /// Steps `revert` runs: index first, then table.
    pub fn down_steps(&self) -> Vec<DdlStep> {
        vec![DdlStep::DropIndex, DdlStep::DropTable]
    }

    pub fn up_statements(&self, dialect: Dialect) -> Vec<String> {
        self.render(&self.up_steps(), dialect)
    }

    pub fn down_statements(&self, dialect: Dialect) -> Vec<String> {
        self.render(&self.down_steps(), dialect)
    }

    fn render(&self, steps: &[DdlStep], dialect: Dialect) -> Vec<String> {
        steps.iter().map(|step| self.sql(*step, dialect)).collect()
    }

    fn sql(&self, step: DdlStep, dialect: Dialect) -> String {
        match step {
            DdlStep::DropTableIfExists => dialect.drop_table_if_exists(&self.table.name),
            DdlStep::CreateTable => dialect.create_table(&self.table),
            DdlStep::CreateIndex => dialect.create_index(&self.index),
            DdlStep::DropIndex => dialect.drop_index(&self.index),
            DdlStep::DropTable => dialect.drop_table(&self.table.name),
        }
    }

    fn log_step(&self, step: DdlStep) {
        match step {
            DdlStep::DropTableIfExists => {
                tracing::warn!("Dropping table {} if it exists", self.table.name)
            }
            DdlStep::CreateTable => tracing::info!(
                "Creating table {} with {} columns",
                self.table.name,
                self.table.columns.len()
            ),
            DdlStep::CreateIndex => tracing::info!("Creating index {}", self.index.name()),
            DdlStep::DropIndex => tracing::info!("Dropping index {}", self.index.name()),
            DdlStep::DropTable => tracing::info!("Dropping table {}", self.table.name),
        }
    }

    // -------- Up --------
    pub async fn apply<E>(&self, executor: &E, dialect: Dialect) -> Result<()>
    where
        E: DdlExecutor + ?Sized,
    {
        self.run_steps(executor, &self.up_steps(), dialect).await
    }

    // -------- Down --------
    pub async fn revert<E>(&self, executor: &E, dialect: Dialect) -> Result<()>
    where
        E: DdlExecutor + ?Sized,
    {
        self.run_steps(executor, &self.down_steps(), dialect).await
    }

    /// Stops at the first failing statement; later steps never run.
    async fn run_steps<E>(&self, executor: &E, steps: &[DdlStep], dialect: Dialect) -> Result<()>
    where
        E: DdlExecutor + ?Sized,
    {
        for step in steps {
            self.log_step(*step);
            run(executor, &self.sql(*step, dialect)).await?;
        }
        Ok(())
    }
}

async fn run<E>(executor: &E, sql: &str) -> Result<()>
where
    E: DdlExecutor + ?Sized,
{
    tracing::debug!("{}", sql);
    executor.execute(sql).await.map_err(|e| {
        tracing::error!("Statement failed: {}: {}", sql, e);
        SchemaError::Database(e)
    })
}

/// Owns the connection pool and runs one migration against it.
pub struct MigrationRunner {
    pub database_url: String,
    migration: SchemaMigration,
    dialect: Dialect,
    pool: Option<AnyPool>,
}

impl MigrationRunner {
    pub fn new(database_url: String, migration: SchemaMigration) -> Result<Self> {
        let dialect = Dialect::from_url(&database_url)?;
        Ok(Self {
            database_url,
            migration,
            dialect,
            pool: None,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn migration(&self) -> &SchemaMigration {
        &self.migration
    }

    pub async fn connect(&mut self) -> Result<()> {
        sqlx::any::install_default_drivers();
        tracing::info!("Connecting to {:?} database", self.dialect);
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(&self.database_url)
            .await?;
        self.pool = Some(pool);
        Ok(())
    }

    fn pool(&self) -> Result<&AnyPool> {
        self.pool.as_ref().ok_or(SchemaError::NotConnected)
    }

    pub async fn up(&self) -> Result<()> {
        self.migration.apply(self.pool()?, self.dialect).await
    }

    pub async fn down(&self) -> Result<()> {
        self.migration.revert(self.pool()?, self.dialect).await
    }
}

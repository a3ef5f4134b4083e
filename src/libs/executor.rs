use async_trait::async_trait;
use sqlx::{AnyPool, MySqlPool, PgPool, SqlitePool};

/// Runs a single DDL statement against the target database.
///
/// Errors come back untouched; the migration decides what to do next.
#[async_trait]
pub trait DdlExecutor: Send + Sync {
    async fn execute(&self, statement: &str) -> sqlx::Result<()>;
}

#[async_trait]
impl DdlExecutor for PgPool {
    async fn execute(&self, statement: &str) -> sqlx::Result<()> {
        sqlx::query(statement).execute(self).await?;
        Ok(())
    }
}

#[async_trait]
impl DdlExecutor for MySqlPool {
    async fn execute(&self, statement: &str) -> sqlx::Result<()> {
        sqlx::query(statement).execute(self).await?;
        Ok(())
    }
}

#[async_trait]
impl DdlExecutor for SqlitePool {
    async fn execute(&self, statement: &str) -> sqlx::Result<()> {
        sqlx::query(statement).execute(self).await?;
        Ok(())
    }
}

#[async_trait]
impl DdlExecutor for AnyPool {
    async fn execute(&self, statement: &str) -> sqlx::Result<()> {
        sqlx::query(statement).execute(self).await?;
        Ok(())
    }
}

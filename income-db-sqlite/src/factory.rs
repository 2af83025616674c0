use async_trait::async_trait;
use tracing::info;

use income_core::db::{DbConfig, IncomeStatementRepository, RepositoryError, RepositoryFactory};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for the `"sqlite"` backend.
///
/// ```rust,no_run
/// use income_core::db::RepositoryRegistry;
/// use income_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` as a sqlx SQLite url
    /// (`sqlite:income.db?mode=rwc`, `sqlite::memory:`) and applies the
    /// schema migrations.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn IncomeStatementRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{:#}", e)))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{:#}", e)))?;

        info!(url = %config.connection_string, "sqlite repository ready");
        Ok(Box::new(repo))
    }
}

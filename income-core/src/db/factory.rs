use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use super::repository::{IncomeStatementRepository, RepositoryError};

/// Which storage backend to open, and how.
///
/// `backend` names a registered [`RepositoryFactory`]; `connection_string`
/// is handed to that factory as is.
///
/// | backend  | connection_string examples                      |
/// |----------|-------------------------------------------------|
/// | `sqlite` | `sqlite:income.db?mode=rwc`, `sqlite::memory:`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        }
    }
}

/// Opens repositories for one backend. Each backend crate exports a unit
/// struct implementing this trait.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name used in [`DbConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Connects and prepares the schema.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn IncomeStatementRepository>, RepositoryError>;
}

/// Factories keyed by backend name.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds a factory, replacing any earlier one with the same name.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a repository with the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no such backend is registered.
    /// * Whatever the factory itself returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn IncomeStatementRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        debug!(backend = %config.backend, "opening income statement repository");
        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

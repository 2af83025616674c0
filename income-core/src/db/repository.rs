use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    Attachment, IncomeStatement, IncomeStatementBody, IncomeStatementId, PersonType,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for submitted and draft income statements.
///
/// Saving with `draft = false` marks the statement `SENT` and stamps
/// `sent_at`; saving with `draft = true` keeps it a `DRAFT`. Statements that
/// are already `HANDLED` cannot be updated or deleted and yield
/// [`RepositoryError::Conflict`].
#[async_trait]
pub trait IncomeStatementRepository: Send + Sync {
    async fn create_income_statement(
        &self,
        person_type: PersonType,
        body: &IncomeStatementBody,
        attachments: &[Attachment],
        draft: bool,
    ) -> Result<IncomeStatement, RepositoryError>;

    async fn update_income_statement(
        &self,
        id: IncomeStatementId,
        body: &IncomeStatementBody,
        attachments: &[Attachment],
        draft: bool,
    ) -> Result<IncomeStatement, RepositoryError>;

    async fn get_income_statement(
        &self,
        id: IncomeStatementId,
    ) -> Result<IncomeStatement, RepositoryError>;

    /// All statements, newest start date first.
    async fn list_income_statements(&self) -> Result<Vec<IncomeStatement>, RepositoryError>;

    async fn delete_income_statement(&self, id: IncomeStatementId) -> Result<(), RepositoryError>;

    /// Start dates already taken by existing statements, used to stop the
    /// user from creating two statements for the same period.
    async fn income_statement_start_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError>;
}

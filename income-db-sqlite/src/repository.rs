use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{info, warn};

use income_core::{
    Attachment, IncomeStatement, IncomeStatementBody, IncomeStatementId,
    IncomeStatementRepository, IncomeStatementStatus, PersonType, RepositoryError,
};

use crate::json::{get_json, to_json};

const SELECT_COLUMNS: &str = "SELECT id, person_type, status, body, attachments, handler_note,
        created_at, updated_at, sent_at
 FROM income_statement";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to `database_url`, e.g. `sqlite:income.db?mode=rwc` or
    /// `sqlite::memory:`. An in-memory database lives on a single connection.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?;

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn current_status(
        &self,
        id: IncomeStatementId,
    ) -> Result<IncomeStatementStatus, RepositoryError> {
        let row = sqlx::query("SELECT status FROM income_statement WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let status: String = row
            .try_get("status")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        IncomeStatementStatus::parse(&status)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid status: {}", status)))
    }

    /// Explains a guarded write that touched no rows.
    async fn rejected_write(&self, id: IncomeStatementId, draft: bool) -> RepositoryError {
        let current = match self.current_status(id).await {
            Ok(status) => status,
            Err(e) => return e,
        };

        if !current.is_editable() {
            warn!(%id, "attempt to change a handled income statement");
            RepositoryError::Conflict(format!("income statement {} has already been handled", id))
        } else if draft && current != IncomeStatementStatus::Draft {
            warn!(%id, status = current.as_str(), "attempt to save a sent income statement as draft");
            RepositoryError::Conflict(format!("income statement {} has already been sent", id))
        } else {
            RepositoryError::Conflict(format!("income statement {} changed concurrently", id))
        }
    }
}

fn status_for(draft: bool) -> IncomeStatementStatus {
    if draft {
        IncomeStatementStatus::Draft
    } else {
        IncomeStatementStatus::Sent
    }
}

fn row_to_income_statement(row: &SqliteRow) -> Result<IncomeStatement, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let person_type: String = row
        .try_get("person_type")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(IncomeStatement {
        id: IncomeStatementId::parse(&id)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid id: {}", id)))?,
        person_type: PersonType::parse(&person_type).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid person type: {}", person_type))
        })?,
        status: IncomeStatementStatus::parse(&status)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid status: {}", status)))?,
        body: get_json(row, "body")?,
        attachments: get_json(row, "attachments")?,
        handler_note: row
            .try_get("handler_note")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
        sent_at: row
            .try_get::<Option<DateTime<Utc>>, _>("sent_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get sent_at: {}", e)))?,
    })
}

#[async_trait]
impl IncomeStatementRepository for SqliteRepository {
    async fn create_income_statement(
        &self,
        person_type: PersonType,
        body: &IncomeStatementBody,
        attachments: &[Attachment],
        draft: bool,
    ) -> Result<IncomeStatement, RepositoryError> {
        let id = IncomeStatementId::new();
        let now = Utc::now();
        let status = status_for(draft);

        sqlx::query(
            "INSERT INTO income_statement (
                id, person_type, type, status, start_date, end_date,
                body, attachments, created_at, updated_at, sent_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(person_type.as_str())
        .bind(body.statement_type().as_str())
        .bind(status.as_str())
        .bind(body.start_date())
        .bind(body.end_date())
        .bind(to_json(body)?)
        .bind(to_json(attachments)?)
        .bind(now)
        .bind(now)
        .bind((!draft).then_some(now))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        info!(%id, status = status.as_str(), "income statement created");
        self.get_income_statement(id).await
    }

    async fn update_income_statement(
        &self,
        id: IncomeStatementId,
        body: &IncomeStatementBody,
        attachments: &[Attachment],
        draft: bool,
    ) -> Result<IncomeStatement, RepositoryError> {
        let now = Utc::now();
        let status = status_for(draft);

        let result = sqlx::query(
            "UPDATE income_statement SET
                type = ?, status = ?, start_date = ?, end_date = ?,
                body = ?, attachments = ?, updated_at = ?,
                sent_at = COALESCE(sent_at, ?)
             WHERE id = ? AND status <> 'HANDLED' AND (? = 0 OR status = 'DRAFT')",
        )
        .bind(body.statement_type().as_str())
        .bind(status.as_str())
        .bind(body.start_date())
        .bind(body.end_date())
        .bind(to_json(body)?)
        .bind(to_json(attachments)?)
        .bind(now)
        .bind((!draft).then_some(now))
        .bind(id.to_string())
        .bind(draft)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(self.rejected_write(id, draft).await);
        }

        info!(%id, status = status.as_str(), "income statement updated");
        self.get_income_statement(id).await
    }

    async fn get_income_statement(
        &self,
        id: IncomeStatementId,
    ) -> Result<IncomeStatement, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_income_statement(&row)
    }

    async fn list_income_statements(&self) -> Result<Vec<IncomeStatement>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY start_date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_income_statement).collect()
    }

    async fn delete_income_statement(&self, id: IncomeStatementId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM income_statement WHERE id = ? AND status <> 'HANDLED'")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(self.rejected_write(id, false).await);
        }

        info!(%id, "income statement deleted");
        Ok(())
    }

    async fn income_statement_start_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError> {
        let rows = sqlx::query("SELECT start_date FROM income_statement ORDER BY start_date")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get::<NaiveDate, _>("start_date")
                    .map_err(|e| RepositoryError::Database(e.to_string()))
            })
            .collect()
    }
}

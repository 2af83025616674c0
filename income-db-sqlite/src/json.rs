//! JSON-encoded TEXT columns.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use income_core::RepositoryError;

pub fn get_json<T: DeserializeOwned>(
    row: &SqliteRow,
    column: &str,
) -> Result<T, RepositoryError> {
    let text: String = row
        .try_get(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    serde_json::from_str(&text).map_err(|e| {
        RepositoryError::Database(format!("Invalid JSON in column '{}': {}", column, e))
    })
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Database(e.to_string()))
}

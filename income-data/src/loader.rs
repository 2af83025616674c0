use std::io::Read;

use income_core::{
    BodyError, IncomeStatement, IncomeStatementForm, IncomeStatementRepository, PersonType,
    RepositoryError, from_body,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when reading or storing income statement forms.
#[derive(Debug, Error)]
pub enum FormLoaderError {
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Form {index} was rejected: {reason}")]
    Rejected { index: usize, reason: BodyError },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<serde_json::Error> for FormLoaderError {
    fn from(err: serde_json::Error) -> Self {
        FormLoaderError::JsonParse(err.to_string())
    }
}

/// Reads filled-in forms from JSON and stores them through any
/// [`IncomeStatementRepository`].
///
/// The JSON uses the same camelCase field names as the form itself, and
/// every field is optional:
///
/// ```json
/// {
///   "startDate": "2025-01-01",
///   "endDate": "2025-12-31",
///   "gross": {
///     "selected": true,
///     "incomeSource": "INCOMES_REGISTER",
///     "estimatedMonthlyIncome": "2 500"
///   },
///   "assure": true
/// }
/// ```
pub struct FormLoader;

impl FormLoader {
    /// Parse a single form.
    pub fn parse<R: Read>(reader: R) -> Result<IncomeStatementForm, FormLoaderError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a JSON array of forms.
    pub fn parse_many<R: Read>(reader: R) -> Result<Vec<IncomeStatementForm>, FormLoaderError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validate every form and create one statement per form.
    ///
    /// All forms are validated before anything is written, so a rejected
    /// form leaves the repository untouched. The error names the position
    /// of the first rejected form in `forms`.
    ///
    /// Storing is not atomic: statements are created one at a time, and a
    /// repository error partway through leaves the statements created
    /// before it in place.
    pub async fn load<R: IncomeStatementRepository + ?Sized>(
        repo: &R,
        person_type: PersonType,
        forms: &[IncomeStatementForm],
        draft: bool,
    ) -> Result<Vec<IncomeStatement>, FormLoaderError> {
        let bodies = forms
            .iter()
            .enumerate()
            .map(|(index, form)| {
                from_body(person_type, form, draft)
                    .map_err(|reason| FormLoaderError::Rejected { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut created = Vec::with_capacity(bodies.len());
        for (form, body) in forms.iter().zip(&bodies) {
            let statement = repo
                .create_income_statement(person_type, body, &form.attachments, draft)
                .await
                .inspect_err(|e| {
                    warn!(stored = created.len(), error = %e, "form import stopped");
                })?;
            debug!(id = %statement.id, "form stored");
            created.push(statement);
        }

        info!(count = created.len(), draft, "income statement forms loaded");
        Ok(created)
    }
}

//! Editing session for a single income statement.
//!
//! The editor holds the form the user is filling in together with the
//! stored statement's identity and status. Each save validates the form
//! for the requested mode, then creates or updates the statement through
//! an [`IncomeStatementRepository`].

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{IncomeStatementRepository, RepositoryError};
use crate::models::{
    IncomeStatement, IncomeStatementBody, IncomeStatementForm, IncomeStatementId,
    IncomeStatementStatus, PersonType,
};
use crate::validation::{BodyError, from_body};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("form cannot be saved: {0}")]
    Form(#[from] BodyError),

    #[error("statement {0} has already been handled")]
    NotEditable(IncomeStatementId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeStatementEditor {
    /// `None` until the statement has been saved for the first time.
    pub id: Option<IncomeStatementId>,
    pub person_type: PersonType,
    pub status: IncomeStatementStatus,
    pub form: IncomeStatementForm,
    /// Start dates used by the person's other statements.
    pub other_start_dates: Vec<NaiveDate>,
    /// Set once a save has been rejected so the UI can highlight errors.
    pub show_form_errors: bool,
}

impl IncomeStatementEditor {
    /// A blank draft.
    pub fn new(person_type: PersonType) -> Self {
        Self {
            id: None,
            person_type,
            status: IncomeStatementStatus::Draft,
            form: IncomeStatementForm::empty(),
            other_start_dates: Vec::new(),
            show_form_errors: false,
        }
    }

    pub fn from_statement(statement: &IncomeStatement) -> Self {
        Self {
            id: Some(statement.id),
            person_type: statement.person_type,
            status: statement.status,
            form: IncomeStatementForm::from_income_statement(statement),
            other_start_dates: Vec::new(),
            show_form_errors: false,
        }
    }

    /// Opens an editor for `id`, or a blank one when `id` is `None`, and
    /// fetches the start dates taken by other statements.
    pub async fn load(
        repository: &dyn IncomeStatementRepository,
        person_type: PersonType,
        id: Option<IncomeStatementId>,
    ) -> Result<Self, RepositoryError> {
        let mut editor = match id {
            Some(id) => Self::from_statement(&repository.get_income_statement(id).await?),
            None => Self::new(person_type),
        };

        let mut start_dates = repository.income_statement_start_dates().await?;
        // Only the statement's own entry; others may share its start date.
        let own = editor.id.and(editor.form.start_date);
        if let Some(index) = start_dates.iter().position(|date| Some(*date) == own) {
            start_dates.remove(index);
        }
        editor.other_start_dates = start_dates;

        Ok(editor)
    }

    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut IncomeStatementForm),
    {
        f(&mut self.form);
    }

    /// The body that a draft save would send, if any.
    pub fn draft_body(&self) -> Option<IncomeStatementBody> {
        from_body(self.person_type, &self.form, true).ok()
    }

    /// The body that a final submission would send, if any.
    pub fn validated_body(&self) -> Option<IncomeStatementBody> {
        from_body(self.person_type, &self.form, false).ok()
    }

    /// Drafts can only be saved until the statement has been sent.
    pub fn draft_save_enabled(&self) -> bool {
        self.status == IncomeStatementStatus::Draft && self.draft_body().is_some()
    }

    /// Whether the chosen start date clashes with another statement.
    pub fn start_date_taken(&self) -> bool {
        self.form
            .start_date
            .is_some_and(|start| self.other_start_dates.contains(&start))
    }

    /// Validates the form for `draft` and stores it.
    ///
    /// A rejected form sets [`show_form_errors`](Self::show_form_errors)
    /// and nothing is written.
    pub async fn save(
        &mut self,
        repository: &dyn IncomeStatementRepository,
        draft: bool,
    ) -> Result<IncomeStatement, EditorError> {
        if let (Some(id), false) = (self.id, self.status.is_editable()) {
            warn!(%id, "refusing to save a handled income statement");
            return Err(EditorError::NotEditable(id));
        }

        let body = match from_body(self.person_type, &self.form, draft) {
            Ok(body) => body,
            Err(error) => {
                self.show_form_errors = true;
                return Err(error.into());
            }
        };

        let saved = match self.id {
            Some(id) => {
                repository
                    .update_income_statement(id, &body, &self.form.attachments, draft)
                    .await?
            }
            None => {
                repository
                    .create_income_statement(self.person_type, &body, &self.form.attachments, draft)
                    .await?
            }
        };

        info!(
            id = %saved.id,
            status = saved.status.as_str(),
            statement_type = body.statement_type().as_str(),
            "income statement saved"
        );

        self.id = Some(saved.id);
        self.status = saved.status;
        self.show_form_errors = false;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Attachment, GrossForm, IncomeSource};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // in-memory repository
    // =========================================================================

    #[derive(Default)]
    struct MemoryRepository {
        statements: Mutex<Vec<IncomeStatement>>,
    }

    impl MemoryRepository {
        fn with(statements: impl IntoIterator<Item = IncomeStatement>) -> Self {
            Self {
                statements: Mutex::new(statements.into_iter().collect()),
            }
        }

        fn count(&self) -> usize {
            self.statements.lock().unwrap().len()
        }
    }

    fn status_for(draft: bool) -> IncomeStatementStatus {
        if draft {
            IncomeStatementStatus::Draft
        } else {
            IncomeStatementStatus::Sent
        }
    }

    #[async_trait]
    impl IncomeStatementRepository for MemoryRepository {
        async fn create_income_statement(
            &self,
            person_type: PersonType,
            body: &IncomeStatementBody,
            attachments: &[Attachment],
            draft: bool,
        ) -> Result<IncomeStatement, RepositoryError> {
            let now = Utc::now();
            let statement = IncomeStatement {
                id: IncomeStatementId::new(),
                person_type,
                status: status_for(draft),
                body: body.clone(),
                attachments: attachments.to_vec(),
                handler_note: String::new(),
                created_at: now,
                updated_at: now,
                sent_at: (!draft).then_some(now),
            };
            self.statements.lock().unwrap().push(statement.clone());
            Ok(statement)
        }

        async fn update_income_statement(
            &self,
            id: IncomeStatementId,
            body: &IncomeStatementBody,
            attachments: &[Attachment],
            draft: bool,
        ) -> Result<IncomeStatement, RepositoryError> {
            let mut statements = self.statements.lock().unwrap();
            let statement = statements
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(RepositoryError::NotFound)?;
            statement.body = body.clone();
            statement.attachments = attachments.to_vec();
            statement.status = status_for(draft);
            Ok(statement.clone())
        }

        async fn get_income_statement(
            &self,
            id: IncomeStatementId,
        ) -> Result<IncomeStatement, RepositoryError> {
            self.statements
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn list_income_statements(&self) -> Result<Vec<IncomeStatement>, RepositoryError> {
            Ok(self.statements.lock().unwrap().clone())
        }

        async fn delete_income_statement(
            &self,
            id: IncomeStatementId,
        ) -> Result<(), RepositoryError> {
            self.statements.lock().unwrap().retain(|s| s.id != id);
            Ok(())
        }

        async fn income_statement_start_dates(
            &self,
        ) -> Result<Vec<NaiveDate>, RepositoryError> {
            Ok(self
                .statements
                .lock()
                .unwrap()
                .iter()
                .map(|s| s.body.start_date())
                .collect())
        }
    }

    // =========================================================================
    // fixtures
    // =========================================================================

    fn fill_gross(form: &mut IncomeStatementForm) {
        form.start_date = Some(date(2025, 1, 1));
        form.end_date = Some(date(2025, 12, 31));
        form.gross = GrossForm {
            selected: true,
            income_source: Some(IncomeSource::IncomesRegister),
            estimated_monthly_income: "2800".to_string(),
            ..GrossForm::default()
        };
    }

    fn stored(status: IncomeStatementStatus) -> IncomeStatement {
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);
        let now = Utc::now();
        IncomeStatement {
            id: IncomeStatementId::new(),
            person_type: PersonType::Adult,
            status,
            body: editor.draft_body().unwrap(),
            attachments: vec![],
            handler_note: String::new(),
            created_at: now,
            updated_at: now,
            sent_at: None,
        }
    }

    // =========================================================================
    // derived state
    // =========================================================================

    #[test]
    fn new_editor_is_an_empty_draft() {
        let editor = IncomeStatementEditor::new(PersonType::Child);

        assert_eq!(editor.id, None);
        assert_eq!(editor.status, IncomeStatementStatus::Draft);
        assert_eq!(editor.form, IncomeStatementForm::empty());
        assert!(!editor.show_form_errors);
        assert!(!editor.draft_save_enabled());
    }

    #[test]
    fn draft_save_is_enabled_before_final_submission_is() {
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);

        assert!(editor.draft_save_enabled());
        assert_eq!(editor.validated_body(), None);

        editor.update(|form| form.assure = true);
        assert!(editor.validated_body().is_some());
    }

    #[test]
    fn from_statement_reopens_the_form() {
        let statement = stored(IncomeStatementStatus::Sent);

        let editor = IncomeStatementEditor::from_statement(&statement);

        assert_eq!(editor.id, Some(statement.id));
        assert_eq!(editor.status, IncomeStatementStatus::Sent);
        assert_eq!(editor.draft_body(), Some(statement.body));
        assert!(!editor.draft_save_enabled());
    }

    #[test]
    fn start_date_taken_checks_other_statements() {
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.other_start_dates = vec![date(2025, 1, 1)];
        assert!(!editor.start_date_taken());

        editor.update(fill_gross);
        assert!(editor.start_date_taken());
    }

    // =========================================================================
    // save
    // =========================================================================

    #[tokio::test]
    async fn rejected_save_shows_errors_and_writes_nothing() {
        let repository = MemoryRepository::default();
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);

        let result = editor.save(&repository, false).await;

        assert_eq!(result, Err(EditorError::Form(BodyError::NotAssured)));
        assert!(editor.show_form_errors);
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn first_save_creates_then_later_saves_update() {
        let repository = MemoryRepository::default();
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);

        let draft = editor.save(&repository, true).await.unwrap();
        assert_eq!(draft.status, IncomeStatementStatus::Draft);
        assert_eq!(editor.id, Some(draft.id));

        editor.update(|form| form.assure = true);
        let sent = editor.save(&repository, false).await.unwrap();

        assert_eq!(sent.id, draft.id);
        assert_eq!(sent.status, IncomeStatementStatus::Sent);
        assert_eq!(editor.status, IncomeStatementStatus::Sent);
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn successful_save_clears_form_errors() {
        let repository = MemoryRepository::default();
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);

        assert!(editor.save(&repository, false).await.is_err());
        assert!(editor.show_form_errors);

        editor.update(|form| form.assure = true);
        editor.save(&repository, false).await.unwrap();
        assert!(!editor.show_form_errors);
    }

    #[tokio::test]
    async fn handled_statement_cannot_be_saved() {
        let statement = stored(IncomeStatementStatus::Handled);
        let repository = MemoryRepository::with([statement.clone()]);
        let mut editor = IncomeStatementEditor::from_statement(&statement);

        assert!(!editor.draft_save_enabled());
        assert_eq!(
            editor.save(&repository, true).await,
            Err(EditorError::NotEditable(statement.id))
        );
    }

    #[tokio::test]
    async fn statement_in_handling_can_be_resubmitted() {
        let statement = stored(IncomeStatementStatus::Handling);
        let repository = MemoryRepository::with([statement.clone()]);
        let mut editor = IncomeStatementEditor::from_statement(&statement);
        editor.update(|form| form.assure = true);

        let saved = editor.save(&repository, false).await.unwrap();

        assert_eq!(saved.status, IncomeStatementStatus::Sent);
    }

    #[tokio::test]
    async fn repository_errors_are_wrapped() {
        let repository = MemoryRepository::default();
        let mut editor = IncomeStatementEditor::new(PersonType::Adult);
        editor.update(fill_gross);
        editor.id = Some(IncomeStatementId::new());

        assert_eq!(
            editor.save(&repository, true).await,
            Err(EditorError::Repository(RepositoryError::NotFound))
        );
    }

    // =========================================================================
    // load
    // =========================================================================

    #[tokio::test]
    async fn load_existing_excludes_own_start_date() {
        let statement = stored(IncomeStatementStatus::Sent);
        let repository = MemoryRepository::with([statement.clone()]);

        let editor = IncomeStatementEditor::load(&repository, PersonType::Adult, Some(statement.id))
            .await
            .unwrap();

        assert_eq!(editor.id, Some(statement.id));
        assert!(editor.other_start_dates.is_empty());
        assert!(!editor.start_date_taken());
    }

    #[tokio::test]
    async fn load_existing_keeps_other_statement_with_same_start_date() {
        let statement = stored(IncomeStatementStatus::Sent);
        let other = stored(IncomeStatementStatus::Draft);
        let repository = MemoryRepository::with([statement.clone(), other]);

        let editor = IncomeStatementEditor::load(&repository, PersonType::Adult, Some(statement.id))
            .await
            .unwrap();

        assert_eq!(editor.other_start_dates, vec![date(2025, 1, 1)]);
        assert!(editor.start_date_taken());
    }

    #[tokio::test]
    async fn load_new_sees_all_start_dates() {
        let statement = stored(IncomeStatementStatus::Sent);
        let repository = MemoryRepository::with([statement]);

        let editor = IncomeStatementEditor::load(&repository, PersonType::Adult, None)
            .await
            .unwrap();

        assert_eq!(editor.other_start_dates, vec![date(2025, 1, 1)]);
    }

    #[tokio::test]
    async fn load_missing_statement_is_not_found() {
        let repository = MemoryRepository::default();

        let result =
            IncomeStatementEditor::load(&repository, PersonType::Adult, Some(IncomeStatementId::new()))
                .await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Attachment, IncomeStatementBody, PersonType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomeStatementId(pub Uuid);

impl IncomeStatementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for IncomeStatementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IncomeStatementId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Processing state of a stored statement.
///
/// Citizens move a statement from `Draft` to `Sent`; `Handling` and
/// `Handled` are set by the finance staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeStatementStatus {
    #[default]
    Draft,
    Sent,
    Handling,
    Handled,
}

impl IncomeStatementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sent => "SENT",
            Self::Handling => "HANDLING",
            Self::Handled => "HANDLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "SENT" => Some(Self::Sent),
            "HANDLING" => Some(Self::Handling),
            "HANDLED" => Some(Self::Handled),
            _ => None,
        }
    }

    /// Handled statements are frozen; everything else may still be edited
    /// or withdrawn by the citizen.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Handled)
    }
}

/// A statement as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub id: IncomeStatementId,
    pub person_type: PersonType,
    pub status: IncomeStatementStatus,
    pub body: IncomeStatementBody,
    /// Full attachment records for the ids listed in `body`.
    pub attachments: Vec<Attachment>,
    pub handler_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

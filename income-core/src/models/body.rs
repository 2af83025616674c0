//! Request bodies sent to the income statement backend.
//!
//! These are the normalized, validated counterparts of the form types in
//! [`crate::models::form`]. A body only exists once validation has passed;
//! it is produced by [`crate::validation::from_body`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AttachmentId, IncomeSource, OtherIncome};

/// One of the three statement shapes, tagged by `"type"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeStatementBody {
    HighestFee(HighestFeeBody),
    ChildIncome(ChildIncomeBody),
    Income(IncomeBody),
}

/// Discriminant of [`IncomeStatementBody`] without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeStatementType {
    HighestFee,
    ChildIncome,
    Income,
}

impl IncomeStatementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighestFee => "HIGHEST_FEE",
            Self::ChildIncome => "CHILD_INCOME",
            Self::Income => "INCOME",
        }
    }
}

impl IncomeStatementBody {
    pub fn statement_type(&self) -> IncomeStatementType {
        match self {
            Self::HighestFee(_) => IncomeStatementType::HighestFee,
            Self::ChildIncome(_) => IncomeStatementType::ChildIncome,
            Self::Income(_) => IncomeStatementType::Income,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::HighestFee(body) => body.start_date,
            Self::ChildIncome(body) => body.start_date,
            Self::Income(body) => body.start_date,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::HighestFee(body) => body.end_date,
            Self::ChildIncome(body) => body.end_date,
            Self::Income(body) => body.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestFeeBody {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildIncomeBody {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub other_info: String,
    pub attachment_ids: Vec<AttachmentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBody {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub gross: Option<Gross>,
    pub entrepreneur: Option<Entrepreneur>,
    pub student: bool,
    pub alimony_payer: bool,
    pub other_info: String,
    pub attachment_ids: Vec<AttachmentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gross {
    pub income_source: IncomeSource,
    pub estimated_monthly_income: i32,
    pub other_income: Vec<OtherIncome>,
    pub other_income_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrepreneur {
    pub full_time: bool,
    pub start_of_entrepreneurship: NaiveDate,
    pub company_name: String,
    pub business_id: String,
    pub spouse_works_in_company: bool,
    pub startup_grant: bool,
    pub checkup_consent: bool,
    pub self_employed: Option<SelfEmployed>,
    pub limited_company: Option<LimitedCompany>,
    pub partnership: bool,
    pub light_entrepreneur: bool,
    pub accountant: Option<Accountant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfEmployed {
    pub attachments: bool,
    pub estimated_income: Option<EstimatedIncome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedIncome {
    pub estimated_monthly_income: i32,
    pub income_start_date: NaiveDate,
    pub income_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedCompany {
    pub income_source: IncomeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accountant {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

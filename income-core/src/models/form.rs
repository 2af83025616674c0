//! Editable income statement form.
//!
//! Every field holds exactly what the user has entered so far: numbers are
//! still strings, required answers are `Option`s, and unselected sections
//! keep whatever was typed into them. Nothing here is validated; see
//! [`crate::validation`] for the conversion into a request body.
//!
//! All structs deserialize with `#[serde(default)]`, so a partially filled
//! JSON document is a valid form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    Accountant, Attachment, Entrepreneur, Gross, IncomeSource, IncomeStatement,
    IncomeStatementBody, LimitedCompany, OtherIncome, SelfEmployed,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementForm {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub highest_fee: bool,
    pub child_income: bool,
    pub gross: GrossForm,
    pub entrepreneur: EntrepreneurForm,
    pub student: bool,
    pub alimony_payer: bool,
    pub other_info: String,
    pub attachments: Vec<Attachment>,
    /// The "I assure the information is correct" checkbox.
    pub assure: bool,
}

impl IncomeStatementForm {
    /// A blank form: nothing selected, no dates, empty text fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Re-opens a stored statement for editing.
    ///
    /// Every section present in the body comes back selected, with numbers
    /// written out as plain digit strings. The consent box is always left
    /// unchecked so that a resubmission has to be assured again.
    pub fn from_income_statement(statement: &IncomeStatement) -> Self {
        let body = &statement.body;
        let mut form = Self {
            start_date: Some(body.start_date()),
            end_date: body.end_date(),
            attachments: statement.attachments.clone(),
            ..Self::empty()
        };

        match body {
            IncomeStatementBody::HighestFee(_) => {
                form.highest_fee = true;
            }
            IncomeStatementBody::ChildIncome(child) => {
                form.child_income = true;
                form.other_info = child.other_info.clone();
            }
            IncomeStatementBody::Income(income) => {
                if let Some(gross) = &income.gross {
                    form.gross = GrossForm::from(gross);
                }
                if let Some(entrepreneur) = &income.entrepreneur {
                    form.entrepreneur = EntrepreneurForm::from(entrepreneur);
                }
                form.student = income.student;
                form.alimony_payer = income.alimony_payer;
                form.other_info = income.other_info.clone();
            }
        }

        form
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossForm {
    pub selected: bool,
    pub income_source: Option<IncomeSource>,
    pub estimated_monthly_income: String,
    pub other_income: Option<Vec<OtherIncome>>,
    pub other_income_info: String,
}

impl From<&Gross> for GrossForm {
    fn from(gross: &Gross) -> Self {
        Self {
            selected: true,
            income_source: Some(gross.income_source),
            estimated_monthly_income: gross.estimated_monthly_income.to_string(),
            other_income: Some(gross.other_income.clone()),
            other_income_info: gross.other_income_info.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntrepreneurForm {
    pub selected: bool,
    pub full_time: Option<bool>,
    pub start_of_entrepreneurship: Option<NaiveDate>,
    pub company_name: String,
    pub business_id: String,
    pub spouse_works_in_company: Option<bool>,
    pub startup_grant: bool,
    pub checkup_consent: bool,
    pub self_employed: SelfEmployedForm,
    pub limited_company: LimitedCompanyForm,
    pub partnership: bool,
    pub light_entrepreneur: bool,
    pub accountant: AccountantForm,
}

impl From<&Entrepreneur> for EntrepreneurForm {
    fn from(entrepreneur: &Entrepreneur) -> Self {
        Self {
            selected: true,
            full_time: Some(entrepreneur.full_time),
            start_of_entrepreneurship: Some(entrepreneur.start_of_entrepreneurship),
            company_name: entrepreneur.company_name.clone(),
            business_id: entrepreneur.business_id.clone(),
            spouse_works_in_company: Some(entrepreneur.spouse_works_in_company),
            startup_grant: entrepreneur.startup_grant,
            checkup_consent: entrepreneur.checkup_consent,
            self_employed: entrepreneur
                .self_employed
                .as_ref()
                .map(SelfEmployedForm::from)
                .unwrap_or_default(),
            limited_company: entrepreneur
                .limited_company
                .as_ref()
                .map(LimitedCompanyForm::from)
                .unwrap_or_default(),
            partnership: entrepreneur.partnership,
            light_entrepreneur: entrepreneur.light_entrepreneur,
            accountant: entrepreneur
                .accountant
                .as_ref()
                .map(AccountantForm::from)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelfEmployedForm {
    pub selected: bool,
    /// Whether the applicant gives an income estimate instead of
    /// bookkeeping documents.
    pub estimation: bool,
    pub estimated_monthly_income: String,
    pub income_start_date: Option<NaiveDate>,
    pub income_end_date: Option<NaiveDate>,
    /// Applicant will deliver bookkeeping documents as attachments.
    pub attachments: bool,
}

impl From<&SelfEmployed> for SelfEmployedForm {
    fn from(self_employed: &SelfEmployed) -> Self {
        let estimated = self_employed.estimated_income.as_ref();
        Self {
            selected: true,
            estimation: estimated.is_some(),
            estimated_monthly_income: estimated
                .map(|e| e.estimated_monthly_income.to_string())
                .unwrap_or_default(),
            income_start_date: estimated.map(|e| e.income_start_date),
            income_end_date: estimated.and_then(|e| e.income_end_date),
            attachments: self_employed.attachments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitedCompanyForm {
    pub selected: bool,
    pub income_source: Option<IncomeSource>,
}

impl From<&LimitedCompany> for LimitedCompanyForm {
    fn from(limited_company: &LimitedCompany) -> Self {
        Self {
            selected: true,
            income_source: Some(limited_company.income_source),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountantForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl From<&Accountant> for AccountantForm {
    fn from(accountant: &Accountant) -> Self {
        Self {
            name: accountant.name.clone(),
            address: accountant.address.clone(),
            phone: accountant.phone.clone(),
            email: accountant.email.clone(),
        }
    }
}

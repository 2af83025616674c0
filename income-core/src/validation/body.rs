//! Assembles the request body from a filled-in form.
//!
//! # Rules
//!
//! | Step | Check                                             | Applies to        |
//! |------|---------------------------------------------------|-------------------|
//! | 1    | consent box is checked                            | final only        |
//! | 2    | start date is given                               | always            |
//! | 3    | end date is not before start date                 | final only        |
//! | 4    | highest fee: adults only, skips everything below  | always            |
//! | 5    | end date is given                                 | final, adult only |
//! | 6    | child income: skips income sections               | always            |
//! | 7    | gross and entrepreneur valid, at least one given  | always            |
//!
//! A draft is saved with whatever the user has entered so far, so the
//! completeness checks in steps 1, 3 and 5 (and the accountant contact
//! details) are relaxed for drafts. Malformed input is rejected in both
//! modes.

use thiserror::Error;
use tracing::debug;

use crate::models::{
    ChildIncomeBody, HighestFeeBody, IncomeBody, IncomeStatementBody, IncomeStatementForm,
    PersonType,
};
use crate::validation::outcome::Validation;
use crate::validation::sections::{validate_entrepreneur, validate_gross};

/// Why a form could not be turned into a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("the information has not been assured as correct")]
    NotAssured,

    #[error("start date is missing")]
    MissingStartDate,

    #[error("end date is before start date")]
    EndDateBeforeStartDate,

    #[error("highest fee can only be chosen for an adult")]
    HighestFeeForChild,

    #[error("end date is missing")]
    MissingEndDate,

    #[error("gross income section is invalid")]
    InvalidGross,

    #[error("entrepreneur section is invalid")]
    InvalidEntrepreneur,

    #[error("no income has been declared")]
    NoIncomeDeclared,
}

/// Builds the request body for `form`, or explains why it cannot be sent.
///
/// With `draft` set, incomplete but well-formed forms are accepted so the
/// user can save and continue later.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use income_core::models::{IncomeStatementBody, IncomeStatementForm, PersonType};
/// use income_core::validation::{from_body, BodyError};
///
/// let form = IncomeStatementForm {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
///     highest_fee: true,
///     ..IncomeStatementForm::empty()
/// };
///
/// let draft = from_body(PersonType::Adult, &form, true).unwrap();
/// assert!(matches!(draft, IncomeStatementBody::HighestFee(_)));
///
/// // A final submission needs the consent box.
/// assert_eq!(from_body(PersonType::Adult, &form, false), Err(BodyError::NotAssured));
/// ```
pub fn from_body(
    person_type: PersonType,
    form: &IncomeStatementForm,
    draft: bool,
) -> Result<IncomeStatementBody, BodyError> {
    let result = assemble(person_type, form, draft);
    if let Err(error) = &result {
        debug!(
            person_type = person_type.as_str(),
            draft,
            %error,
            "income statement form rejected"
        );
    }
    result
}

fn assemble(
    person_type: PersonType,
    form: &IncomeStatementForm,
    draft: bool,
) -> Result<IncomeStatementBody, BodyError> {
    if !draft && !form.assure {
        return Err(BodyError::NotAssured);
    }

    let start_date = form.start_date.ok_or(BodyError::MissingStartDate)?;
    let end_date = form.end_date;

    if !draft && end_date.is_some_and(|end| start_date > end) {
        return Err(BodyError::EndDateBeforeStartDate);
    }

    if form.highest_fee {
        return match person_type {
            PersonType::Child => Err(BodyError::HighestFeeForChild),
            PersonType::Adult => Ok(IncomeStatementBody::HighestFee(HighestFeeBody {
                start_date,
                end_date,
            })),
        };
    }

    if !draft && person_type == PersonType::Adult && end_date.is_none() {
        return Err(BodyError::MissingEndDate);
    }

    let attachment_ids = form.attachments.iter().map(|a| a.id).collect();

    if form.child_income {
        return Ok(IncomeStatementBody::ChildIncome(ChildIncomeBody {
            start_date,
            end_date,
            other_info: form.other_info.clone(),
            attachment_ids,
        }));
    }

    let gross = match validate_gross(&form.gross) {
        Validation::Valid(gross) => Some(gross),
        Validation::Absent => None,
        Validation::Invalid => return Err(BodyError::InvalidGross),
    };
    let entrepreneur = match validate_entrepreneur(&form.entrepreneur, draft) {
        Validation::Valid(entrepreneur) => Some(entrepreneur),
        Validation::Absent => None,
        Validation::Invalid => return Err(BodyError::InvalidEntrepreneur),
    };

    if gross.is_none() && entrepreneur.is_none() {
        return Err(BodyError::NoIncomeDeclared);
    }

    Ok(IncomeStatementBody::Income(IncomeBody {
        start_date,
        end_date,
        gross,
        entrepreneur,
        student: form.student,
        alimony_payer: form.alimony_payer,
        other_info: form.other_info.clone(),
        attachment_ids,
    }))
}

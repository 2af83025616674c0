//! Validators for the individual form sections.
//!
//! Each validator looks at one slice of the form and returns a
//! [`Validation`]: the normalized section, `Absent` when the section was
//! not selected, or `Invalid` when it was selected but cannot be accepted.
//! Only the accountant contact details depend on the draft flag; all other
//! checks apply to drafts and final submissions alike.

use tracing::debug;

use crate::models::{
    Accountant, AccountantForm, Entrepreneur, EntrepreneurForm, EstimatedIncome, Gross,
    GrossForm, LimitedCompany, LimitedCompanyForm, SelfEmployed, SelfEmployedForm,
};
use crate::validation::common::parse_int;
use crate::validation::outcome::{Invalid, Validation};

/// Validates the salary section.
///
/// Invalid when no income source is chosen or the monthly estimate is not a
/// whole number. A missing other-income list is normalized to an empty one.
pub fn validate_gross(form: &GrossForm) -> Validation<Gross> {
    if !form.selected {
        return Validation::Absent;
    }

    let Some(income_source) = form.income_source else {
        debug!("gross income selected without an income source");
        return Validation::Invalid;
    };

    let Some(estimated_monthly_income) = parse_int(&form.estimated_monthly_income) else {
        debug!(
            input = %form.estimated_monthly_income,
            "gross monthly income is not a whole number"
        );
        return Validation::Invalid;
    };

    Validation::Valid(Gross {
        income_source,
        estimated_monthly_income,
        other_income: form.other_income.clone().unwrap_or_default(),
        other_income_info: form.other_income_info.clone(),
    })
}

/// Validates the entrepreneur section and its nested sub-forms.
///
/// An accountant is collected when the applicant has a limited company, is
/// self-employed or is in a partnership. Light entrepreneurs on their own
/// are not asked for one.
pub fn validate_entrepreneur(
    form: &EntrepreneurForm,
    draft: bool,
) -> Validation<Entrepreneur> {
    if !form.selected {
        return Validation::Absent;
    }
    entrepreneur(form, draft).into()
}

fn entrepreneur(
    form: &EntrepreneurForm,
    draft: bool,
) -> Result<Entrepreneur, Invalid> {
    let self_employed = validate_self_employed(&form.self_employed);
    let limited_company = validate_limited_company(&form.limited_company);

    let (Some(full_time), Some(start_of_entrepreneurship), Some(spouse_works_in_company)) = (
        form.full_time,
        form.start_of_entrepreneurship,
        form.spouse_works_in_company,
    ) else {
        debug!("entrepreneur section is missing a required answer");
        return Err(Invalid);
    };

    let self_employed = self_employed.into_result()?;
    let limited_company = limited_company.into_result()?;

    if self_employed.is_none()
        && limited_company.is_none()
        && !form.partnership
        && !form.light_entrepreneur
    {
        debug!("entrepreneur section has no business type selected");
        return Err(Invalid);
    }

    let accountant = if limited_company.is_some() || self_employed.is_some() || form.partnership {
        validate_accountant(&form.accountant, draft).into_result()?
    } else {
        None
    };

    Ok(Entrepreneur {
        full_time,
        start_of_entrepreneurship,
        company_name: form.company_name.clone(),
        business_id: form.business_id.clone(),
        spouse_works_in_company,
        startup_grant: form.startup_grant,
        checkup_consent: form.checkup_consent,
        self_employed,
        limited_company,
        partnership: form.partnership,
        light_entrepreneur: form.light_entrepreneur,
        accountant,
    })
}

/// Validates the self-employed sub-form. The income estimate is only
/// checked when the applicant chose to give one.
pub fn validate_self_employed(form: &SelfEmployedForm) -> Validation<SelfEmployed> {
    if !form.selected {
        return Validation::Absent;
    }

    let estimated_income = if form.estimation {
        match validate_estimated_income(form) {
            Validation::Valid(estimated) => Some(estimated),
            Validation::Absent => None,
            Validation::Invalid => return Validation::Invalid,
        }
    } else {
        None
    };

    Validation::Valid(SelfEmployed {
        attachments: form.attachments,
        estimated_income,
    })
}

/// Validates a self-employed income estimate.
///
/// Invalid when the monthly amount is not a whole number, the start date is
/// missing, or the end date falls before the start date.
pub fn validate_estimated_income(form: &SelfEmployedForm) -> Validation<EstimatedIncome> {
    let Some(estimated_monthly_income) = parse_int(&form.estimated_monthly_income) else {
        debug!(
            input = %form.estimated_monthly_income,
            "estimated monthly income is not a whole number"
        );
        return Validation::Invalid;
    };

    let Some(income_start_date) = form.income_start_date else {
        debug!("estimated income has no start date");
        return Validation::Invalid;
    };

    if let Some(income_end_date) = form.income_end_date {
        if income_start_date > income_end_date {
            debug!(
                %income_start_date,
                %income_end_date,
                "estimated income ends before it starts"
            );
            return Validation::Invalid;
        }
    }

    Validation::Valid(EstimatedIncome {
        estimated_monthly_income,
        income_start_date,
        income_end_date: form.income_end_date,
    })
}

pub fn validate_limited_company(form: &LimitedCompanyForm) -> Validation<LimitedCompany> {
    if !form.selected {
        return Validation::Absent;
    }
    match form.income_source {
        Some(income_source) => Validation::Valid(LimitedCompany { income_source }),
        None => {
            debug!("limited company selected without an income source");
            Validation::Invalid
        }
    }
}

/// Trims the accountant's contact details. Outside drafts, name, phone and
/// email must be filled in; the address is always optional.
pub fn validate_accountant(
    form: &AccountantForm,
    draft: bool,
) -> Validation<Accountant> {
    let accountant = Accountant {
        name: form.name.trim().to_string(),
        address: form.address.trim().to_string(),
        phone: form.phone.trim().to_string(),
        email: form.email.trim().to_string(),
    };

    if !draft
        && (accountant.name.is_empty() || accountant.phone.is_empty() || accountant.email.is_empty())
    {
        debug!("accountant contact details are incomplete");
        return Validation::Invalid;
    }

    Validation::Valid(accountant)
}

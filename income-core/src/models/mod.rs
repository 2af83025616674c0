mod attachment;
mod body;
mod form;
mod income_source;
mod person_type;
mod statement;

pub use attachment::{Attachment, AttachmentId, AttachmentType};
pub use body::{
    Accountant, ChildIncomeBody, Entrepreneur, EstimatedIncome, Gross, HighestFeeBody,
    IncomeBody, IncomeStatementBody, IncomeStatementType, LimitedCompany, SelfEmployed,
};
pub use form::{
    AccountantForm, EntrepreneurForm, GrossForm, IncomeStatementForm, LimitedCompanyForm,
    SelfEmployedForm,
};
pub use income_source::{IncomeSource, OtherIncome};
pub use person_type::PersonType;
pub use statement::{IncomeStatement, IncomeStatementId, IncomeStatementStatus};

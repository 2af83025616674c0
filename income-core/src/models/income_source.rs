use serde::{Deserialize, Serialize};

/// Where the applicant's income information is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeSource {
    /// Salary data is fetched from the national incomes register.
    IncomesRegister,
    /// The applicant provides payslips or other documents as attachments.
    Attachments,
}

/// Categories of income other than salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtherIncome {
    Pension,
    AdultEducationAllowance,
    SicknessAllowance,
    ParentalAllowance,
    HomeCareAllowance,
    FlexibleAndPartialHomeCareAllowance,
    Alimony,
    InterestAndInvestmentIncome,
    RentalIncome,
    UnemploymentAllowance,
    LabourMarketSubsidy,
    AdjustedDailyAllowance,
    JobAlternationCompensation,
    RewardOrBonus,
    RelativeCareSupport,
    BasicIncome,
    ForestIncome,
    FamilyCareCompensation,
    Rehabilitation,
    EducationAllowance,
    Grant,
    ApprenticeshipSalary,
    AccidentInsuranceCompensation,
    OtherIncome,
}

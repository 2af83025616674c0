use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(pub Uuid);

impl AttachmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What an uploaded document proves. Mirrors the other income categories
/// plus the documents entrepreneurs and students are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
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
    AlimonyPayout,
    Payslip,
    StartupGrant,
    Salary,
    AccountantReport,
    AccountantReportLlc,
    ProfitAndLossStatement,
    ProofOfStudies,
    ChildIncome,
}

/// A reference to an already uploaded file. The file contents never pass
/// through this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub content_type: String,
    #[serde(default)]
    pub attachment_type: Option<AttachmentType>,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_TAX_YEAR, FilingStatus, HsaCoverage};

/// Everything a household enters about itself for one estimate.
///
/// Money amounts are expected to be non-negative; the caller validates them.
/// Spouse contribution and coverage fields are only read for a joint return,
/// spouse age flags only when a spouse exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdInputs {
    pub tax_year: i32,
    /// `None` until the household picks a status; no estimate is produced.
    pub filing_status: Option<FilingStatus>,
    pub gross_income: Decimal,

    pub is_age_50_plus: bool,
    pub is_age_65_plus: bool,
    pub is_spouse_age_50_plus: bool,
    pub is_spouse_age_65_plus: bool,
    pub num_dependents: u32,

    // Pre-tax contributions
    pub retirement_contributions: Decimal,
    pub spouse_retirement_contributions: Decimal,
    pub ira_contributions: Decimal,
    pub spouse_ira_contributions: Decimal,
    pub hsa_coverage: HsaCoverage,
    pub hsa_contributions: Decimal,
    pub health_insurance_premiums: Decimal,
    pub fsa_contributions: Decimal,
    pub student_loan_interest: Decimal,
    pub educator_expenses: Decimal,

    // Traditional IRA deductibility
    pub is_covered_by_employer_plan: bool,
    pub is_spouse_covered_by_employer_plan: bool,
    /// Treat the filer's Traditional IRA contribution as non-deductible
    /// (backdoor Roth).
    pub is_non_deductible_ira: bool,
    pub is_spouse_non_deductible_ira: bool,
}

impl Default for HouseholdInputs {
    fn default() -> Self {
        Self {
            tax_year: DEFAULT_TAX_YEAR,
            filing_status: None,
            gross_income: Decimal::ZERO,
            is_age_50_plus: false,
            is_age_65_plus: false,
            is_spouse_age_50_plus: false,
            is_spouse_age_65_plus: false,
            num_dependents: 0,
            retirement_contributions: Decimal::ZERO,
            spouse_retirement_contributions: Decimal::ZERO,
            ira_contributions: Decimal::ZERO,
            spouse_ira_contributions: Decimal::ZERO,
            hsa_coverage: HsaCoverage::None,
            hsa_contributions: Decimal::ZERO,
            health_insurance_premiums: Decimal::ZERO,
            fsa_contributions: Decimal::ZERO,
            student_loan_interest: Decimal::ZERO,
            educator_expenses: Decimal::ZERO,
            is_covered_by_employer_plan: false,
            is_spouse_covered_by_employer_plan: false,
            is_non_deductible_ira: false,
            is_spouse_non_deductible_ira: false,
        }
    }
}

impl HouseholdInputs {
    /// Catch-up contribution limits apply from age 50.
    pub fn is_catch_up_eligible(&self) -> bool {
        self.is_age_50_plus || self.is_age_65_plus
    }

    /// Uses the spouse's own age flags, never the filer's.
    pub fn is_spouse_catch_up_eligible(&self) -> bool {
        self.is_spouse_age_50_plus || self.is_spouse_age_65_plus
    }

    pub fn is_joint(&self) -> bool {
        self.filing_status.is_some_and(|status| status.is_joint())
    }
}

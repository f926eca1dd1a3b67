use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, IraDeductionResult};

/// Display descriptor for a marginal bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketInfo {
    pub rate: Decimal,
    pub rate_percent: u32,
    pub rate_name: String,
}

/// Income and tax attributed to one bracket of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub rate: Decimal,
    pub rate_percent: u32,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub income_in_bracket: Decimal,
    pub tax_in_bracket: Decimal,
    /// The bracket that contains the taxable income.
    pub is_active: bool,
}

/// Projected effect of contributing more pre-tax money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialSavings {
    pub additional_401k: Decimal,
    pub additional_ira: Decimal,
    pub total_additional: Decimal,
    pub tax_savings: Decimal,
    pub marginal_rate: Decimal,
    pub new_marginal_rate: Decimal,
    pub current_taxable_income: Decimal,
    pub new_taxable_income: Decimal,
}

/// Full result of a household estimate. Rates are fractions (0.22 = 22%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
    pub magi: Decimal,

    // Contributions as entered
    pub retirement_contributions: Decimal,
    pub spouse_retirement_contributions: Decimal,
    pub ira_contributions: Decimal,
    pub spouse_ira_contributions: Decimal,
    pub hsa_contributions: Decimal,
    pub health_insurance_premiums: Decimal,
    pub fsa_contributions: Decimal,
    pub student_loan_interest: Decimal,
    pub educator_expenses: Decimal,

    // Deductions
    pub standard_deduction: Decimal,
    /// Deductible contributions only; excludes the standard deduction and
    /// any non-deductible IRA amount.
    pub total_deductions: Decimal,
    pub ira_deduction: IraDeductionResult,
    pub deductible_ira_amount: Decimal,
    pub spouse_ira_deduction: Option<IraDeductionResult>,
    pub deductible_spouse_ira_amount: Decimal,

    // Tax
    pub taxable_income: Decimal,
    pub tax_before_credits: Decimal,
    pub dependent_credit: Decimal,
    pub tax_owed: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub bracket_info: BracketInfo,

    // Headroom and projections
    pub retirement_limit: Decimal,
    pub ira_limit: Decimal,
    pub max_additional_401k: Decimal,
    pub max_additional_ira: Decimal,
    pub max_additional_spouse_ira: Decimal,
    pub potential_savings_401k: Option<PotentialSavings>,
    pub potential_savings_ira: Option<PotentialSavings>,
    pub potential_savings_max_401k: Option<PotentialSavings>,
    pub potential_savings_max_ira: Option<PotentialSavings>,
}

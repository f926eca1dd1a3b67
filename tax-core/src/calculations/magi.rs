//! Modified Adjusted Gross Income.
//!
//! MAGI decides Traditional IRA deductibility and Roth eligibility, so
//! Traditional IRA contributions are never part of it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::subtract_floored;
use crate::models::HouseholdInputs;

/// Above-the-line amounts subtracted from gross income to reach MAGI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagiAdjustments {
    pub retirement_contributions: Decimal,
    /// Only non-zero on a joint return.
    pub spouse_retirement_contributions: Decimal,
    pub hsa_contributions: Decimal,
    pub health_insurance_premiums: Decimal,
    pub fsa_contributions: Decimal,
    pub student_loan_interest: Decimal,
    pub educator_expenses: Decimal,
}

impl MagiAdjustments {
    pub fn from_household(inputs: &HouseholdInputs) -> Self {
        Self {
            retirement_contributions: inputs.retirement_contributions,
            spouse_retirement_contributions: if inputs.is_joint() {
                inputs.spouse_retirement_contributions
            } else {
                Decimal::ZERO
            },
            hsa_contributions: inputs.hsa_contributions,
            health_insurance_premiums: inputs.health_insurance_premiums,
            fsa_contributions: inputs.fsa_contributions,
            student_loan_interest: inputs.student_loan_interest,
            educator_expenses: inputs.educator_expenses,
        }
    }

    /// Adjustments in the order they are applied.
    fn in_order(&self) -> [Decimal; 7] {
        [
            self.retirement_contributions,
            self.spouse_retirement_contributions,
            self.hsa_contributions,
            self.health_insurance_premiums,
            self.fsa_contributions,
            self.student_loan_interest,
            self.educator_expenses,
        ]
    }
}

/// Subtracts each adjustment from gross income in turn, flooring at zero after
/// every step.
pub fn calculate_magi(
    gross_income: Decimal,
    adjustments: &MagiAdjustments,
) -> Decimal {
    adjustments
        .in_order()
        .into_iter()
        .fold(gross_income, subtract_floored)
}

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ParameterError;
use crate::models::{
    BracketLadder, ContributionLimits, FilingStatus, FilingStatusTable, PhaseOutRange,
    StandardDeduction, TraditionalIraPhaseOuts,
};

/// Every IRS parameter the engine needs for a single tax year.
///
/// Built once when the parameter table is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxYearParameters {
    pub tax_year: i32,
    pub brackets: FilingStatusTable<BracketLadder>,
    pub standard_deductions: FilingStatusTable<StandardDeduction>,
    /// Non-refundable credit per dependent.
    pub dependent_credit: Decimal,
    pub limits: ContributionLimits,
    pub traditional_ira_phase_outs: TraditionalIraPhaseOuts,
    pub roth_ira_phase_outs: FilingStatusTable<PhaseOutRange>,
}

impl TaxYearParameters {
    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &BracketLadder {
        self.brackets.get(status)
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> &StandardDeduction {
        self.standard_deductions.get(status)
    }

    pub fn roth_phase_out(
        &self,
        status: FilingStatus,
    ) -> PhaseOutRange {
        *self.roth_ira_phase_outs.get(status)
    }

    /// Checks the scalar parameters. Bracket ladders are already validated
    /// by [`BracketLadder::new`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        let year = self.tax_year;

        for (name, range) in self.traditional_ira_phase_outs.named() {
            if range.end < range.start {
                return Err(ParameterError::InvalidPhaseOut { year, name });
            }
        }
        for (status, range) in self.roth_ira_phase_outs.iter() {
            if range.end < range.start {
                return Err(ParameterError::InvalidPhaseOut {
                    year,
                    name: roth_range_name(status),
                });
            }
        }

        let limits = &self.limits;
        let checks: [(&'static str, bool); 6] = [
            (
                "retirement",
                limits.retirement.standard >= Decimal::ZERO
                    && limits.retirement.catch_up >= limits.retirement.standard,
            ),
            (
                "ira",
                limits.ira.standard > Decimal::ZERO && limits.ira.catch_up >= limits.ira.standard,
            ),
            (
                "hsa",
                limits.hsa.self_only >= Decimal::ZERO
                    && limits.hsa.family >= limits.hsa.self_only
                    && limits.hsa.catch_up >= Decimal::ZERO,
            ),
            ("fsa", limits.fsa >= Decimal::ZERO),
            (
                "student_loan_interest",
                limits.student_loan_interest >= Decimal::ZERO,
            ),
            ("educator_expenses", limits.educator_expenses >= Decimal::ZERO),
        ];
        if let Some((name, _)) = checks.into_iter().find(|(_, ok)| !ok) {
            return Err(ParameterError::InvalidLimit { year, name });
        }

        if self.dependent_credit < Decimal::ZERO {
            return Err(ParameterError::InvalidLimit {
                year,
                name: "dependent_credit",
            });
        }

        Ok(())
    }
}

fn roth_range_name(status: FilingStatus) -> &'static str {
    match status {
        FilingStatus::Single => "roth_single",
        FilingStatus::HeadOfHousehold => "roth_head_of_household",
        FilingStatus::MarriedFilingJointly => "roth_married_filing_jointly",
        FilingStatus::MarriedFilingSeparately => "roth_married_filing_separately",
    }
}

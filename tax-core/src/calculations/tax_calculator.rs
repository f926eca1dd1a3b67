//! Household federal income tax estimate for one tax year.
//!
//! # Calculation Order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | MAGI: gross income less pre-tax adjustments (no Traditional IRA) |
//! | 2    | Traditional IRA deduction for the filer, then the spouse on a joint return |
//! | 3    | Non-deductible elections zero the deductible amounts |
//! | 4    | Standard deduction, including the age-65 addition |
//! | 5    | Taxable income: gross less each deduction in turn, floored at zero |
//! | 6    | Tax from the bracket that contains taxable income |
//! | 7    | Dependent credit; tax owed never goes below zero |
//! | 8    | Contribution headroom and "what-if" savings projections |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculator;
//! use tax_core::models::{
//!     BracketLadder, ContributionLimit, ContributionLimits, FilingStatus, FilingStatusTable,
//!     HouseholdInputs, HsaLimit, PhaseOutRange, StandardDeduction, TaxBracket,
//!     TaxYearParameters, TraditionalIraPhaseOuts,
//! };
//!
//! let ladder = |status| {
//!     BracketLadder::new(
//!         2025,
//!         status,
//!         vec![
//!             TaxBracket {
//!                 min_income: dec!(0),
//!                 max_income: Some(dec!(11925)),
//!                 tax_rate: dec!(0.10),
//!                 base_tax: dec!(0),
//!             },
//!             TaxBracket {
//!                 min_income: dec!(11925),
//!                 max_income: None,
//!                 tax_rate: dec!(0.12),
//!                 base_tax: dec!(1192.50),
//!             },
//!         ],
//!     )
//!     .unwrap()
//! };
//! let deduction = StandardDeduction {
//!     amount: dec!(15000),
//!     age_65_addition: dec!(2000),
//! };
//! let range = PhaseOutRange {
//!     start: dec!(79000),
//!     end: dec!(89000),
//! };
//! let params = TaxYearParameters {
//!     tax_year: 2025,
//!     brackets: FilingStatusTable {
//!         single: ladder(FilingStatus::Single),
//!         head_of_household: ladder(FilingStatus::HeadOfHousehold),
//!         married_filing_jointly: ladder(FilingStatus::MarriedFilingJointly),
//!         married_filing_separately: ladder(FilingStatus::MarriedFilingSeparately),
//!     },
//!     standard_deductions: FilingStatusTable {
//!         single: deduction.clone(),
//!         head_of_household: deduction.clone(),
//!         married_filing_jointly: deduction.clone(),
//!         married_filing_separately: deduction,
//!     },
//!     dependent_credit: dec!(2000),
//!     limits: ContributionLimits {
//!         retirement: ContributionLimit {
//!             standard: dec!(23500),
//!             catch_up: dec!(31000),
//!         },
//!         ira: ContributionLimit {
//!             standard: dec!(7000),
//!             catch_up: dec!(8000),
//!         },
//!         hsa: HsaLimit {
//!             self_only: dec!(4150),
//!             family: dec!(8300),
//!             catch_up: dec!(1000),
//!         },
//!         fsa: dec!(3200),
//!         student_loan_interest: dec!(2500),
//!         educator_expenses: dec!(300),
//!     },
//!     traditional_ira_phase_outs: TraditionalIraPhaseOuts {
//!         single_covered: range,
//!         head_of_household_covered: range,
//!         married_both_covered: range,
//!         married_one_covered: range,
//!         married_separate_covered: range,
//!     },
//!     roth_ira_phase_outs: FilingStatusTable {
//!         single: range,
//!         head_of_household: range,
//!         married_filing_jointly: range,
//!         married_filing_separately: range,
//!     },
//! };
//!
//! let inputs = HouseholdInputs {
//!     filing_status: Some(FilingStatus::Single),
//!     gross_income: dec!(60000),
//!     ..Default::default()
//! };
//!
//! let result = TaxCalculator::new(&params)
//!     .calculate(&inputs)
//!     .expect("filing status chosen");
//!
//! assert_eq!(result.taxable_income, dec!(45000));
//! assert_eq!(result.tax_owed, dec!(5161.50));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::brackets::{bracket_info, bracket_tax, find_bracket};
use crate::calculations::common::{max, subtract_floored};
use crate::calculations::magi::{MagiAdjustments, calculate_magi};
use crate::calculations::savings::calculate_potential_savings;
use crate::calculations::traditional_ira::{
    apply_non_deductible_election, calculate_traditional_ira_deductible,
};
use crate::models::{
    BracketLadder, FilingStatus, HouseholdInputs, IraDeductionResult, PotentialSavings,
    TaxCalculationResult, TaxYearParameters,
};

/// Step size of the incremental "what-if" projection.
const PROJECTION_STEP: Decimal = dec!(1000);

/// Calculator for a household estimate against one year's parameters.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    params: &'a TaxYearParameters,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(params: &'a TaxYearParameters) -> Self {
        Self { params }
    }

    /// Runs every step for `inputs` under its own filing status.
    ///
    /// Returns `None` until a filing status is chosen. Spouse contribution
    /// fields are only read on a joint return.
    pub fn calculate(
        &self,
        inputs: &HouseholdInputs,
    ) -> Option<TaxCalculationResult> {
        let filing_status = inputs.filing_status?;
        let joint = filing_status.is_joint();
        let adjustments = MagiAdjustments::from_household(inputs);
        let spouse_retirement = adjustments.spouse_retirement_contributions;
        let spouse_ira = if joint {
            inputs.spouse_ira_contributions
        } else {
            Decimal::ZERO
        };

        // Step 1
        let magi = calculate_magi(inputs.gross_income, &adjustments);

        // Steps 2-3
        let ira_deduction = self.filer_ira_deduction(inputs, filing_status, magi);
        let deductible_ira_amount =
            apply_non_deductible_election(&ira_deduction, inputs.is_non_deductible_ira);
        let spouse_ira_deduction = (spouse_ira > Decimal::ZERO)
            .then(|| self.spouse_ira_deduction(inputs, filing_status, magi));
        let deductible_spouse_ira_amount = spouse_ira_deduction
            .as_ref()
            .map_or(Decimal::ZERO, |result| {
                apply_non_deductible_election(result, inputs.is_spouse_non_deductible_ira)
            });

        // Step 4
        let standard_deduction = self
            .params
            .standard_deduction(filing_status)
            .for_filer(inputs.is_age_65_plus);

        // Step 5
        let taxable_income = Self::taxable_income(
            inputs.gross_income,
            &[
                standard_deduction,
                inputs.retirement_contributions + spouse_retirement,
                deductible_ira_amount + deductible_spouse_ira_amount,
                inputs.hsa_contributions,
                inputs.health_insurance_premiums,
                inputs.fsa_contributions,
                inputs.student_loan_interest,
                inputs.educator_expenses,
            ],
        );

        // Steps 6-7
        let ladder = self.params.brackets(filing_status);
        let bracket = find_bracket(ladder, taxable_income);
        let tax_before_credits = bracket_tax(bracket, taxable_income);
        let dependent_credit = self.params.dependent_credit * Decimal::from(inputs.num_dependents);
        let tax_owed = subtract_floored(tax_before_credits, dependent_credit);
        let effective_rate = if inputs.gross_income > Decimal::ZERO {
            tax_owed / inputs.gross_income
        } else {
            Decimal::ZERO
        };

        let total_deductions = inputs.retirement_contributions
            + spouse_retirement
            + deductible_ira_amount
            + deductible_spouse_ira_amount
            + inputs.hsa_contributions
            + inputs.health_insurance_premiums
            + inputs.fsa_contributions
            + inputs.student_loan_interest
            + inputs.educator_expenses;

        // Step 8
        let catch_up = inputs.is_catch_up_eligible();
        let retirement_limit = self.params.limits.retirement_limit(catch_up);
        let ira_limit = self.params.limits.ira_limit(catch_up);
        let max_additional_401k = max(
            retirement_limit - inputs.retirement_contributions,
            Decimal::ZERO,
        );
        let max_additional_ira = max(ira_limit - inputs.ira_contributions, Decimal::ZERO);
        let max_additional_spouse_ira = if joint {
            let spouse_limit = self
                .params
                .limits
                .ira_limit(inputs.is_spouse_catch_up_eligible());
            max(spouse_limit - spouse_ira, Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        self.check_limits(inputs, filing_status);

        debug!(
            year = self.params.tax_year,
            status = %filing_status,
            magi = %magi,
            taxable_income = %taxable_income,
            tax_owed = %tax_owed,
            "household estimate calculated"
        );

        Some(TaxCalculationResult {
            tax_year: self.params.tax_year,
            filing_status,
            gross_income: inputs.gross_income,
            magi,
            retirement_contributions: inputs.retirement_contributions,
            spouse_retirement_contributions: spouse_retirement,
            ira_contributions: inputs.ira_contributions,
            spouse_ira_contributions: spouse_ira,
            hsa_contributions: inputs.hsa_contributions,
            health_insurance_premiums: inputs.health_insurance_premiums,
            fsa_contributions: inputs.fsa_contributions,
            student_loan_interest: inputs.student_loan_interest,
            educator_expenses: inputs.educator_expenses,
            standard_deduction,
            total_deductions,
            ira_deduction,
            deductible_ira_amount,
            spouse_ira_deduction,
            deductible_spouse_ira_amount,
            taxable_income,
            tax_before_credits,
            dependent_credit,
            tax_owed,
            effective_rate,
            marginal_rate: bracket.tax_rate,
            bracket_info: bracket_info(bracket),
            retirement_limit,
            ira_limit,
            max_additional_401k,
            max_additional_ira,
            max_additional_spouse_ira,
            potential_savings_401k: Self::projection(
                ladder,
                taxable_income,
                max_additional_401k.min(PROJECTION_STEP),
                Decimal::ZERO,
            ),
            potential_savings_ira: Self::projection(
                ladder,
                taxable_income,
                Decimal::ZERO,
                max_additional_ira.min(PROJECTION_STEP),
            ),
            potential_savings_max_401k: Self::projection(
                ladder,
                taxable_income,
                max_additional_401k,
                Decimal::ZERO,
            ),
            potential_savings_max_ira: Self::projection(
                ladder,
                taxable_income,
                Decimal::ZERO,
                max_additional_ira,
            ),
        })
    }

    fn filer_ira_deduction(
        &self,
        inputs: &HouseholdInputs,
        filing_status: FilingStatus,
        magi: Decimal,
    ) -> IraDeductionResult {
        calculate_traditional_ira_deductible(
            self.params,
            magi,
            filing_status,
            inputs.is_covered_by_employer_plan,
            inputs.is_spouse_covered_by_employer_plan,
            inputs.ira_contributions,
            inputs.is_catch_up_eligible(),
        )
    }

    /// Same rules as the filer with the coverage flags swapped and the
    /// spouse's own catch-up eligibility.
    fn spouse_ira_deduction(
        &self,
        inputs: &HouseholdInputs,
        filing_status: FilingStatus,
        magi: Decimal,
    ) -> IraDeductionResult {
        calculate_traditional_ira_deductible(
            self.params,
            magi,
            filing_status,
            inputs.is_spouse_covered_by_employer_plan,
            inputs.is_covered_by_employer_plan,
            inputs.spouse_ira_contributions,
            inputs.is_spouse_catch_up_eligible(),
        )
    }

    /// Reduces gross income by each deduction in turn, never below zero.
    fn taxable_income(
        gross_income: Decimal,
        deductions: &[Decimal],
    ) -> Decimal {
        deductions
            .iter()
            .copied()
            .fold(gross_income, subtract_floored)
    }

    fn projection(
        ladder: &BracketLadder,
        taxable_income: Decimal,
        additional_401k: Decimal,
        additional_ira: Decimal,
    ) -> Option<PotentialSavings> {
        (additional_401k + additional_ira > Decimal::ZERO).then(|| {
            calculate_potential_savings(ladder, taxable_income, additional_401k, additional_ira)
        })
    }

    /// Contributions above their limits are still used as entered.
    fn check_limits(
        &self,
        inputs: &HouseholdInputs,
        filing_status: FilingStatus,
    ) {
        let limits = &self.params.limits;
        let catch_up = inputs.is_catch_up_eligible();

        let checks = [
            (
                "retirement",
                inputs.retirement_contributions,
                limits.retirement_limit(catch_up),
            ),
            (
                "ira",
                inputs.ira_contributions,
                limits.ira_limit(catch_up),
            ),
            (
                "hsa",
                inputs.hsa_contributions,
                limits.hsa_limit(inputs.hsa_coverage, catch_up),
            ),
            ("fsa", inputs.fsa_contributions, limits.fsa),
            (
                "student_loan_interest",
                inputs.student_loan_interest,
                limits.student_loan_interest,
            ),
            (
                "educator_expenses",
                inputs.educator_expenses,
                limits.educator_expenses,
            ),
        ];

        for (name, amount, limit) in checks {
            if amount > limit {
                warn!(
                    year = self.params.tax_year,
                    name,
                    amount = %amount,
                    limit = %limit,
                    "contribution exceeds annual limit"
                );
            }
        }

        if filing_status.is_joint() {
            let spouse_limit = limits.ira_limit(inputs.is_spouse_catch_up_eligible());
            if inputs.spouse_ira_contributions > spouse_limit {
                warn!(
                    year = self.params.tax_year,
                    amount = %inputs.spouse_ira_contributions,
                    limit = %spouse_limit,
                    "spouse IRA contribution exceeds annual limit"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};

    use super::*;
    use crate::models::{Deductibility, HsaCoverage};
    use crate::test_support::params_2025;

    fn calculate(inputs: &HouseholdInputs) -> TaxCalculationResult {
        let params = params_2025();
        TaxCalculator::new(&params).calculate(inputs).unwrap()
    }

    #[test]
    fn single_filer_without_contributions() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(60000),
            ..Default::default()
        });

        assert_eq!(result.magi, dec!(60000));
        assert_eq!(result.standard_deduction, dec!(15000));
        assert_eq!(result.taxable_income, dec!(45000));
        assert_eq!(result.tax_before_credits, dec!(5161.50));
        assert_eq!(result.tax_owed, dec!(5161.50));
        assert_eq!(result.marginal_rate, dec!(0.12));
        assert_eq!(result.effective_rate, dec!(0.086025));
        assert_eq!(result.bracket_info.rate_name, "12%");
        assert_eq!(result.total_deductions, dec!(0));
    }

    #[test]
    fn headroom_and_projections_for_single_filer() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(60000),
            ..Default::default()
        });

        assert_eq!(result.retirement_limit, dec!(23500));
        assert_eq!(result.ira_limit, dec!(7000));
        assert_eq!(result.max_additional_401k, dec!(23500));
        assert_eq!(result.max_additional_ira, dec!(7000));
        assert_eq!(result.max_additional_spouse_ira, dec!(0));

        let step = result.potential_savings_401k.unwrap();
        assert_eq!(step.additional_401k, dec!(1000));
        assert_eq!(step.tax_savings, dec!(120));

        let max_ira = result.potential_savings_max_ira.unwrap();
        assert_eq!(max_ira.new_taxable_income, dec!(38000));
        assert_eq!(max_ira.tax_savings, dec!(840));
    }

    #[test]
    fn covered_single_filer_in_phase_out_gets_partial_deduction() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(84000),
            ira_contributions: dec!(7000),
            is_covered_by_employer_plan: true,
            ..Default::default()
        });

        assert_eq!(result.magi, dec!(84000));
        assert_eq!(result.ira_deduction.deductibility, Deductibility::Partial);
        assert_eq!(result.deductible_ira_amount, dec!(3500));
        assert_eq!(result.taxable_income, dec!(65500));
        assert_eq!(result.tax_owed, dec!(9324));
        assert_eq!(result.total_deductions, dec!(3500));
        assert_eq!(result.potential_savings_ira, None);
        assert_eq!(result.potential_savings_max_ira, None);

        let max_401k = result.potential_savings_max_401k.unwrap();
        assert_eq!(max_401k.tax_savings, dec!(4522.50));
    }

    #[test]
    fn joint_filers_both_covered_above_range_deduct_nothing() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::MarriedFilingJointly),
            gross_income: dec!(150000),
            is_age_50_plus: true,
            is_spouse_age_50_plus: true,
            ira_contributions: dec!(8000),
            spouse_ira_contributions: dec!(8000),
            is_covered_by_employer_plan: true,
            is_spouse_covered_by_employer_plan: true,
            ..Default::default()
        });

        assert_eq!(result.ira_deduction.deductibility, Deductibility::None);
        let spouse = result.spouse_ira_deduction.unwrap();
        assert_eq!(spouse.deductibility, Deductibility::None);
        assert_eq!(spouse.max_contribution, dec!(8000));
        assert_eq!(result.taxable_income, dec!(120000));
        assert_eq!(result.tax_owed, dec!(16228));
        assert_eq!(result.total_deductions, dec!(0));
    }

    #[test]
    fn spouse_uses_swapped_coverage_and_own_catch_up() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::MarriedFilingJointly),
            gross_income: dec!(241000),
            is_age_50_plus: true,
            ira_contributions: dec!(8000),
            spouse_ira_contributions: dec!(8000),
            is_covered_by_employer_plan: true,
            ..Default::default()
        });

        // Filer covered: both-covered range, already past it.
        assert_eq!(result.ira_deduction.deductible_amount, dec!(0));

        // Spouse not covered, filer covered: 236k-246k range, halfway.
        let spouse = result.spouse_ira_deduction.unwrap();
        assert_eq!(spouse.max_contribution, dec!(7000));
        assert_eq!(spouse.deductible_amount, dec!(3500));
        assert_eq!(result.deductible_spouse_ira_amount, dec!(3500));
        assert_eq!(result.max_additional_spouse_ira, dec!(0));
    }

    #[test]
    fn spouse_ira_ignored_on_separate_return() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::MarriedFilingSeparately),
            gross_income: dec!(50000),
            spouse_retirement_contributions: dec!(10000),
            spouse_ira_contributions: dec!(7000),
            ..Default::default()
        });

        assert_eq!(result.spouse_ira_deduction, None);
        assert_eq!(result.magi, dec!(50000));
        assert_eq!(result.taxable_income, dec!(35000));
        assert_eq!(result.spouse_retirement_contributions, dec!(0));
        assert_eq!(result.spouse_ira_contributions, dec!(0));
        assert_eq!(result.max_additional_spouse_ira, dec!(0));
        assert_eq!(result.total_deductions, dec!(0));
    }

    #[test]
    fn joint_return_reports_spouse_contributions() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::MarriedFilingJointly),
            gross_income: dec!(100000),
            spouse_retirement_contributions: dec!(10000),
            spouse_ira_contributions: dec!(7000),
            ..Default::default()
        });

        assert_eq!(result.spouse_retirement_contributions, dec!(10000));
        assert_eq!(result.spouse_ira_contributions, dec!(7000));
        assert_eq!(result.magi, dec!(90000));
        assert_eq!(result.deductible_spouse_ira_amount, dec!(7000));
    }

    #[test]
    fn filing_status_comes_from_household() {
        let params = params_2025();
        let inputs = HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(50000),
            spouse_retirement_contributions: dec!(10000),
            ..Default::default()
        };

        let result = TaxCalculator::new(&params).calculate(&inputs).unwrap();

        assert_eq!(result.filing_status, FilingStatus::Single);
        assert_eq!(
            result.magi,
            calculate_magi(inputs.gross_income, &MagiAdjustments::from_household(&inputs))
        );
        assert_eq!(result.magi, dec!(50000));
    }

    #[test]
    fn no_estimate_without_filing_status() {
        let params = params_2025();
        let inputs = HouseholdInputs {
            gross_income: dec!(50000),
            ..Default::default()
        };

        assert_eq!(TaxCalculator::new(&params).calculate(&inputs), None);
    }

    #[test]
    fn dependent_credit_cannot_make_tax_negative() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(20000),
            num_dependents: 2,
            ..Default::default()
        });

        assert_eq!(result.tax_before_credits, dec!(500));
        assert_eq!(result.dependent_credit, dec!(4000));
        assert_eq!(result.tax_owed, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }

    #[test]
    fn non_deductible_election_is_excluded_from_deductions() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::Single),
            gross_income: dec!(60000),
            ira_contributions: dec!(7000),
            is_non_deductible_ira: true,
            ..Default::default()
        });

        assert_eq!(result.ira_deduction.deductibility, Deductibility::Full);
        assert_eq!(result.ira_deduction.deductible_amount, dec!(7000));
        assert_eq!(result.deductible_ira_amount, dec!(0));
        assert_eq!(result.total_deductions, dec!(0));
        assert_eq!(result.taxable_income, dec!(45000));
    }

    #[test]
    fn age_65_filer_gets_additional_standard_deduction() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::MarriedFilingJointly),
            gross_income: dec!(100000),
            is_age_65_plus: true,
            ..Default::default()
        });

        assert_eq!(result.standard_deduction, dec!(31600));
        assert_eq!(result.retirement_limit, dec!(31000));
    }

    #[test]
    fn deductions_larger_than_income_floor_taxable_income() {
        let result = calculate(&HouseholdInputs {
            filing_status: Some(FilingStatus::HeadOfHousehold),
            gross_income: dec!(30000),
            retirement_contributions: dec!(10000),
            hsa_coverage: HsaCoverage::Family,
            hsa_contributions: dec!(8300),
            ..Default::default()
        });

        assert_eq!(result.magi, dec!(11700));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.tax_owed, dec!(0));
        assert_eq!(result.total_deductions, dec!(18300));
    }

    proptest! {
        #[test]
        fn prop_taxable_income_never_exceeds_gross(
            gross in 0i64..100_000_000,
            retirement in 0i64..3_000_000,
            hsa in 0i64..900_000,
            status_index in 0usize..4,
            dependents in 0u32..6,
        ) {
            let status = FilingStatus::ALL[status_index];
            let result = calculate(&HouseholdInputs {
                filing_status: Some(status),
                gross_income: Decimal::new(gross, 2),
                retirement_contributions: Decimal::new(retirement, 2),
                hsa_contributions: Decimal::new(hsa, 2),
                num_dependents: dependents,
                ..Default::default()
            });

            prop_assert!(result.taxable_income >= Decimal::ZERO);
            prop_assert!(result.taxable_income <= result.gross_income);
            prop_assert!(result.magi <= result.gross_income);
            prop_assert!(result.tax_owed >= Decimal::ZERO);
            prop_assert!(result.tax_owed <= result.tax_before_credits);
        }
    }
}

//! Entry points that select a year from the parameter table and run the
//! calculations against it.

use rust_decimal::Decimal;

use crate::calculations::{
    TaxCalculator, bracket_breakdown, calculate_ira_contribution_recommendations,
    calculate_traditional_ira_deductible, check_roth_ira_eligibility, classify_phase_out,
    phase_out_insights,
};
use crate::error::ParameterError;
use crate::models::{
    BracketBreakdown, ContributionRecommendations, Deductibility, FilingStatus, HouseholdInputs,
    HouseholdRecommendations, IraDeductionResult, IraDeductionUnlock, IraPhaseOut,
    PhaseOutInsights, RothEligibility, TaxCalculationResult, TaxParameterTable,
};

/// Stateless facade over a loaded [`TaxParameterTable`].
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    table: &'a TaxParameterTable,
}

impl<'a> TaxEngine<'a> {
    pub fn new(table: &'a TaxParameterTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TaxParameterTable {
        self.table
    }

    /// Full household estimate.
    ///
    /// Returns `Ok(None)` until a filing status is chosen and gross income is
    /// positive. Fails only when the household's tax year is not loaded.
    pub fn calculate_tax(
        &self,
        inputs: &HouseholdInputs,
    ) -> Result<Option<TaxCalculationResult>, ParameterError> {
        if inputs.filing_status.is_none() || inputs.gross_income <= Decimal::ZERO {
            return Ok(None);
        }

        let params = self.table.get(inputs.tax_year)?;
        Ok(TaxCalculator::new(params).calculate(inputs))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn calculate_traditional_ira_deductible(
        &self,
        magi: Decimal,
        filing_status: FilingStatus,
        self_covered: bool,
        other_covered: bool,
        contribution: Decimal,
        year: i32,
        catch_up_eligible: bool,
    ) -> Result<IraDeductionResult, ParameterError> {
        let params = self.table.get(year)?;
        Ok(calculate_traditional_ira_deductible(
            params,
            magi,
            filing_status,
            self_covered,
            other_covered,
            contribution,
            catch_up_eligible,
        ))
    }

    pub fn check_roth_ira_eligibility(
        &self,
        magi: Decimal,
        filing_status: FilingStatus,
        year: i32,
        catch_up_eligible: bool,
    ) -> Result<RothEligibility, ParameterError> {
        let params = self.table.get(year)?;
        Ok(check_roth_ira_eligibility(
            params,
            magi,
            filing_status,
            catch_up_eligible,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn calculate_ira_contribution_recommendations(
        &self,
        magi: Decimal,
        filing_status: FilingStatus,
        self_covered: bool,
        other_covered: bool,
        year: i32,
        catch_up_eligible: bool,
        current_contribution: Decimal,
    ) -> Result<ContributionRecommendations, ParameterError> {
        let params = self.table.get(year)?;
        Ok(calculate_ira_contribution_recommendations(
            params,
            magi,
            filing_status,
            self_covered,
            other_covered,
            catch_up_eligible,
            current_contribution,
        ))
    }

    /// Phase-out that applies to the filer's Traditional IRA deduction.
    pub fn ira_phase_out(
        &self,
        year: i32,
        filing_status: FilingStatus,
        self_covered: bool,
        other_covered: bool,
    ) -> Result<IraPhaseOut, ParameterError> {
        let params = self.table.get(year)?;
        Ok(classify_phase_out(
            params,
            filing_status,
            self_covered,
            other_covered,
        ))
    }

    /// Recommendations for the filer and, on a joint return, the spouse.
    ///
    /// The spouse is evaluated with the coverage flags swapped, the spouse's
    /// own catch-up eligibility, and the shared household MAGI.
    pub fn household_recommendations(
        &self,
        inputs: &HouseholdInputs,
        result: &TaxCalculationResult,
    ) -> Result<HouseholdRecommendations, ParameterError> {
        let params = self.table.get(result.tax_year)?;
        let status = result.filing_status;

        let filer = calculate_ira_contribution_recommendations(
            params,
            result.magi,
            status,
            inputs.is_covered_by_employer_plan,
            inputs.is_spouse_covered_by_employer_plan,
            inputs.is_catch_up_eligible(),
            inputs.ira_contributions,
        );
        let spouse = status.is_joint().then(|| {
            calculate_ira_contribution_recommendations(
                params,
                result.magi,
                status,
                inputs.is_spouse_covered_by_employer_plan,
                inputs.is_covered_by_employer_plan,
                inputs.is_spouse_catch_up_eligible(),
                inputs.spouse_ira_contributions,
            )
        });

        Ok(HouseholdRecommendations { filer, spouse })
    }

    /// Insights for a filer whose MAGI falls strictly inside a Traditional
    /// IRA phase-out range.
    pub fn phase_out_insights(
        &self,
        inputs: &HouseholdInputs,
        result: &TaxCalculationResult,
    ) -> Result<Option<PhaseOutInsights>, ParameterError> {
        let phase_out = self.ira_phase_out(
            result.tax_year,
            result.filing_status,
            inputs.is_covered_by_employer_plan,
            inputs.is_spouse_covered_by_employer_plan,
        )?;

        Ok(phase_out
            .range()
            .filter(|range| result.magi > range.start && result.magi < range.end)
            .map(|range| {
                phase_out_insights(
                    result.magi,
                    range,
                    result.ira_deduction.max_contribution,
                    result.ira_deduction.deductible_amount,
                )
            }))
    }

    /// How much more of the filer's Traditional IRA becomes deductible when
    /// 401(k) contributions pull MAGI toward the full-deduction threshold.
    ///
    /// `None` unless the deduction is partial, 401(k) headroom remains, and
    /// the lower MAGI actually raises the deduction.
    pub fn ira_deduction_unlock(
        &self,
        inputs: &HouseholdInputs,
        result: &TaxCalculationResult,
    ) -> Result<Option<IraDeductionUnlock>, ParameterError> {
        let current = &result.ira_deduction;
        if current.deductibility != Deductibility::Partial
            || result.retirement_contributions >= result.retirement_limit
        {
            return Ok(None);
        }
        let Some(insights) = self.phase_out_insights(inputs, result)? else {
            return Ok(None);
        };

        let additional_401k_needed = insights
            .magi_reduction_needed
            .min(result.max_additional_401k);
        if additional_401k_needed <= Decimal::ZERO {
            return Ok(None);
        }

        let reduced_magi = result.magi - additional_401k_needed;
        let reduced = self.calculate_traditional_ira_deductible(
            reduced_magi,
            result.filing_status,
            inputs.is_covered_by_employer_plan,
            inputs.is_spouse_covered_by_employer_plan,
            current.max_contribution,
            result.tax_year,
            inputs.is_catch_up_eligible(),
        )?;

        let additional_deductible_amount = reduced.deductible_amount - current.deductible_amount;
        if additional_deductible_amount <= Decimal::ZERO {
            return Ok(None);
        }

        Ok(Some(IraDeductionUnlock {
            additional_401k_needed,
            reduced_magi,
            deductible_amount: reduced.deductible_amount,
            additional_deductible_amount,
            estimated_tax_savings: additional_deductible_amount * result.marginal_rate,
        }))
    }

    /// Income and tax per bracket up to the result's taxable income.
    pub fn bracket_breakdown(
        &self,
        result: &TaxCalculationResult,
    ) -> Result<Vec<BracketBreakdown>, ParameterError> {
        let params = self.table.get(result.tax_year)?;
        Ok(bracket_breakdown(
            params.brackets(result.filing_status),
            result.taxable_income,
        ))
    }
}

//! "What-if" projections for additional pre-tax contributions.

use rust_decimal::Decimal;

use crate::calculations::brackets::{bracket_tax, find_bracket};
use crate::calculations::common::subtract_floored;
use crate::models::{BracketLadder, PotentialSavings};

/// Tax saved by lowering `current_taxable_income` by the additional 401(k)
/// and IRA amounts, assuming both are fully deductible.
///
/// Savings are measured before credits. With nothing additional the
/// projection reports zero savings and an unchanged income.
pub fn calculate_potential_savings(
    ladder: &BracketLadder,
    current_taxable_income: Decimal,
    additional_401k: Decimal,
    additional_ira: Decimal,
) -> PotentialSavings {
    let current_bracket = find_bracket(ladder, current_taxable_income);
    let total_additional = additional_401k + additional_ira;

    if total_additional <= Decimal::ZERO {
        return PotentialSavings {
            additional_401k: Decimal::ZERO,
            additional_ira: Decimal::ZERO,
            total_additional: Decimal::ZERO,
            tax_savings: Decimal::ZERO,
            marginal_rate: current_bracket.tax_rate,
            new_marginal_rate: current_bracket.tax_rate,
            current_taxable_income,
            new_taxable_income: current_taxable_income,
        };
    }

    let new_taxable_income = subtract_floored(current_taxable_income, total_additional);
    let new_bracket = find_bracket(ladder, new_taxable_income);

    let current_tax = bracket_tax(current_bracket, current_taxable_income);
    let new_tax = bracket_tax(new_bracket, new_taxable_income);

    PotentialSavings {
        additional_401k,
        additional_ira,
        total_additional,
        tax_savings: current_tax - new_tax,
        marginal_rate: current_bracket.tax_rate,
        new_marginal_rate: new_bracket.tax_rate,
        current_taxable_income,
        new_taxable_income,
    }
}

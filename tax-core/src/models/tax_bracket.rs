use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::models::FilingStatus;

/// Base tax differences below one cent are tolerated when checking that a
/// schedule is continuous.
const CONTINUITY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A single marginal bracket of an IRS tax-rate schedule.
///
/// Only the coefficients are stored; the tax formula is applied by
/// [`crate::calculations::brackets::bracket_tax`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income where this bracket begins (the previous bracket's upper bound).
    pub min_income: Decimal,
    /// Inclusive upper bound, `None` for the top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    /// Cumulative tax owed at `min_income`.
    pub base_tax: Decimal,
}

impl TaxBracket {
    pub fn contains(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income >= self.min_income
            && self.max_income.is_none_or(|max| taxable_income <= max)
    }
}

/// A validated, ordered bracket schedule for one filing status and year.
///
/// Construction guarantees the ladder is non-empty, starts at zero, is
/// contiguous, ends with an unbounded bracket, and has a continuous tax
/// function at every boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketLadder {
    brackets: Vec<TaxBracket>,
}

impl BracketLadder {
    pub fn new(
        year: i32,
        status: FilingStatus,
        mut brackets: Vec<TaxBracket>,
    ) -> Result<Self, ParameterError> {
        if brackets.is_empty() {
            return Err(ParameterError::MissingBrackets { year, status });
        }

        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));

        if !brackets[0].min_income.is_zero() {
            return Err(ParameterError::FirstBracketNotZero {
                year,
                status,
                found: brackets[0].min_income,
            });
        }

        for pair in brackets.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);

            let Some(lower_max) = lower.max_income else {
                return Err(ParameterError::UnboundedBracketNotLast { year, status });
            };
            if lower_max != upper.min_income {
                return Err(ParameterError::NonContiguousBrackets {
                    year,
                    status,
                    expected: lower_max,
                    found: upper.min_income,
                });
            }

            let expected = lower.base_tax + lower.tax_rate * (lower_max - lower.min_income);
            if (expected - upper.base_tax).abs() > CONTINUITY_TOLERANCE {
                return Err(ParameterError::BracketDiscontinuity {
                    year,
                    status,
                    at: lower_max,
                    expected,
                    found: upper.base_tax,
                });
            }
        }

        if brackets[brackets.len() - 1].max_income.is_some() {
            return Err(ParameterError::BoundedTopBracket { year, status });
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The unbounded top bracket.
    pub fn top(&self) -> &TaxBracket {
        &self.brackets[self.brackets.len() - 1]
    }
}

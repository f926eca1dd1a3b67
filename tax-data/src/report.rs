//! Plain-text rendering of an estimate for the command line.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use tax_core::{
    BracketBreakdown, ContributionRecommendations, Deductibility, HouseholdRecommendations,
    IraDeductionResult, IraDeductionUnlock, IraPhaseOut, PhaseOutInsights, PotentialSavings, TaxCalculationResult,
};

/// Formats a money amount as `$12,345.67`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Formats a fractional rate as a percentage with two decimals.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}

fn deductibility_label(deductibility: Deductibility) -> &'static str {
    match deductibility {
        Deductibility::Full => "fully deductible",
        Deductibility::Partial => "partially deductible",
        Deductibility::None => "not deductible",
    }
}

/// Everything the `tax-estimate` binary prints for one household.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub result: &'a TaxCalculationResult,
    pub phase_out: &'a IraPhaseOut,
    pub insights: Option<&'a PhaseOutInsights>,
    pub unlock: Option<&'a IraDeductionUnlock>,
    pub recommendations: &'a HouseholdRecommendations,
    pub breakdown: &'a [BracketBreakdown],
}

impl Report<'_> {
    fn line(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        value: impl fmt::Display,
    ) -> fmt::Result {
        writeln!(f, "  {label:<24}{value:>16}")
    }

    fn write_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;
        writeln!(
            f,
            "Tax year {}, {}",
            r.tax_year,
            r.filing_status.display_name()
        )?;
        Self::line(f, "Gross income", format_money(r.gross_income))?;
        Self::line(f, "MAGI", format_money(r.magi))?;
        Self::line(f, "Standard deduction", format_money(r.standard_deduction))?;
        Self::line(f, "Other deductions", format_money(r.total_deductions))?;
        Self::line(f, "Taxable income", format_money(r.taxable_income))?;
        Self::line(f, "Tax before credits", format_money(r.tax_before_credits))?;
        Self::line(f, "Dependent credit", format_money(r.dependent_credit))?;
        Self::line(f, "Tax owed", format_money(r.tax_owed))?;
        Self::line(f, "Effective rate", format_rate(r.effective_rate))?;
        Self::line(f, "Marginal bracket", &r.bracket_info.rate_name)
    }

    fn write_ira(
        &self,
        f: &mut fmt::Formatter<'_>,
        owner: &str,
        deduction: &IraDeductionResult,
        deductible: Decimal,
    ) -> fmt::Result {
        writeln!(
            f,
            "  {owner}: {} of {} ({})",
            format_money(deductible),
            format_money(deduction.max_contribution),
            deductibility_label(deduction.deductibility)
        )
    }

    fn write_deductions(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;
        writeln!(f, "Traditional IRA")?;
        writeln!(f, "  {}", self.phase_out.summary())?;
        self.write_ira(f, "Filer", &r.ira_deduction, r.deductible_ira_amount)?;
        if let Some(spouse) = &r.spouse_ira_deduction {
            self.write_ira(f, "Spouse", spouse, r.deductible_spouse_ira_amount)?;
        }

        if let Some(insights) = self.insights {
            writeln!(
                f,
                "  Reduce MAGI by {} to deduct {} more ({} per $1,000)",
                format_money(insights.magi_reduction_needed),
                format_money(insights.additional_deductible_amount),
                format_money(insights.deduction_gain_per_1000)
            )?;
        }
        if let Some(unlock) = self.unlock {
            writeln!(
                f,
                "  Add {} to your 401(k) to deduct {} more (saves about {})",
                format_money(unlock.additional_401k_needed),
                format_money(unlock.additional_deductible_amount),
                format_money(unlock.estimated_tax_savings)
            )?;
        }
        Ok(())
    }

    fn write_recommendation(
        &self,
        f: &mut fmt::Formatter<'_>,
        owner: &str,
        rec: &ContributionRecommendations,
    ) -> fmt::Result {
        writeln!(
            f,
            "  {owner}: Traditional {}, Roth {} of {} (saves about {})",
            format_money(rec.recommended_traditional),
            format_money(rec.recommended_roth),
            format_money(rec.global_limit),
            format_money(rec.estimated_traditional_savings(self.result.marginal_rate))
        )?;
        if !rec.roth_eligible {
            writeln!(f, "  {owner}: not eligible for Roth contributions")?;
        }
        Ok(())
    }

    fn write_projection(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        savings: Option<&PotentialSavings>,
    ) -> fmt::Result {
        let Some(savings) = savings else {
            return Ok(());
        };
        writeln!(
            f,
            "  {label} +{}: saves {} ({} -> {} marginal)",
            format_money(savings.total_additional),
            format_money(savings.tax_savings),
            format_rate(savings.marginal_rate),
            format_rate(savings.new_marginal_rate)
        )
    }

    fn write_breakdown(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Brackets")?;
        for row in self.breakdown {
            let upper = row
                .max_income
                .map_or_else(|| "and up".to_string(), format_money);
            writeln!(
                f,
                "  {:>3}%  {} - {}: {} taxed {}{}",
                row.rate_percent,
                format_money(row.min_income),
                upper,
                format_money(row.income_in_bracket),
                format_money(row.tax_in_bracket),
                if row.is_active { " <" } else { "" }
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        self.write_summary(f)?;
        writeln!(f)?;
        self.write_deductions(f)?;
        writeln!(f)?;

        writeln!(f, "IRA recommendations")?;
        self.write_recommendation(f, "Filer", &self.recommendations.filer)?;
        if let Some(spouse) = &self.recommendations.spouse {
            self.write_recommendation(f, "Spouse", spouse)?;
        }
        writeln!(f)?;

        writeln!(f, "What if")?;
        Self::write_projection(f, "401(k)", r.potential_savings_401k.as_ref())?;
        Self::write_projection(f, "IRA", r.potential_savings_ira.as_ref())?;
        Self::write_projection(f, "Max 401(k)", r.potential_savings_max_401k.as_ref())?;
        Self::write_projection(f, "Max IRA", r.potential_savings_max_ira.as_ref())?;
        if r.max_additional_spouse_ira > Decimal::ZERO {
            writeln!(
                f,
                "  Spouse IRA room: {}",
                format_money(r.max_additional_spouse_ira)
            )?;
        }
        writeln!(f)?;

        self.write_breakdown(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(dec!(5161.5)), "$5,161.50");
        assert_eq!(format_money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_money(dec!(999)), "$999.00");
        assert_eq!(format_money(dec!(0)), "$0.00");
    }

    #[test]
    fn format_money_rounds_half_up() {
        assert_eq!(format_money(dec!(0.005)), "$0.01");
        assert_eq!(format_money(dec!(-1000.125)), "-$1,000.13");
    }

    #[test]
    fn format_rate_as_percentage() {
        assert_eq!(format_rate(dec!(0.086025)), "8.60%");
        assert_eq!(format_rate(dec!(0.22)), "22.00%");
        assert_eq!(format_rate(dec!(0)), "0.00%");
    }
}

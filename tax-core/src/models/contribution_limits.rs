use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// HSA coverage tier, which selects the HSA contribution limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HsaCoverage {
    #[default]
    None,
    SelfOnly,
    Family,
}

/// Annual limit for a contribution type that has an age-based catch-up.
///
/// `catch_up` is the total ceiling for a catch-up eligible filer, not the
/// increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimit {
    pub standard: Decimal,
    pub catch_up: Decimal,
}

impl ContributionLimit {
    pub fn for_filer(
        &self,
        catch_up_eligible: bool,
    ) -> Decimal {
        if catch_up_eligible {
            self.catch_up
        } else {
            self.standard
        }
    }
}

/// HSA limits. `catch_up` is added on top of the tier limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsaLimit {
    pub self_only: Decimal,
    pub family: Decimal,
    pub catch_up: Decimal,
}

impl HsaLimit {
    pub fn for_coverage(
        &self,
        coverage: HsaCoverage,
        catch_up_eligible: bool,
    ) -> Decimal {
        let base = match coverage {
            HsaCoverage::None => return Decimal::ZERO,
            HsaCoverage::SelfOnly => self.self_only,
            HsaCoverage::Family => self.family,
        };
        if catch_up_eligible {
            base + self.catch_up
        } else {
            base
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    /// 401(k) / 403(b) elective deferrals.
    pub retirement: ContributionLimit,
    pub ira: ContributionLimit,
    pub hsa: HsaLimit,
    pub fsa: Decimal,
    pub student_loan_interest: Decimal,
    pub educator_expenses: Decimal,
}

impl ContributionLimits {
    pub fn retirement_limit(
        &self,
        catch_up_eligible: bool,
    ) -> Decimal {
        self.retirement.for_filer(catch_up_eligible)
    }

    pub fn ira_limit(
        &self,
        catch_up_eligible: bool,
    ) -> Decimal {
        self.ira.for_filer(catch_up_eligible)
    }

    pub fn hsa_limit(
        &self,
        coverage: HsaCoverage,
        catch_up_eligible: bool,
    ) -> Decimal {
        self.hsa.for_coverage(coverage, catch_up_eligible)
    }
}

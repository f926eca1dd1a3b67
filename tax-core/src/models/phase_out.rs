use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An income interval over which a benefit shrinks linearly to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutRange {
    pub start: Decimal,
    pub end: Decimal,
}

impl PhaseOutRange {
    pub fn width(&self) -> Decimal {
        self.end - self.start
    }
}

/// Traditional IRA deduction phase-outs by coverage scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraditionalIraPhaseOuts {
    pub single_covered: PhaseOutRange,
    pub head_of_household_covered: PhaseOutRange,
    /// Married filing jointly, the contributing spouse is covered.
    pub married_both_covered: PhaseOutRange,
    /// Married filing jointly, only the other spouse is covered.
    pub married_one_covered: PhaseOutRange,
    /// Married filing separately and covered; starts at zero.
    pub married_separate_covered: PhaseOutRange,
}

impl TraditionalIraPhaseOuts {
    pub fn named(&self) -> [(&'static str, &PhaseOutRange); 5] {
        [
            ("single_covered", &self.single_covered),
            ("head_of_household_covered", &self.head_of_household_covered),
            ("married_both_covered", &self.married_both_covered),
            ("married_one_covered", &self.married_one_covered),
            ("married_separate_covered", &self.married_separate_covered),
        ]
    }
}

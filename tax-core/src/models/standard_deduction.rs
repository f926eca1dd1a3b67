use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Standard deduction for one filing status, with the additional amount
/// allowed for a filer aged 65 or older.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub amount: Decimal,
    pub age_65_addition: Decimal,
}

impl StandardDeduction {
    pub fn for_filer(
        &self,
        is_age_65_plus: bool,
    ) -> Decimal {
        if is_age_65_plus {
            self.amount + self.age_65_addition
        } else {
            self.amount
        }
    }
}

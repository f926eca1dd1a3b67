use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[serde(alias = "S")]
    Single,
    #[serde(alias = "HOH")]
    HeadOfHousehold,
    #[serde(alias = "MFJ")]
    MarriedFilingJointly,
    #[serde(alias = "MFS")]
    MarriedFilingSeparately,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::HeadOfHousehold,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::HeadOfHousehold => "HOH",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "HOH" => Some(Self::HeadOfHousehold),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::HeadOfHousehold => "Head of Household",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
        }
    }

    /// Only a joint return carries a second set of spouse contributions.
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::MarriedFilingJointly)
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One value per filing status.
///
/// Used for every per-status column of the yearly parameter set so that a
/// missing status is a compile error rather than a lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatusTable<T> {
    pub single: T,
    pub head_of_household: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
}

impl<T> FilingStatusTable<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(FilingStatus, T) -> Result<U, E>,
    ) -> Result<FilingStatusTable<U>, E> {
        Ok(FilingStatusTable {
            single: f(FilingStatus::Single, self.single)?,
            head_of_household: f(FilingStatus::HeadOfHousehold, self.head_of_household)?,
            married_filing_jointly: f(
                FilingStatus::MarriedFilingJointly,
                self.married_filing_jointly,
            )?,
            married_filing_separately: f(
                FilingStatus::MarriedFilingSeparately,
                self.married_filing_separately,
            )?,
        })
    }
}

//! Expense categories
//!
//! The category set is fixed. Labels are matched case-sensitively, so
//! "food" is not a valid spelling of "Food".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One label from the fixed set classifying an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Rent,
    Utilities,
    Transportation,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// Every category, in menu order
    pub const ALL: [ExpenseCategory; 6] = [
        Self::Food,
        Self::Rent,
        Self::Utilities,
        Self::Transportation,
        Self::Entertainment,
        Self::Other,
    ];

    /// The label written to the ledger file
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Rent => "Rent",
            Self::Utilities => "Utilities",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Comma-separated list of valid labels, for error messages
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A label outside the fixed category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_labels() {
        for category in ExpenseCategory::ALL {
            assert_eq!(category.as_str().parse::<ExpenseCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!("food".parse::<ExpenseCategory>().is_err());
        assert!("FOOD".parse::<ExpenseCategory>().is_err());
        assert!(" Food".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_unknown_category() {
        let err = "Groceries".parse::<ExpenseCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("Groceries".into()));
    }

    #[test]
    fn test_valid_labels() {
        assert_eq!(
            ExpenseCategory::valid_labels(),
            "Food, Rent, Utilities, Transportation, Entertainment, Other"
        );
    }
}

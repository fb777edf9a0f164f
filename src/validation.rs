//! Validation rules for expense input
//!
//! Validation is pure: it never touches the ledger file. Rules run in a fixed
//! order and the first failure is reported:
//!
//! 1. the name is non-empty after trimming
//! 2. the amount parses as a number and is greater than zero
//! 3. the category is one of the fixed labels (exact, case-sensitive)
//! 4. the date, when given, is `YYYY-MM-DD`
//!
//! Substituting today's date for a missing one is left to the caller.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ExpenseCategory, ExpenseRecord, LedgerEntry, Money, RawRow, DATE_FORMAT};

/// Reasons a candidate expense is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expense name must not be empty")]
    EmptyName,

    #[error("Amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Money),

    #[error("Unknown category '{0}', expected one of: {}", ExpenseCategory::valid_labels())]
    UnknownCategory(String),

    #[error("Date '{0}' is not in YYYY-MM-DD format")]
    InvalidDate(String),
}

/// Unvalidated expense input, as typed by a user or read from a file row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: Option<String>,
    pub name: String,
    pub category: String,
    pub amount: String,
}

impl ExpenseDraft {
    /// Create a draft without a date
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: None,
            name: name.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }

    /// Set the date text
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Draft from fields in ledger column order
    pub fn from_fields(fields: &[String]) -> Self {
        let field = |i: usize| fields.get(i).cloned().unwrap_or_default();
        Self {
            date: Some(field(0)),
            name: field(1),
            category: field(2),
            amount: field(3),
        }
    }
}

/// Input that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    date: Option<NaiveDate>,
    name: String,
    category: ExpenseCategory,
    amount: Money,
}

impl ValidExpense {
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ExpenseCategory {
        self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub(crate) fn into_parts(self) -> (Option<NaiveDate>, String, ExpenseCategory, Money) {
        (self.date, self.name, self.category, self.amount)
    }
}

/// Check a draft against the rules
pub fn validate(draft: &ExpenseDraft) -> Result<ValidExpense, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let amount = Money::parse(&draft.amount)
        .map_err(|_| ValidationError::InvalidAmount(draft.amount.clone()))?;
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    let category: ExpenseCategory = draft
        .category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory(draft.category.clone()))?;

    let date = match draft.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(parse_date(text)?),
    };

    Ok(ValidExpense {
        date,
        name: name.to_string(),
        category,
        amount,
    })
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

/// Turn a row read from the ledger file into a ledger entry
///
/// Only complete, dated, valid rows become records; everything else is kept
/// verbatim as an unparsed row.
pub fn classify_row(fields: Vec<String>, line: Option<u64>) -> LedgerEntry {
    match fields.len() {
        4 => {}
        3 => return LedgerEntry::Unparsed(RawRow::new(fields, line, "row has no date column")),
        n => {
            return LedgerEntry::Unparsed(RawRow::new(
                fields,
                line,
                format!("expected 4 fields, found {}", n),
            ))
        }
    }

    match validate(&ExpenseDraft::from_fields(&fields)) {
        Ok(valid) => match valid.date() {
            Some(date) => LedgerEntry::Record(ExpenseRecord::from_valid(valid, date)),
            None => LedgerEntry::Unparsed(RawRow::new(fields, line, "missing date")),
        },
        Err(e) => LedgerEntry::Unparsed(RawRow::new(fields, line, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category: &str, amount: &str) -> ExpenseDraft {
        ExpenseDraft::new(name, category, amount)
    }

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accepts_valid_draft() {
        let valid = validate(&draft("  Groceries ", "Food", "150").with_date("2023-08-01")).unwrap();
        assert_eq!(valid.name(), "Groceries");
        assert_eq!(valid.category(), ExpenseCategory::Food);
        assert_eq!(valid.amount(), Money::from_dollars(150));
        assert_eq!(valid.date(), NaiveDate::from_ymd_opt(2023, 8, 1));
    }

    #[test]
    fn test_rejects_zero_and_negative_amounts() {
        assert_eq!(
            validate(&draft("Lunch", "Food", "0")),
            Err(ValidationError::NonPositiveAmount(Money::zero()))
        );
        assert_eq!(
            validate(&draft("Lunch", "Food", "-5")),
            Err(ValidationError::NonPositiveAmount(Money::from_dollars(-5)))
        );
    }

    #[test]
    fn test_rejects_unparseable_amount() {
        assert_eq!(
            validate(&draft("Lunch", "Food", "twelve")),
            Err(ValidationError::InvalidAmount("twelve".into()))
        );
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert_eq!(
            validate(&draft("Groceries", "Groceries", "10")),
            Err(ValidationError::UnknownCategory("Groceries".into()))
        );
        assert!(validate(&draft("Groceries", "food", "10")).is_err());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(validate(&draft("", "Food", "10")), Err(ValidationError::EmptyName));
        assert_eq!(validate(&draft("   ", "Food", "10")), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_rejects_bad_date() {
        let result = validate(&draft("Lunch", "Food", "10").with_date("08/01/2023"));
        assert_eq!(result, Err(ValidationError::InvalidDate("08/01/2023".into())));
    }

    #[test]
    fn test_absent_or_blank_date_is_allowed() {
        assert_eq!(validate(&draft("Lunch", "Food", "10")).unwrap().date(), None);
        assert_eq!(
            validate(&draft("Lunch", "Food", "10").with_date("")).unwrap().date(),
            None
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Empty name is reported before the bad amount and category
        assert_eq!(validate(&draft("", "Nope", "-1")), Err(ValidationError::EmptyName));
        // Amount is checked before category
        assert_eq!(
            validate(&draft("Lunch", "Nope", "0")),
            Err(ValidationError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_error_message_lists_categories() {
        let err = ValidationError::UnknownCategory("Housing".into());
        assert!(err.to_string().contains("Food, Rent, Utilities"));
    }

    #[test]
    fn test_classify_valid_row() {
        let entry = classify_row(fields(&["2023-08-02", "Rent", "Rent", "1200.00"]), Some(3));
        let record = entry.as_record().unwrap();
        assert_eq!(record.amount(), Money::from_dollars(1200));
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2023, 8, 2).unwrap());
    }

    #[test]
    fn test_classify_keeps_invalid_rows_verbatim() {
        let raw = fields(&["2023-08-02", "Rent", "Housing", "1200"]);
        match classify_row(raw.clone(), Some(2)) {
            LedgerEntry::Unparsed(row) => {
                assert_eq!(row.fields(), raw.as_slice());
                assert_eq!(row.line(), Some(2));
                assert!(row.reason().contains("Housing"));
            }
            other => panic!("expected unparsed row, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_missing_date_and_legacy_rows() {
        assert!(classify_row(fields(&["", "Tea", "Food", "2"]), None)
            .as_record()
            .is_none());
        assert!(classify_row(fields(&["Tea", "Food", "2.00"]), None)
            .as_record()
            .is_none());
        assert!(classify_row(fields(&["a", "b", "c", "d", "e"]), None)
            .as_record()
            .is_none());
    }
}

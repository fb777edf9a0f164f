//! Expense records and the ledger that orders them
//!
//! A ledger entry is either a fully validated [`ExpenseRecord`] or a
//! [`RawRow`] that was read from disk but fails validation. Raw rows are
//! carried verbatim so rewriting the file never drops user data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;
use crate::validation::ValidExpense;

/// Canonical ledger file columns, in order
pub const LEDGER_COLUMNS: [&str; 4] = ["Date", "Expense Name", "Category", "Amount"];

/// Date format used in the ledger file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated expense
///
/// The only constructor takes a [`ValidExpense`], so a record that exists
/// has passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    id: ExpenseId,
    date: NaiveDate,
    name: String,
    category: ExpenseCategory,
    amount: Money,
}

impl ExpenseRecord {
    /// Build a record from validated input, dating it `today` when the
    /// input carried no date
    pub fn from_valid(valid: ValidExpense, today: NaiveDate) -> Self {
        let (date, name, category, amount) = valid.into_parts();
        Self {
            id: ExpenseId::new(),
            date: date.unwrap_or(today),
            name,
            category,
            amount,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
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

    /// Field values in ledger column order
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.name.clone(),
            self.category.as_str().to_string(),
            self.amount.to_decimal_string(),
        ]
    }

    /// True when both records hold the same values, ignoring identity
    #[cfg(test)]
    pub(crate) fn same_values(&self, other: &ExpenseRecord) -> bool {
        self.date == other.date
            && self.name == other.name
            && self.category == other.category
            && self.amount == other.amount
    }

    pub(crate) fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = id;
        self
    }
}

/// A stored row that does not pass validation
///
/// Rows with three fields are the legacy `name,category,amount` layout and
/// have no date column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    id: ExpenseId,
    fields: Vec<String>,
    line: Option<u64>,
    reason: String,
    /// Original bytes of a row that is not valid UTF-8
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw: Option<Vec<Vec<u8>>>,
}

impl RawRow {
    pub fn new(fields: Vec<String>, line: Option<u64>, reason: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::new(),
            fields,
            line,
            reason: reason.into(),
            raw: None,
        }
    }

    /// A row whose bytes are not valid UTF-8
    ///
    /// `fields` is the lossy text used for display; `raw` is written back
    /// unchanged.
    pub fn undecodable(fields: Vec<String>, raw: Vec<Vec<u8>>, line: Option<u64>) -> Self {
        Self {
            raw: Some(raw),
            ..Self::new(fields, line, "row is not valid UTF-8")
        }
    }

    pub fn is_undecodable(&self) -> bool {
        self.raw.is_some()
    }

    /// Bytes written back to disk for this row
    pub fn to_bytes(&self) -> Vec<Vec<u8>> {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => self.fields.iter().map(|f| f.clone().into_bytes()).collect(),
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    /// Fields exactly as read from disk
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Line number in the ledger file, when known
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Why the row failed validation
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn is_legacy(&self) -> bool {
        self.fields.len() == 3
    }

    pub fn date_field(&self) -> &str {
        if self.is_legacy() {
            ""
        } else {
            self.field(0)
        }
    }

    pub fn name_field(&self) -> &str {
        self.field(if self.is_legacy() { 0 } else { 1 })
    }

    pub fn category_field(&self) -> &str {
        self.field(if self.is_legacy() { 1 } else { 2 })
    }

    pub fn amount_field(&self) -> &str {
        self.field(if self.is_legacy() { 2 } else { 3 })
    }

    /// Field values mapped onto the canonical column order
    pub fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.date_field().to_string(),
            self.name_field().to_string(),
            self.category_field().to_string(),
            self.amount_field().to_string(),
        ]
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = id;
        self
    }
}

/// One position in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntry {
    Record(ExpenseRecord),
    Unparsed(RawRow),
}

impl LedgerEntry {
    pub fn id(&self) -> ExpenseId {
        match self {
            Self::Record(record) => record.id(),
            Self::Unparsed(row) => row.id(),
        }
    }

    pub fn as_record(&self) -> Option<&ExpenseRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Unparsed(_) => None,
        }
    }

    /// Fields as text, in the order they are stored
    pub fn to_fields(&self) -> Vec<String> {
        match self {
            Self::Record(record) => record.to_fields(),
            Self::Unparsed(row) => row.fields().to_vec(),
        }
    }

    /// Field bytes exactly as they are persisted
    pub fn to_bytes(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Record(record) => record.to_fields().into_iter().map(String::into_bytes).collect(),
            Self::Unparsed(row) => row.to_bytes(),
        }
    }

    /// Fields for display, always in canonical column order
    pub fn display_fields(&self) -> Vec<String> {
        match self {
            Self::Record(record) => record.to_fields(),
            Self::Unparsed(row) => row.canonical_fields(),
        }
    }

    pub(crate) fn with_id(self, id: ExpenseId) -> Self {
        match self {
            Self::Record(record) => Self::Record(record.with_id(id)),
            Self::Unparsed(row) => Self::Unparsed(row.with_id(id)),
        }
    }
}

impl From<ExpenseRecord> for LedgerEntry {
    fn from(record: ExpenseRecord) -> Self {
        Self::Record(record)
    }
}

/// The ordered sequence of entries; order equals file row order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    /// Validated records only, in ledger order
    pub fn records(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.entries.iter().filter_map(LedgerEntry::as_record)
    }

    /// Number of rows that failed validation
    pub fn unparsed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, LedgerEntry::Unparsed(_)))
            .count()
    }

    /// Resolve an identifier to its current position
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    pub(crate) fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

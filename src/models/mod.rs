//! Core data models for the expense ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: expense records, categories, amounts and calendar months.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use category::{ExpenseCategory, UnknownCategory};
pub use expense::{ExpenseRecord, Ledger, LedgerEntry, RawRow, DATE_FORMAT, LEDGER_COLUMNS};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};

//! Display formatting for terminal output
//!
//! Formats ledgers and reports as tables for the command-line interface.

pub mod expense;
pub mod report;

pub use expense::{format_entry_line, format_ledger_table};
pub use report::{format_bar, format_percentage, format_report};

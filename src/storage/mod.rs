//! Storage layer for the expense ledger
//!
//! Provides CSV file storage with atomic whole-file rewrites and header
//! repair.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_csv, write_csv_atomic, CsvContents, CsvRow};
pub use ledger::{HeaderStatus, LedgerStore};

//! Expense Ledger - CSV-backed expense tracking against a budget
//!
//! This library provides the core functionality for the `expense` command-line
//! tool. Expenses live in a four-column CSV file; the library validates new
//! entries, keeps the file's header intact, totals spending by category and
//! by month, and builds a report that renderers turn into JSON, YAML or CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and the per-invocation session
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, categories, ledger entries)
//! - `validation`: Rules every new or edited expense must pass
//! - `storage`: CSV file storage with header repair and atomic rewrites
//! - `services`: Business logic layer
//! - `reports`: Aggregation and the report model
//! - `export`: Report renderers
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_ledger::config::{LedgerPaths, Session, SessionOverrides, Settings};
//! use expense_ledger::reports::ReportModel;
//!
//! # fn main() -> Result<(), expense_ledger::LedgerError> {
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let session = Session::resolve(&paths, &settings, SessionOverrides::default());
//!
//! let mut store = session.store();
//! let report = ReportModel::generate(store.load()?, session.budget, session.today);
//! println!("{} spent", report.summary.items[1].amount);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{LedgerError, LedgerResult};

//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! validating input before anything is written.

pub mod expense;

pub use expense::{ExpenseEdit, ExpenseService};

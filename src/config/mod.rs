//! Configuration module for the expense ledger
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Per-invocation session values (ledger file, budget, today's date)

pub mod paths;
pub mod session;
pub mod settings;

pub use paths::LedgerPaths;
pub use session::{Session, SessionOverrides};
pub use settings::Settings;

//! Per-invocation context
//!
//! A [`Session`] carries the values every engine call needs: which ledger
//! file to use, the budget to measure against and the date that counts as
//! today. It is built once from settings and command-line overrides and then
//! passed explicitly.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use super::paths::LedgerPaths;
use super::settings::Settings;
use crate::models::Money;
use crate::storage::LedgerStore;

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub ledger_file: Option<PathBuf>,
    pub budget: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub ledger_file: PathBuf,
    pub budget: Money,
    pub currency_symbol: String,
    pub today: NaiveDate,
}

impl Session {
    /// Resolve a session for the current local date
    ///
    /// Overrides win over settings; settings win over built-in defaults.
    pub fn resolve(paths: &LedgerPaths, settings: &Settings, overrides: SessionOverrides) -> Self {
        Self::resolve_on(paths, settings, overrides, Local::now().date_naive())
    }

    /// Resolve a session with a fixed "today"
    pub fn resolve_on(
        paths: &LedgerPaths,
        settings: &Settings,
        overrides: SessionOverrides,
        today: NaiveDate,
    ) -> Self {
        Self {
            ledger_file: overrides
                .ledger_file
                .unwrap_or_else(|| settings.ledger_path(paths)),
            budget: overrides.budget.unwrap_or(settings.budget),
            currency_symbol: settings.currency_symbol.clone(),
            today,
        }
    }

    /// Store bound to this session's ledger file, not yet loaded
    pub fn store(&self) -> LedgerStore {
        LedgerStore::new(self.ledger_file.clone())
    }

    /// Format an amount with the session's currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, 20).unwrap()
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session =
            Session::resolve_on(&paths, &Settings::default(), SessionOverrides::default(), today());

        assert_eq!(session.ledger_file, temp_dir.path().join("expense.csv"));
        assert_eq!(session.budget, Money::from_dollars(2000));
        assert_eq!(session.today, today());
    }

    #[test]
    fn test_overrides_win() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            ledger_file: Some(temp_dir.path().join("settings.csv")),
            budget: Money::from_dollars(900),
            ..Settings::default()
        };
        let overrides = SessionOverrides {
            ledger_file: Some(temp_dir.path().join("cli.csv")),
            budget: Some(Money::from_dollars(50)),
        };

        let session = Session::resolve_on(&paths, &settings, overrides, today());
        assert_eq!(session.ledger_file, temp_dir.path().join("cli.csv"));
        assert_eq!(session.budget, Money::from_dollars(50));
    }

    #[test]
    fn test_settings_ledger_file_used_without_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            ledger_file: Some(temp_dir.path().join("settings.csv")),
            ..Settings::default()
        };

        let session = Session::resolve_on(&paths, &settings, SessionOverrides::default(), today());
        assert_eq!(session.store().path(), temp_dir.path().join("settings.csv").as_path());
    }
}

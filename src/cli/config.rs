//! CLI commands for viewing and changing settings

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{LedgerPaths, Session, Settings};
use crate::error::LedgerResult;
use crate::export::ExportFormat;
use crate::models::Money;

use super::parse_money_arg;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and settings in effect
    Show,

    /// Set the total budget
    #[command(name = "set-budget")]
    SetBudget {
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
    },

    /// Set the ledger file used when --file is not given
    #[command(name = "set-file")]
    SetFile { path: PathBuf },

    /// Set the currency symbol used for display
    #[command(name = "set-currency")]
    SetCurrency { symbol: String },

    /// Set the export format used when none can be inferred
    #[command(name = "set-format")]
    SetFormat {
        #[arg(value_enum)]
        format: ExportFormat,
    },
}

/// Handle config commands
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    session: &Session,
    cmd: ConfigCommands,
) -> LedgerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Config directory: {}", paths.base_dir().display());
            if paths.is_initialized() {
                println!("Settings file:    {}", paths.settings_file().display());
            } else {
                println!(
                    "Settings file:    {} (not written yet, using defaults)",
                    paths.settings_file().display()
                );
            }
            println!("Ledger file:      {}", session.ledger_file.display());
            println!();
            println!("Settings:");
            println!("  Budget:         {}", session.format_money(session.budget));
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Export format:  {}", settings.default_export_format);
            return Ok(());
        }
        ConfigCommands::SetBudget { amount } => {
            settings.budget = amount;
            println!("Budget set to {}", amount.format_with_symbol(&settings.currency_symbol));
        }
        ConfigCommands::SetFile { path } => {
            println!("Ledger file set to {}", path.display());
            settings.ledger_file = Some(path);
        }
        ConfigCommands::SetCurrency { symbol } => {
            println!("Currency symbol set to {}", symbol);
            settings.currency_symbol = symbol;
        }
        ConfigCommands::SetFormat { format } => {
            settings.default_export_format = format;
            println!("Default export format set to {}", format);
        }
    }

    settings.save(paths)
}

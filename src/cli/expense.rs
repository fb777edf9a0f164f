//! Expense CLI commands
//!
//! Implements the commands that read and change the ledger file.

use clap::Subcommand;

use crate::config::Session;
use crate::display::{format_entry_line, format_ledger_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseCategory, LedgerEntry};
use crate::services::{ExpenseEdit, ExpenseService};
use crate::storage::HeaderStatus;
use crate::validation::ExpenseDraft;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (see `categories`)
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List every entry in the ledger
    #[command(alias = "ls")]
    List,

    /// Change fields of an existing entry
    Edit {
        /// Position shown by `list`
        index: usize,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Position shown by `list`
        index: usize,
    },

    /// Check the ledger file header, repairing it if needed
    Check,

    /// List the accepted categories
    Categories,
}

/// Handle expense commands
pub fn handle_expense_command(session: &Session, cmd: ExpenseCommands) -> LedgerResult<()> {
    let mut store = session.store();
    let mut service = ExpenseService::new(&mut store);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            category,
            date,
        } => {
            let mut draft = ExpenseDraft::new(name, category, amount);
            draft.date = date;

            service.add(&draft, session.today)?;
            let ledger = service.list()?;
            let index = ledger.len().saturating_sub(1);
            if let Some(entry) = ledger.get(index) {
                println!(
                    "Added expense #{}: {}",
                    index,
                    format_entry_line(entry, &session.currency_symbol)
                );
            }
        }

        ExpenseCommands::List => {
            let ledger = service.list()?;
            println!("{}", format_ledger_table(ledger, &session.currency_symbol));

            let unparsed = ledger.unparsed_count();
            if unparsed > 0 {
                println!();
                println!(
                    "{} row(s) could not be read as expenses and are kept as-is. \
                     Use 'edit' to fix them.",
                    unparsed
                );
            }
        }

        ExpenseCommands::Edit {
            index,
            name,
            amount,
            category,
            date,
        } => {
            let edit = ExpenseEdit {
                date,
                name,
                category,
                amount,
            };
            if edit.is_empty() {
                return Err(LedgerError::Config(
                    "Nothing to change. Pass at least one of --name, --amount, --category, --date"
                        .into(),
                ));
            }

            service.list()?;
            service.edit_at(index, &edit, session.today)?;
            let entry = service.get(index)?;
            println!(
                "Updated expense #{}: {}",
                index,
                format_entry_line(entry, &session.currency_symbol)
            );
        }

        ExpenseCommands::Delete { index } => {
            service.list()?;
            let removed: LedgerEntry = service.remove_at(index)?;
            println!(
                "Deleted expense #{}: {}",
                index,
                format_entry_line(&removed, &session.currency_symbol)
            );
        }

        ExpenseCommands::Check => {
            let path = session.ledger_file.display();
            match service.check_header()? {
                HeaderStatus::Created => println!("Created {} with a header row", path),
                HeaderStatus::Repaired { rows_preserved } => println!(
                    "Repaired the header of {} ({} data row(s) kept)",
                    path, rows_preserved
                ),
                HeaderStatus::Valid => println!("{} has a valid header", path),
            }
        }

        ExpenseCommands::Categories => {
            for category in ExpenseCategory::ALL {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

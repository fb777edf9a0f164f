//! Ledger display formatting
//!
//! Formats the ledger as a table with the 0-based positions that `edit` and
//! `delete` take.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Ledger, LedgerEntry};

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Expense Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl LedgerRow {
    fn new(index: usize, entry: &LedgerEntry, symbol: &str) -> Self {
        match entry {
            LedgerEntry::Record(record) => Self {
                index,
                date: record.date().format("%Y-%m-%d").to_string(),
                name: truncate(record.name(), 30),
                category: record.category().to_string(),
                amount: record.amount().format_with_symbol(symbol),
                note: String::new(),
            },
            LedgerEntry::Unparsed(row) => Self {
                index,
                date: row.date_field().to_string(),
                name: truncate(row.name_field(), 30),
                category: row.category_field().to_string(),
                amount: row.amount_field().to_string(),
                note: format!("unparsed: {}", row.reason()),
            },
        }
    }
}

/// Format the ledger as a table
pub fn format_ledger_table(ledger: &Ledger, symbol: &str) -> String {
    if ledger.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows = ledger
        .iter()
        .enumerate()
        .map(|(i, entry)| LedgerRow::new(i, entry, symbol));

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string()
}

/// Format one entry on a single line, for confirmations
pub fn format_entry_line(entry: &LedgerEntry, symbol: &str) -> String {
    match entry {
        LedgerEntry::Record(record) => format!(
            "{} {} [{}] {}",
            record.date().format("%Y-%m-%d"),
            record.name(),
            record.category(),
            record.amount().format_with_symbol(symbol)
        ),
        LedgerEntry::Unparsed(row) => row.fields().join(","),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! CLI commands for the budget summary and report export

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Session;
use crate::display::format_report;
use crate::error::LedgerResult;
use crate::export::{export_report, ExportFormat};
use crate::reports::ReportModel;
use crate::storage::LedgerStore;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show totals by category and month against the budget
    Summary,

    /// Write the report (data, summary and chart series) to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// Export format; guessed from the file extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    session: &Session,
    default_format: ExportFormat,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let report = load_report(session)?;

    match cmd {
        ReportCommands::Summary => {
            print!("{}", format_report(&report, &session.currency_symbol));
        }

        ReportCommands::Export {
            output,
            format,
            pretty,
        } => {
            let format = format
                .or_else(|| ExportFormat::from_path(&output))
                .unwrap_or(default_format);
            export_report(&report, format, pretty, &output)?;
            println!("Report exported to: {} ({})", output.display(), format);
        }
    }

    Ok(())
}

/// Snapshot the ledger and build its report
fn load_report(session: &Session) -> LedgerResult<ReportModel> {
    let mut store: LedgerStore = session.store();
    let ledger = store.load()?;
    Ok(ReportModel::generate(ledger, session.budget, session.today))
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_ledger::cli::{
    handle_config_command, handle_expense_command, handle_report_command, parse_money_arg,
    ConfigCommands, ExpenseCommands, ReportCommands,
};
use expense_ledger::config::{LedgerPaths, Session, SessionOverrides, Settings};
use expense_ledger::models::Money;

#[derive(Parser)]
#[command(
    name = "expense",
    author = "Kaylee Beyene",
    version,
    about = "Track expenses in a CSV ledger and report them against a budget",
    long_about = "Expense Ledger keeps your expenses in a plain CSV file \
                  (Date, Expense Name, Category, Amount), totals them by \
                  category and month, and exports a report with chart data."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_LEDGER_FILE")]
    file: Option<PathBuf>,

    /// Budget to report against instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_BUDGET", value_parser = parse_money_arg)]
    budget: Option<Money>,

    /// Log mutations and repairs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show or change settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "expense_ledger=info"
    } else {
        "expense_ledger=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let session = Session::resolve(
        &paths,
        &settings,
        SessionOverrides {
            ledger_file: cli.file,
            budget: cli.budget,
        },
    );

    // The default ledger lives in the base directory, which may not exist yet
    if session.ledger_file == paths.default_ledger_file() {
        paths.ensure_directories()?;
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&session, cmd)?,
        Some(Commands::Report(cmd)) => {
            handle_report_command(&session, settings.default_export_format, cmd)?
        }
        Some(Commands::Config { cmd }) => handle_config_command(
            &paths,
            &mut settings,
            &session,
            cmd.unwrap_or(ConfigCommands::Show),
        )?,
        None => {
            println!("Expense Ledger - track expenses against a budget");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense add <NAME> <AMOUNT> --category <CATEGORY>' to record an expense.");
        }
    }

    Ok(())
}

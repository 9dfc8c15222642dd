use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{
    handle_expense_command, handle_export_command, handle_history_command,
    handle_summary_command, render_chart, run_menu, ExpenseCommands, SummaryCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::logging::init_tracing;
use expense_tracker::services::ExpenseService;
use expense_tracker::storage::LoadOutcome;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Record daily expenses with an amount, category and date, then \
                  review totals by category, day, week or month from the command line."
)]
struct Cli {
    /// Use this file for expense data instead of the default location
    #[arg(long, global = true, env = "EXPENSE_TRACKER_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Spending summaries
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Bar chart of total spending per category
    Chart,

    /// Export all expenses to a CSV file
    Export {
        /// Output file path
        output: PathBuf,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Run the interactive menu
    Menu,

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file, creating it if needed
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut paths = ExpensePaths::new()?;
    if let Some(file) = cli.data_file {
        paths = paths.with_expenses_file(file);
    }
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let (mut service, outcome) = ExpenseService::open(&paths, &settings)?;
    if outcome.is_corrupt() {
        eprintln!("Warning: {}", outcome);
    }

    let output = match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut service, &settings, cmd)?,
        Some(Commands::Summary(cmd)) => handle_summary_command(service.list(), &settings, cmd)?,
        Some(Commands::Chart) => render_chart(service.list(), &settings),
        Some(Commands::Export { output }) => handle_export_command(service.list(), &output)?,
        Some(Commands::History { limit }) => {
            handle_history_command(&AuditLogger::new(paths.audit_log()), limit)?
        }
        Some(Commands::Menu) => {
            if outcome == LoadOutcome::Absent {
                println!("{}", outcome);
            }
            let stdin = io::stdin();
            run_menu(&mut service, &settings, stdin.lock(), io::stdout())?;
            String::new()
        }
        Some(Commands::Config { init }) => {
            let mut output = String::new();
            if init {
                settings.save(&paths)?;
                output.push_str(&format!(
                    "Wrote settings to {}\n\n",
                    paths.settings_file().display()
                ));
            }
            output.push_str(&format_config(&paths, &settings, &outcome));
            output
        }
        None => "Expense Tracker - personal expense tracking\n\n\
                 Run 'expenses --help' for usage information.\n\
                 Run 'expenses menu' for the interactive menu.\n"
            .to_string(),
    };

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn format_config(paths: &ExpensePaths, settings: &Settings, outcome: &LoadOutcome) -> String {
    format!(
        "Expense Tracker Configuration\n\
         =============================\n\
         Base directory: {}\n\
         Expenses file:  {}\n\
         Settings file:  {}\n\
         Audit log:      {}\n\
         \n\
         Settings (schema v{}):\n  \
         Currency symbol: {}\n  \
         Audit enabled:   {}\n  \
         Chart width:     {}\n\
         \n\
         {}\n",
        paths.base_dir().display(),
        paths.expenses_file().display(),
        paths.settings_file().display(),
        paths.audit_log().display(),
        settings.schema_version,
        settings.currency_symbol,
        settings.audit_enabled,
        settings.chart_width,
        outcome
    )
}

//! CLI commands for spending summaries and the category chart

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Month;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_daily_totals, ChartRenderer, TextBarChart};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense};
use crate::reports::{
    category_totals, total_by_category, total_by_day, total_for_month, total_for_week,
    total_overall, SpendingSummary,
};
use crate::services::parse_date;

/// Summary subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SummaryCommands {
    /// Total spending for one category
    Category {
        /// Category name (case-insensitive)
        name: String,
    },

    /// Total overall spending
    #[command(alias = "overall")]
    Total,

    /// Spending per day, oldest first
    Daily,

    /// Spending for the week starting on a date (start date plus the next 7 days)
    Weekly {
        /// Start date (YYYY-MM-DD)
        start: String,
    },

    /// Spending for a calendar month
    Monthly {
        /// Month (1-12)
        month: u32,
        /// Year (e.g. 2024)
        #[arg(allow_hyphen_values = true)]
        year: i32,
    },

    /// Breakdown of every category with percentages
    Report {
        /// Export to CSV file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a summary command
pub fn handle_summary_command(
    expenses: &[Expense],
    settings: &Settings,
    cmd: SummaryCommands,
) -> ExpenseResult<String> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SummaryCommands::Category { name } => {
            let category = Category::new(&name)?;
            let total = total_by_category(expenses, &category);
            Ok(format!(
                "Total spending for {}: {}\n",
                category,
                total.format_with_symbol(symbol)
            ))
        }

        SummaryCommands::Total => Ok(format!(
            "Total overall spending: {}\n",
            total_overall(expenses).format_with_symbol(symbol)
        )),

        SummaryCommands::Daily => Ok(format_daily_totals(&total_by_day(expenses), symbol)),

        SummaryCommands::Weekly { start } => {
            let start = parse_date(&start)?;
            Ok(format!(
                "Spending for the week starting {}: {}\n",
                start,
                total_for_week(expenses, start).format_with_symbol(symbol)
            ))
        }

        SummaryCommands::Monthly { month, year } => {
            let total = total_for_month(expenses, month, year)?;
            let month_name = u8::try_from(month)
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .map(|m| m.name().to_string())
                .ok_or(ExpenseError::InvalidMonth(month))?;
            Ok(format!(
                "Spending for {} {}: {}\n",
                month_name,
                year,
                total.format_with_symbol(symbol)
            ))
        }

        SummaryCommands::Report { output } => {
            let summary = SpendingSummary::generate(expenses);
            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        ExpenseError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    summary.export_csv(BufWriter::new(file))?;
                    Ok(format!("Spending summary exported to: {}\n", path.display()))
                }
                None => Ok(summary.format_terminal(symbol)),
            }
        }
    }
}

/// Render the category chart with the configured renderer settings
pub fn render_chart(expenses: &[Expense], settings: &Settings) -> String {
    let chart = TextBarChart::new(settings.chart_width, settings.currency_symbol.clone());
    chart.render(&category_totals(expenses))
}

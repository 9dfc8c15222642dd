//! Interactive menu
//!
//! A numbered-choice loop over stdin/stdout. Each choice prompts for its
//! inputs, builds the same command the subcommand CLI would, and runs it
//! through the same handler. Errors are printed and the loop continues; only
//! "Exit" or end of input stops it.

use std::io::{BufRead, Write};

use tracing::debug;

use super::expense::{handle_expense_command, ExpenseCommands};
use super::summary::{handle_summary_command, render_chart, SummaryCommands};
use crate::config::Settings;
use crate::display::format_expense_row;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseService;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Summary,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> ExpenseResult<Self> {
        match input.trim() {
            "1" => Ok(Self::Add),
            "2" => Ok(Self::View),
            "3" => Ok(Self::Summary),
            "4" => Ok(Self::Edit),
            "5" => Ok(Self::Delete),
            "6" => Ok(Self::Exit),
            other => Err(ExpenseError::InvalidSelection(format!(
                "'{}', enter a number between 1 and 6",
                other
            ))),
        }
    }
}

const MAIN_MENU: &str = "\n--- Personal Expense Tracker ---
1. Add Expense
2. View Expenses
3. View Summary
4. Edit Expense
5. Delete Expense
6. Exit
";

const SUMMARY_MENU: &str = "\n--- Expense Summary ---
1. Total spending for a specific category
2. Total overall spending
3. Spending over time (daily, weekly, or monthly)
4. View graphical summary
";

const PERIOD_MENU: &str = "\n--- Spending Over Time ---
1. Daily
2. Weekly
3. Monthly
";

/// What a summary selection resolves to
enum SummaryAction {
    Report(SummaryCommands),
    Chart,
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Print a prompt and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> ExpenseResult<()> {
        write!(self.output, "{}", text)?;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> ExpenseResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ExpenseError::InvalidSelection(format!("{} must be a number, got '{}'", what, raw)))
}

fn blank_to_none(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    service: &mut ExpenseService,
    settings: &Settings,
    input: R,
    output: W,
) -> ExpenseResult<()> {
    let mut io = Prompter { input, output };

    loop {
        io.say(MAIN_MENU)?;
        let Some(raw) = io.ask("Enter your choice (1-6): ")? else {
            break;
        };

        let step = match MenuChoice::parse(&raw) {
            Ok(MenuChoice::Exit) => {
                io.say("Exiting the program. Goodbye!\n")?;
                break;
            }
            Ok(choice) => run_choice(&mut io, service, settings, choice),
            Err(e) => Err(e),
        };

        match step {
            Ok(Some(text)) => io.say(&text)?,
            Ok(None) => break,
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "menu input rejected");
                io.say(&format!("Error: {}\n", e))?;
            }
            Err(e) => {
                tracing::error!(error = %e, "menu command failed");
                io.say(&format!("Error: {}\n", e))?;
            }
        }
    }

    Ok(())
}

/// Run one main-menu choice; `Ok(None)` means input ended mid-prompt
fn run_choice<R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
    service: &mut ExpenseService,
    settings: &Settings,
    choice: MenuChoice,
) -> ExpenseResult<Option<String>> {
    let command = match choice {
        MenuChoice::Add => {
            let Some(amount) = io.ask("Enter the expense amount: ")? else {
                return Ok(None);
            };
            let Some(category) =
                io.ask("Enter the category (e.g., Food, Transport, Entertainment): ")?
            else {
                return Ok(None);
            };
            let Some(date) = io.ask("Enter the date (YYYY-MM-DD) or leave blank for today: ")?
            else {
                return Ok(None);
            };
            ExpenseCommands::Add {
                amount,
                category,
                date: blank_to_none(date),
            }
        }

        MenuChoice::View => ExpenseCommands::List,

        MenuChoice::Summary => {
            if service.count() == 0 {
                return Ok(Some("No expenses found.\n".to_string()));
            }
            return match summary_action(io)? {
                Some(SummaryAction::Report(cmd)) => {
                    handle_summary_command(service.list(), settings, cmd).map(Some)
                }
                Some(SummaryAction::Chart) => Ok(Some(render_chart(service.list(), settings))),
                None => Ok(None),
            };
        }

        MenuChoice::Edit | MenuChoice::Delete => {
            let listing = handle_expense_command(service, settings, ExpenseCommands::List)?;
            io.say(&listing)?;
            if service.count() == 0 {
                return Ok(Some(String::new()));
            }

            let verb = if choice == MenuChoice::Edit { "edit" } else { "delete" };
            let Some(raw) = io.ask(&format!("Enter the index of the expense to {}: ", verb))?
            else {
                return Ok(None);
            };
            let index: usize = parse_number(&raw, "Index")?;

            if choice == MenuChoice::Delete {
                ExpenseCommands::Delete { index }
            } else {
                let current = service.get(index)?.clone();
                io.say(&format!(
                    "Editing expense: {}\n",
                    format_expense_row(index, &current, &settings.currency_symbol)
                ))?;

                let amount_prompt = format!(
                    "Enter new amount (current: {}): ",
                    current.amount.format_with_symbol(&settings.currency_symbol)
                );
                let Some(amount) = io.ask(&amount_prompt)? else {
                    return Ok(None);
                };
                let Some(category) =
                    io.ask(&format!("Enter new category (current: {}): ", current.category))?
                else {
                    return Ok(None);
                };
                let Some(date) = io.ask(&format!("Enter new date (current: {}): ", current.date))?
                else {
                    return Ok(None);
                };

                ExpenseCommands::Edit {
                    index,
                    amount: blank_to_none(amount),
                    category: blank_to_none(category),
                    date: blank_to_none(date),
                }
            }
        }

        MenuChoice::Exit => return Ok(None),
    };

    handle_expense_command(service, settings, command).map(Some)
}

fn summary_action<R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
) -> ExpenseResult<Option<SummaryAction>> {
    io.say(SUMMARY_MENU)?;
    let Some(choice) = io.ask("Enter your choice (1-4): ")? else {
        return Ok(None);
    };

    let action = match choice.as_str() {
        "1" => {
            let Some(name) = io.ask("Enter the category to view spending for: ")? else {
                return Ok(None);
            };
            SummaryAction::Report(SummaryCommands::Category { name })
        }
        "2" => SummaryAction::Report(SummaryCommands::Total),
        "3" => {
            io.say(PERIOD_MENU)?;
            let Some(period) = io.ask("Choose a time period (1-3): ")? else {
                return Ok(None);
            };
            match period.as_str() {
                "1" => SummaryAction::Report(SummaryCommands::Daily),
                "2" => {
                    let Some(start) = io.ask("Enter start date (YYYY-MM-DD): ")? else {
                        return Ok(None);
                    };
                    SummaryAction::Report(SummaryCommands::Weekly { start })
                }
                "3" => {
                    let Some(month) = io.ask("Enter the month (1-12): ")? else {
                        return Ok(None);
                    };
                    let month: u32 = parse_number(&month, "Month")?;
                    let Some(year) = io.ask("Enter the year (e.g., 2024): ")? else {
                        return Ok(None);
                    };
                    let year: i32 = parse_number(&year, "Year")?;
                    SummaryAction::Report(SummaryCommands::Monthly { month, year })
                }
                other => {
                    return Err(ExpenseError::InvalidSelection(format!(
                        "'{}', enter a number between 1 and 3",
                        other
                    )))
                }
            }
        }
        "4" => SummaryAction::Chart,
        other => {
            return Err(ExpenseError::InvalidSelection(format!(
                "'{}', enter a number between 1 and 4",
                other
            )))
        }
    };

    Ok(Some(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: &str) -> (TempDir, ExpenseService, String) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let (mut service, _) = ExpenseService::open(&paths, &settings).unwrap();

        let mut output = Vec::new();
        run_menu(&mut service, &settings, Cursor::new(script.to_string()), &mut output).unwrap();
        (temp_dir, service, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 ").unwrap(), MenuChoice::Add);
        assert_eq!(MenuChoice::parse("6").unwrap(), MenuChoice::Exit);
        assert!(matches!(
            MenuChoice::parse("7"),
            Err(ExpenseError::InvalidSelection(_))
        ));
        assert!(matches!(
            MenuChoice::parse("add"),
            Err(ExpenseError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_add_then_exit() {
        let (_temp, service, out) = run_script("1\n12.50\nfood\n2024-03-01\n6\n");
        assert_eq!(service.count(), 1);
        assert_eq!(service.list()[0].category.as_str(), "Food");
        assert!(out.contains("Expense added successfully!"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_bad_choice_keeps_looping() {
        let (_temp, _service, out) = run_script("9\n2\n6\n");
        assert!(out.contains("Error: Invalid selection: '9'"));
        assert!(out.contains("No expenses found."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_amount_reported() {
        let (_temp, service, out) = run_script("1\nlots\nfood\n\n6\n");
        assert_eq!(service.count(), 0);
        assert!(out.contains("Error: Invalid amount: lots"));
    }

    #[test]
    fn test_edit_with_blank_answers() {
        let (_temp, service, out) =
            run_script("1\n5\nbus\n2024-03-02\n4\n1\n\n\n\n6\n");
        assert!(out.contains("Editing expense: 1. 2024-03-02 - Bus - $5.00"));
        assert!(out.contains("Expense updated successfully!"));
        assert_eq!(service.list()[0].amount.cents(), 500);
    }

    #[test]
    fn test_delete_out_of_range() {
        let (_temp, service, out) = run_script("1\n5\nbus\n2024-03-02\n5\n0\n5\n1\n6\n");
        assert!(out.contains("Error: Invalid index 0"));
        assert!(out.contains("Deleted expense: 1. 2024-03-02 - Bus - $5.00"));
        assert_eq!(service.count(), 0);
    }

    #[test]
    fn test_monthly_summary() {
        let (_temp, _service, out) =
            run_script("1\n20\nrent\n2024-02-29\n3\n3\n3\n2\n2024\n6\n");
        assert!(out.contains("Spending for February 2024: $20.00"));
    }

    #[test]
    fn test_summary_chart() {
        let (_temp, _service, out) = run_script("1\n20\nrent\n2024-02-29\n3\n4\n6\n");
        assert!(out.contains("Total Spending by Category"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let (_temp, service, out) = run_script("1\n12\n");
        assert_eq!(service.count(), 0);
        assert!(!out.contains("Goodbye"));
    }

    #[test]
    fn test_edit_prompt_uses_currency_symbol() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            currency_symbol: "€".to_string(),
            ..Settings::default()
        };
        let (mut service, _) = ExpenseService::open(&paths, &settings).unwrap();

        let mut output = Vec::new();
        let script = "1\n5\nbus\n2024-03-02\n4\n1\n\n\n\n6\n";
        run_menu(&mut service, &settings, Cursor::new(script), &mut output).unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Editing expense: 1. 2024-03-02 - Bus - €5.00"));
        assert!(out.contains("Enter new amount (current: €5.00)"));
        assert!(!out.contains('$'));
    }
}

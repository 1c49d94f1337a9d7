//! Terminal output for the command-line front end.
//!
//! Coloured status lines, the fetch spinner and the results table.

use comfy_table::{Attribute, Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use crate::models::{BookRecord, ResultSet, StopReason};

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Spinner shown while pages are being fetched; hidden off-terminal.
pub fn fetch_spinner(query: &str, source_name: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    spinner.set_message(format!("Fetching \"{}\" from {}", query, source_name));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Report how a fetch ended.
pub fn print_fetch_outcome(result: &ResultSet) {
    if let Some(total) = result.total_available {
        print_status(Status::Search, &available_line(total));
    }

    match &result.stop_reason {
        StopReason::TargetReached => print_status(
            Status::Info,
            &format!("Collected {} books", result.len()),
        ),
        StopReason::Exhausted => print_status(
            Status::Info,
            &format!(
                "No more results after {} page(s); collected {} books",
                result.pages_requested,
                result.len()
            ),
        ),
        StopReason::Failed(err) => {
            print_status(Status::Error, &format!("Error: {}", err));
            print_status(
                Status::Warning,
                &format!("Stopped early with {} books", result.len()),
            );
        }
    }
}

fn available_line(total: u64) -> String {
    format!("{} matching works reported by the source", total)
}

/// Final banner after a successful write.
pub fn print_saved(count: usize, path: &Path) {
    print_status(
        Status::Success,
        &format!(
            "Done! Saved {} books to {}",
            count.to_string().green().bold(),
            path.display()
        ),
    );
}

/// Build a table of the collected books.
pub fn books_table(books: &[BookRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Author", "Year"]);

    for (i, book) in books.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate_with_ellipsis(&book.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&book.author, 30)),
            Cell::new(book.year.map(|y| y.to_string()).unwrap_or_default()),
        ]);
    }
    table
}

/// Truncate text to at most `max_chars` characters, ending in "..." when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return "...".to_string();
    }
    let truncated: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", truncated)
}

//! CLI console utilities

use colored::*;
use foodweb_core::notify::Notifier;

/// CLI console for formatted output
#[derive(Debug, Clone, Copy)]
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print an aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<14} {}", format!("{}:", label).dimmed(), value);
    }

    /// Print one row of a listing
    pub fn row(&self, id: impl std::fmt::Display, text: &str, detail: &str) {
        if detail.is_empty() {
            println!("  {:>6}  {}", id.to_string().cyan(), text);
        } else {
            println!("  {:>6}  {}  {}", id.to_string().cyan(), text, detail.dimmed());
        }
    }

    /// Print a JSON payload the client does not model
    pub fn json(&self, value: &serde_json::Value) {
        if value.is_null() {
            return;
        }
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", value),
        }
    }
}

/// Session notifications end up on the terminal
impl Notifier for CliConsole {
    fn success(&self, message: &str) {
        CliConsole::success(self, message);
    }

    fn error(&self, message: &str) {
        CliConsole::error(self, message);
    }
}

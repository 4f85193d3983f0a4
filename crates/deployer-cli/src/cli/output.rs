//! Terminal output formatting
//!
//! Colored status lines and key-value listings for the CLI. The deployment
//! result itself is printed uncolored on stdout so scripts can consume it;
//! diagnostics go to stderr.

use colored::Colorize;

/// Terminal display utilities for formatted CLI output
pub struct Display;

impl Display {
	/// Displays a section header with underline
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.chars().count()).cyan());
	}

	/// Prints the outcome of a command exactly as given, on stdout.
	pub fn result(message: &str) {
		println!("{}", message);
	}

	/// Displays an error message with red X symbol to stderr
	///
	/// # Arguments
	/// * `message` - Error message to display
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays a warning message with yellow warning symbol to stderr
	pub fn warning(message: &str) {
		eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
	}

	/// Displays a key-value pair with formatted labels
	///
	/// # Arguments
	/// * `key` - Label or key name
	/// * `value` - Associated value to display
	pub fn kv(key: &str, value: &str) {
		println!("  {} {}", format!("{}:", key).bold(), value);
	}

	/// Displays a section title with arrow prefix
	pub fn section(title: &str) {
		println!("\n{}", format!("▸ {}", title).bold());
	}
}

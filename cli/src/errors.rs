//! # Error Display
//!
//! User-facing error and status lines for the sqlchat CLI.

use colored::Colorize;

/// Display a configuration error with helpful suggestions
pub fn display_config_error(message: &str) {
    eprintln!("{} Configuration error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • Configuration file is not valid JSON");
    eprintln!("  • Unknown translation mode or provider name");
    eprintln!();
    eprintln!(
        "{} Run `sqlchat config show` to inspect the current settings.",
        "Tip:".cyan().bold()
    );
}

/// Display an embedding provider error with helpful suggestions
pub fn display_provider_error(message: &str) {
    eprintln!("{} Embedding provider error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • API key is missing");
    eprintln!("  • Provider name in the config file is misspelled");
    eprintln!();
    eprintln!(
        "{} Use `--mode lexical` to translate without embeddings.",
        "Tip:".cyan().bold()
    );
}

/// Display a validation error with helpful suggestions
pub fn display_validation_error(message: &str) {
    eprintln!("{} Invalid request: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!(
        "{} Check the command options and try again.",
        "Tip:".cyan().bold()
    );
}

/// Display a warning
pub fn display_warning(message: &str) {
    eprintln!("{} Warning: {}", "⚠".yellow().bold(), message);
}

/// Display a success message
pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Display an info message
pub fn display_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

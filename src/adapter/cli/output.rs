//! CLI output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting), quiet mode and colour control. Handlers never call
//! `println!` directly.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Use ANSI colours.
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, color: bool) -> Self {
        Self { json, quiet, color }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application banner line.
pub fn header(version: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("{} {}", "betledger".bold(), format!("v{version}").dimmed());
    } else {
        println!("betledger v{version}");
    }
}

/// Emphasize an inline value such as a command name.
#[must_use]
pub fn highlight(text: &str) -> String {
    if read_config().color {
        format!("{}", text.cyan())
    } else {
        text.to_string()
    }
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!();
    if config.color {
        println!("{}", title.bold());
    } else {
        println!("{title}");
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("  {:<16} {}", label.dimmed(), value);
    } else {
        println!("  {label:<16} {value}");
    }
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("  {} {}", "✓".green(), message);
    } else {
        println!("  ✓ {message}");
    }
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    let config = read_config();
    if config.json {
        eprintln!("{}", json!({ "type": "warning", "payload": { "message": message } }));
        return;
    }

    if config.color {
        eprintln!("  {} {}", "⚠".yellow(), message);
    } else {
        eprintln!("  ⚠ {message}");
    }
}

/// Print an error line.
pub fn error(message: &str) {
    let config = read_config();
    if config.json {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }

    if config.color {
        eprintln!("  {} {}", "×".red(), message);
    } else {
        eprintln!("  × {message}");
    }
}

/// Print a hint line.
pub fn hint(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    } else {
        println!("  hint: {message}");
    }
}

/// Print pre-formatted multi-line content, indented.
pub fn lines(content: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON value directly.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Format a money amount to two decimals.
#[must_use]
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Format a percentage to two decimals.
#[must_use]
pub fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// Format a signed amount, green when positive and red when negative.
#[must_use]
pub fn signed(value: Decimal) -> String {
    let text = money(value);
    let config = read_config();
    if !config.color || config.json {
        return text;
    }
    if value.is_sign_negative() && !value.is_zero() {
        format!("{}", text.red())
    } else if value > Decimal::ZERO {
        format!("{}", text.green())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money(dec!(9.980039)), "9.98");
        assert_eq!(money(dec!(1100)), "1100.00");
        assert_eq!(money(dec!(-0.469)), "-0.47");
    }

    #[test]
    fn percent_has_suffix() {
        assert_eq!(percent(dec!(22.774193)), "22.77%");
        assert_eq!(percent(Decimal::ZERO), "0.00%");
    }
}

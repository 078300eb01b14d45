//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing happens in the parent module.
//! Styling goes through `console`, which drops colors when the stream is not
//! a terminal.

use console::style;

use crate::cli::PublishStep;
use crate::config::ConfigMap;
use crate::domain::Version;
use crate::warnings::PublishWarning;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_warning(warning: &PublishWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Version transition, e.g. `1.2.3 → 1.2.4`.
pub fn format_version_change(previous: &Version, next: &Version) -> String {
    format!(
        "{}\n  From: {}\n  To:   {}",
        style("Version:").bold(),
        style(previous).red(),
        style(next).green()
    )
}

/// Numbered list of the steps a dry run would perform.
pub fn format_plan(steps: &[PublishStep]) -> String {
    let mut out = format!("{}", style("Dry run, planned steps:").bold());
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, step));
    }
    out
}

/// `key = value` lines, sorted by key.
pub fn format_config_entries(config: &ConfigMap) -> String {
    if config.is_empty() {
        return "No settings stored.".to_string();
    }
    config
        .iter()
        .map(|(key, value)| format!("  {} = {}", style(key).cyan(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indents subprocess output so it stands apart from np's own messages.
pub fn format_command_output(output: &str) -> String {
    output
        .lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

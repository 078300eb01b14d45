//! User interface module - terminal output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing, and mapping workflow events to output

pub mod formatter;

use crate::cli::{PublishEvent, PublishStep};
use crate::config::ConfigMap;
use crate::warnings::PublishWarning;

pub use formatter::{
    format_command_output, format_config_entries, format_error, format_plan, format_status,
    format_success, format_version_change, format_warning,
};

pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

pub fn display_warning(warning: &PublishWarning) {
    eprintln!("{}", format_warning(warning));
}

pub fn display_config_entries(config: &ConfigMap) {
    println!("{}", format_config_entries(config));
}

/// Print one progress event of the publish workflow.
pub fn display_event(event: &PublishEvent) {
    match event {
        PublishEvent::VersionSelected { previous, next, .. } => {
            println!("{}", format_version_change(previous, next));
        }
        PublishEvent::Warning(warning) => display_warning(warning),
        PublishEvent::StepStarted(step) => display_status(&step.to_string()),
        PublishEvent::StepCompleted { step, output } => {
            if let Some(output) = output.as_deref().filter(|o| !o.trim().is_empty()) {
                println!("{}", format_command_output(output));
            }
            if let PublishStep::Publish { .. } = step {
                display_success("Published");
            }
        }
        PublishEvent::Planned(steps) => println!("{}", format_plan(steps)),
    }
}

//! User-facing output.
//!
//! All notices the workflow shows the user flow through here: informational
//! status, the pre-merge validation notice, and the generic merge-failure
//! notice. Diagnostics go to `tracing`, not to this module.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

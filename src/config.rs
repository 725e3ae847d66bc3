//! Runtime configuration.
//!
//! Transforms CLI arguments into a validated configuration for a session:
//! where the merged artifact lands and how chatty the output is.

use std::path::PathBuf;

use anyhow::{Result, bail};

/// Configuration for a pdftray session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where `merged.pdf` is delivered.
    pub download_dir: PathBuf,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Print the merge report as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            quiet: false,
            verbose: false,
            json: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet modes are both enabled. The
    /// download directory is checked later by the delivery's pre-flight,
    /// which produces the richer error.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}

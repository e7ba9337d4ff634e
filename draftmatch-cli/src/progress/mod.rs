//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Stage messages and a spinner for the comparison run
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            spinner: None,
            quiet,
        }
    }

    /// Print a stage message
    pub fn stage(&self, message: &str) {
        if self.quiet {
            return;
        }
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| println!("{message}")),
            None => println!("{message}"),
        }
    }

    /// Start the spinner for the matching phase
    pub fn start_matching(&mut self) {
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    /// Update the spinner after a match was written
    pub fn match_written(&self, count: usize) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{count} Übereinstimmungen"));
        }
    }

    /// Finish progress reporting
    pub fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_never_starts_spinner() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_matching();
        assert!(reporter.spinner.is_none());
        reporter.stage("Suche nach Übereinstimmungen...");
        reporter.match_written(1);
        reporter.finish();
    }

    #[test]
    fn test_spinner_lifecycle() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start_matching();
        assert!(reporter.spinner.is_some());
        reporter.match_written(3);
        reporter.finish();
        assert!(reporter.spinner.is_none());
    }
}

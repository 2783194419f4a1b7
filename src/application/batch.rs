//! Outcome bookkeeping for batch runs.

use std::path::PathBuf;

/// Tally of one batch run.
///
/// `succeeded + skipped` covers every record the run attempted; the exit
/// code keys off [`is_clean`]. The email counters stay zero outside
/// scorecard runs.
///
/// [`is_clean`]: BatchReport::is_clean
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub skipped: usize,
    pub emailed: usize,
    pub email_failures: usize,
    pub files: Vec<PathBuf>,
}

impl BatchReport {
    pub fn record_success(&mut self, file: PathBuf) {
        self.succeeded += 1;
        self.files.push(file);
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_email(&mut self) {
        self.emailed += 1;
    }

    pub fn record_email_failure(&mut self) {
        self.email_failures += 1;
    }

    /// Number of records the run attempted, successful or not.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped
    }

    /// True when every record made it through, emails included.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.email_failures == 0
    }
}

//! Progress reporting
//!
//! Reporting is fire-and-forget: implementations must not block the
//! producer, and the pipeline never depends on a report being observed.

use std::sync::Mutex;

/// Receives per-import progress at stage boundaries
///
/// Percentages are monotonically non-decreasing over one import.
pub trait ProgressReporter {
    /// Report a percentage with a short status message
    fn report(&self, percent: u8, message: &str);
}

/// Discards all progress reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _percent: u8, _message: &str) {}
}

/// Records reports in memory; used by tests and diagnostics
#[derive(Debug, Default)]
pub struct CollectingProgress {
    reports: Mutex<Vec<(u8, String)>>,
}

impl CollectingProgress {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports received so far
    pub fn reports(&self) -> Vec<(u8, String)> {
        self.reports.lock().expect("progress lock poisoned").clone()
    }
}

impl ProgressReporter for CollectingProgress {
    fn report(&self, percent: u8, message: &str) {
        self.reports
            .lock()
            .expect("progress lock poisoned")
            .push((percent, message.to_string()));
    }
}

/// Batch-level progress translated from per-file progress
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Number of files in the batch
    pub total_files: usize,
    /// Files already finished (success or failure)
    pub completed_files: usize,
    /// File currently being imported
    pub current_file: String,
    /// Progress of the current file, 0-100
    pub current_file_progress: u8,
}

/// Receives batch-level progress
pub trait BatchProgressReporter {
    /// Report the state of the whole batch
    fn report(&self, progress: &BatchProgress);
}

/// Discards all batch progress reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBatchProgress;

impl BatchProgressReporter for NoBatchProgress {
    fn report(&self, _progress: &BatchProgress) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_progress() {
        let collector = CollectingProgress::new();
        collector.report(0, "Validating file");
        collector.report(10, "Parsing file");

        let reports = collector.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], (0, "Validating file".to_string()));
        assert_eq!(reports[1].0, 10);
    }
}

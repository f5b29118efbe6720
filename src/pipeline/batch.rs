//! Sequential batch import

use super::cancel::CancellationToken;
use super::importer::CadImporter;
use super::progress::{BatchProgress, BatchProgressReporter, ProgressReporter};
use super::result::ImportResult;
use std::path::PathBuf;

/// Imports a list of files one after another, translating per-file progress
/// into batch-level progress records
#[derive(Debug, Clone, Default)]
pub struct BatchImporter {
    /// The importer applied to every file
    pub importer: CadImporter,
}

impl BatchImporter {
    /// Create a batch importer around a configured file importer
    pub fn new(importer: CadImporter) -> Self {
        Self { importer }
    }

    /// Import all files sequentially
    ///
    /// A cancelled file ends the batch; results for files already finished
    /// (including the cancelled one) are returned.
    pub fn import_files(
        &self,
        files: &[PathBuf],
        progress: &dyn BatchProgressReporter,
        cancel: &CancellationToken,
    ) -> Vec<ImportResult> {
        let mut results = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            let adapter = FileToBatchProgress {
                inner: progress,
                total_files: files.len(),
                completed_files: index,
                current_file: file.display().to_string(),
            };

            let result = self.importer.import_file_with(file, &adapter, cancel);
            let cancelled = result
                .errors
                .iter()
                .any(|e| e == "Import cancelled by user");
            results.push(result);

            if cancelled {
                break;
            }
        }
        results
    }
}

/// Adapts one file's progress stream into batch progress records
struct FileToBatchProgress<'a> {
    inner: &'a dyn BatchProgressReporter,
    total_files: usize,
    completed_files: usize,
    current_file: String,
}

impl ProgressReporter for FileToBatchProgress<'_> {
    fn report(&self, percent: u8, _message: &str) {
        self.inner.report(&BatchProgress {
            total_files: self.total_files,
            completed_files: self.completed_files,
            current_file: self.current_file.clone(),
            current_file_progress: percent,
        });
    }
}

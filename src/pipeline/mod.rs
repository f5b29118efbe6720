//! Import orchestration: options, progress, cancellation, results

pub mod batch;
pub mod cancel;
pub mod importer;
pub mod options;
pub mod progress;
pub mod result;

pub use batch::BatchImporter;
pub use cancel::CancellationToken;
pub use importer::CadImporter;
pub use options::{ImportOptions, ImportSettings};
pub use progress::{
    BatchProgress, BatchProgressReporter, CollectingProgress, NoBatchProgress, NoProgress,
    ProgressReporter,
};
pub use result::{ImportResult, ImportStatistics};

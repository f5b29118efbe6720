//! Error types for cad2bim operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cad2bim operations
#[derive(Debug, Error)]
pub enum ImportError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File extension is not .dxf or .dwg
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(PathBuf),

    /// File exceeds the configured maximum size
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// Unsupported CAD file version
    #[error("Unsupported CAD version: {0:?}")]
    UnsupportedVersion(String),

    /// Error parsing CAD file format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Import was cancelled through the cancellation token
    #[error("Import cancelled by user")]
    Cancelled,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for cad2bim operations
pub type Result<T> = std::result::Result<T, ImportError>;

impl From<String> for ImportError {
    fn from(s: String) -> Self {
        ImportError::Custom(s)
    }
}

impl From<&str> for ImportError {
    fn from(s: &str) -> Self {
        ImportError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::UnsupportedVersion("AC1009".to_string());
        assert_eq!(err.to_string(), "Unsupported CAD version: \"AC1009\"");
    }

    #[test]
    fn test_file_too_large_display() {
        let err = ImportError::FileTooLarge {
            size: 1024,
            limit: 512,
        };
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("512"));
    }

    #[test]
    fn test_cancelled_message() {
        assert_eq!(
            ImportError::Cancelled.to_string(),
            "Import cancelled by user"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: ImportError = io_err.into();
        assert!(matches!(err, ImportError::Io(_)));
    }
}

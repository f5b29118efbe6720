//! File-level input handling: format detection and validation

pub mod dwg;
pub mod dxf;

use crate::error::{ImportError, Result};
use std::fs;
use std::path::Path;

/// Source file format, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// ASCII tagged-pair drawing exchange format
    Dxf,
    /// Binary native drawing format
    Dwg,
}

impl FileType {
    /// Determine the file type from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "dxf" => Some(FileType::Dxf),
            "dwg" => Some(FileType::Dwg),
            _ => None,
        }
    }

    /// Upper-case label used in import results
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Dxf => "DXF",
            FileType::Dwg => "DWG",
        }
    }
}

/// Validate a source file before any parse is attempted
///
/// Checks existence, extension, and size against `max_size_bytes`. All
/// failures here are fatal (spec error kind "Validation").
pub fn validate_source(path: &Path, max_size_bytes: u64) -> Result<FileType> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }

    let file_type = FileType::from_path(path)
        .ok_or_else(|| ImportError::UnsupportedExtension(path.to_path_buf()))?;

    let size = fs::metadata(path)?.len();
    if size > max_size_bytes {
        return Err(ImportError::FileTooLarge {
            size,
            limit: max_size_bytes,
        });
    }

    Ok(file_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_type_from_path() {
        assert_eq!(
            FileType::from_path(Path::new("plan.dxf")),
            Some(FileType::Dxf)
        );
        assert_eq!(
            FileType::from_path(Path::new("PLAN.DWG")),
            Some(FileType::Dwg)
        );
        assert_eq!(FileType::from_path(Path::new("plan.pdf")), None);
        assert_eq!(FileType::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_validate_missing_file() {
        let err = validate_source(Path::new("/nonexistent/plan.dxf"), 1024).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_validate_size_limit() {
        let dir = std::env::temp_dir();
        let path = dir.join("cad2bim_size_test.dxf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        drop(file);

        let err = validate_source(&path, 64).unwrap_err();
        assert!(matches!(err, ImportError::FileTooLarge { size: 128, .. }));
        assert!(validate_source(&path, 1024).is_ok());

        fs::remove_file(&path).ok();
    }
}

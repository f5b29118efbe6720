//! # cad2bim
//!
//! A pure Rust engine for importing CAD drawings into building information
//! models.
//!
//! The pipeline ingests DXF (ASCII tagged-record) and DWG (binary,
//! version-sniffed) files and promotes raw lines, polylines, arcs, circles,
//! and block insertions to categorized building elements: walls, doors,
//! windows, columns, plumbing fixtures, annotations, and so on.
//!
//! ## Pipeline
//!
//! ```text
//! bytes -> parser -> CadModel -> layer classifier
//!       -> (geometry processor | block recognizer | text extractor)
//!       -> element converter -> post-processor -> ImportResult
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cad2bim::{CadImporter, ImportOptions};
//!
//! let importer = CadImporter::new(ImportOptions::default());
//! let result = importer.import_file("floor_plan.dxf");
//!
//! for element in &result.converted_elements {
//!     println!("{} {} on {}", element.id, element.category, element.source_layer);
//! }
//! ```
//!
//! ## Stages
//!
//! - [`io::dxf::DxfParser`] - tagged-pair reader and entity dispatcher
//! - [`classify::LayerClassifier`] - layer name to category resolution
//! - [`geometry::GeometryProcessor`] - normalization and bulge expansion
//! - [`blocks::BlockRecognizer`] - name patterns plus geometric signatures
//! - [`text_extract::TextExtractor`] - text content classification
//! - [`convert::ElementConverter`] - element records with typed parameters
//! - [`postprocess::PostProcessor`] - dedup, wall joining, opening hosting
//! - [`pipeline::CadImporter`] - the orchestrator tying it all together

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blocks;
pub mod classify;
pub mod convert;
pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layer;
pub mod pipeline;
pub mod postprocess;
pub mod text_extract;
pub mod types;

// Re-export commonly used types
pub use error::{ImportError, Result};
pub use types::{BoundingBox, CadUnits, Point3D, Vector3D};

// Re-export the model
pub use document::CadModel;
pub use entities::{CadBlock, CadBlockReference, CadEntity};
pub use layer::CadLayer;

// Re-export the pipeline surface
pub use classify::{LayerMapping, MappingSource, RevitCategory};
pub use convert::ConvertedElement;
pub use pipeline::{
    BatchImporter, CadImporter, CancellationToken, ImportOptions, ImportResult, ImportSettings,
    ProgressReporter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_importer_default_construction() {
        let importer = CadImporter::default();
        assert_eq!(importer.options.default_wall_height, 3000.0);
        assert_eq!(importer.settings.unit_conversion_factor, 1.0);
    }
}

//! Import result and statistics

use crate::classify::{LayerMapping, RevitCategory};
use crate::convert::ConvertedElement;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Counters aggregated over one import
#[derive(Debug, Clone, Default)]
pub struct ImportStatistics {
    /// Entities parsed from the source file
    pub total_entities: usize,
    /// Layers classified
    pub layers_mapped: usize,
    /// Entities normalized into element geometry
    pub geometry_processed: usize,
    /// Block references recognized as typed elements
    pub blocks_recognized: usize,
    /// Text entities extracted
    pub texts_extracted: usize,
    /// Dimension entities extracted
    pub dimensions_extracted: usize,
    /// Elements dropped by duplicate removal
    pub duplicates_removed: usize,
    /// Walls absorbed by collinear merging
    pub walls_joined: usize,
    /// Openings hosted into walls
    pub openings_hosted: usize,
    /// Final element count per category, in first-seen order
    pub elements_by_category: IndexMap<RevitCategory, usize>,
    /// Parsed entity count per source layer, in first-seen order
    pub entities_by_layer: IndexMap<String, usize>,
}

impl ImportStatistics {
    /// Recount the per-category totals from the final element list
    pub fn tally_categories(&mut self, elements: &[ConvertedElement]) {
        self.elements_by_category.clear();
        for element in elements {
            *self.elements_by_category.entry(element.category).or_insert(0) += 1;
        }
    }
}

/// The outcome of one file import
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// True when no errors were recorded
    pub success: bool,
    /// The source file path
    pub source_file: PathBuf,
    /// "DXF" or "DWG"
    pub file_type: String,
    /// When the import started
    pub import_start_time: DateTime<Utc>,
    /// When the import finished
    pub import_end_time: DateTime<Utc>,
    /// Every layer's resolved mapping
    pub layer_mappings: Vec<LayerMapping>,
    /// The converted elements; may be partially populated on failure
    pub converted_elements: Vec<ConvertedElement>,
    /// Aggregated counters
    pub statistics: ImportStatistics,
    /// Non-fatal findings
    pub warnings: Vec<String>,
    /// Fatal findings; non-empty implies `success == false`
    pub errors: Vec<String>,
}

impl ImportResult {
    /// Create an empty result shell for a file
    pub fn new(source_file: PathBuf, file_type: impl Into<String>) -> Self {
        let now = Utc::now();
        ImportResult {
            success: false,
            source_file,
            file_type: file_type.into(),
            import_start_time: now,
            import_end_time: now,
            layer_mappings: Vec::new(),
            converted_elements: Vec::new(),
            statistics: ImportStatistics::default(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Elements of one category
    pub fn elements_of_category(
        &self,
        category: RevitCategory,
    ) -> impl Iterator<Item = &ConvertedElement> {
        self.converted_elements
            .iter()
            .filter(move |e| e.category == category)
    }

    /// Wall-clock duration of the import
    pub fn duration(&self) -> chrono::Duration {
        self.import_end_time - self.import_start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ElementGeometry, LineGeometry};
    use crate::types::Point3D;

    #[test]
    fn test_tally_categories() {
        let make = |id: &str, category: RevitCategory| {
            ConvertedElement::new(
                id.to_string(),
                category,
                "T",
                "L",
                ElementGeometry::Line(LineGeometry::new(
                    Point3D::ORIGIN,
                    Point3D::new(1.0, 0.0, 0.0),
                )),
            )
        };
        let elements = vec![
            make("1", RevitCategory::Walls),
            make("2", RevitCategory::Walls),
            make("3", RevitCategory::Doors),
        ];

        let mut stats = ImportStatistics::default();
        stats.tally_categories(&elements);
        assert_eq!(stats.elements_by_category[&RevitCategory::Walls], 2);
        assert_eq!(stats.elements_by_category[&RevitCategory::Doors], 1);
    }
}

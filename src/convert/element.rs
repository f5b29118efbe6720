//! The converted element record

use crate::classify::RevitCategory;
use crate::geometry::ElementGeometry;
use indexmap::IndexMap;
use std::sync::Arc;

/// A building element produced by the import
///
/// Geometry is immutable once converted and shared on clone; the parameter
/// map is deep-copied so post-processing can adjust clones independently.
#[derive(Debug, Clone)]
pub struct ConvertedElement {
    /// Stable element id of the form `CAD_IMPORT_000001`
    pub id: String,
    /// Target category
    pub category: RevitCategory,
    /// Synthesized type name
    pub type_name: String,
    /// Layer the source entity was drawn on
    pub source_layer: String,
    /// Name of the source block definition, for block-derived elements
    pub source_block_name: Option<String>,
    /// Id of the wall hosting this opening, set by post-processing
    pub host_element_id: Option<String>,
    /// Element geometry
    pub geometry: Arc<ElementGeometry>,
    /// Ordered name/value parameters
    pub parameters: IndexMap<String, String>,
}

impl ConvertedElement {
    /// Create an element with empty parameters
    pub fn new(
        id: String,
        category: RevitCategory,
        type_name: impl Into<String>,
        source_layer: impl Into<String>,
        geometry: ElementGeometry,
    ) -> Self {
        ConvertedElement {
            id,
            category,
            type_name: type_name.into(),
            source_layer: source_layer.into(),
            source_block_name: None,
            host_element_id: None,
            geometry: Arc::new(geometry),
            parameters: IndexMap::new(),
        }
    }

    /// Set a parameter, preserving first-insertion order
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Look up a parameter by name
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineGeometry;
    use crate::types::Point3D;

    fn element() -> ConvertedElement {
        ConvertedElement::new(
            "CAD_IMPORT_000001".to_string(),
            RevitCategory::Walls,
            "Imported Wall",
            "A-WALL",
            ElementGeometry::Line(LineGeometry::new(
                Point3D::ORIGIN,
                Point3D::new(5000.0, 0.0, 0.0),
            )),
        )
    }

    #[test]
    fn test_parameters_keep_insertion_order() {
        let mut e = element();
        e.set_parameter("Base Constraint", "Level 1");
        e.set_parameter("Top Constraint", "Level 2");
        e.set_parameter("Unconnected Height", "3000");

        let names: Vec<&String> = e.parameters.keys().collect();
        assert_eq!(
            names,
            vec!["Base Constraint", "Top Constraint", "Unconnected Height"]
        );
    }

    #[test]
    fn test_clone_shares_geometry_and_copies_parameters() {
        let mut original = element();
        original.set_parameter("Comments", "original");

        let mut cloned = original.clone();
        cloned.set_parameter("Comments", "changed");

        // Shared geometry handle
        assert!(Arc::ptr_eq(&original.geometry, &cloned.geometry));
        // Independent parameter maps
        assert_eq!(original.parameter("Comments"), Some("original"));
        assert_eq!(cloned.parameter("Comments"), Some("changed"));
    }
}

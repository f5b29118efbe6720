//! Element conversion
//!
//! Emits one [`ConvertedElement`] per processed geometry, recognized block,
//! extracted text, and extracted dimension. Element ids are allocated
//! monotonically per converter instance; a fresh converter is constructed
//! for every import so ids restart at one.

use super::ConvertedElement;
use crate::blocks::RecognizedBlock;
use crate::classify::RevitCategory;
use crate::geometry::{ElementGeometry, ProcessedGeometry};
use crate::text_extract::{ExtractedDimension, ExtractedText, TextClass};

/// Converts pipeline intermediates into element records
#[derive(Debug)]
pub struct ElementConverter {
    default_wall_height: f64,
    next_id: u32,
}

impl ElementConverter {
    /// Create a converter; ids start at `CAD_IMPORT_000001`
    pub fn new(default_wall_height: f64) -> Self {
        Self {
            default_wall_height,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> String {
        let id = format!("CAD_IMPORT_{:06}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Convert one processed geometry
    pub fn convert_geometry(&mut self, processed: &ProcessedGeometry) -> ConvertedElement {
        let id = self.allocate_id();
        let category = processed.category;
        let mut element = ConvertedElement::new(
            id,
            category,
            format!("Imported {}", category),
            processed.source_layer.clone(),
            processed.geometry.clone(),
        );
        self.apply_category_defaults(&mut element);
        element
    }

    /// Convert one recognized block
    pub fn convert_block(&mut self, block: &RecognizedBlock) -> ConvertedElement {
        let id = self.allocate_id();
        let category = block.element_type.category();
        let type_name = format!(
            "{} - {:.0}x{:.0}mm",
            block.element_type, block.width, block.height
        );

        let mut element = ConvertedElement::new(
            id,
            category,
            type_name,
            block.layer.clone(),
            ElementGeometry::Point(block.insertion_point),
        );
        element.source_block_name = Some(block.block_name.clone());

        element.set_parameter("Width", format_value(block.width));
        element.set_parameter("Height", format_value(block.height));
        element.set_parameter("Rotation", format_value(block.rotation));
        for (tag, value) in &block.attributes {
            element.set_parameter(tag.clone(), value.clone());
        }
        self.apply_category_defaults(&mut element);
        element
    }

    /// Convert one extracted text
    pub fn convert_text(&mut self, text: &ExtractedText) -> ConvertedElement {
        let id = self.allocate_id();
        let (category, type_name) = match text.text_class {
            TextClass::RoomLabel => (RevitCategory::Rooms, "Room Label"),
            TextClass::GridLabel => (RevitCategory::Grids, "Grid Label"),
            TextClass::LevelLabel => (RevitCategory::Levels, "Level Label"),
            TextClass::DimensionText => (RevitCategory::TextNotes, "Dimension Text"),
            TextClass::Annotation => (RevitCategory::TextNotes, "Annotation"),
        };

        let mut element = ConvertedElement::new(
            id,
            category,
            type_name,
            text.layer.clone(),
            ElementGeometry::Point(text.position),
        );
        element.set_parameter("Text", text.content.clone());
        element.set_parameter("Text Size", format_value(text.height));
        element
    }

    /// Convert one extracted dimension
    pub fn convert_dimension(&mut self, dimension: &ExtractedDimension) -> ConvertedElement {
        let id = self.allocate_id();
        let mut element = ConvertedElement::new(
            id,
            RevitCategory::Dimensions,
            format!("{:?} Dimension", dimension.dimension_type),
            dimension.layer.clone(),
            ElementGeometry::Point(dimension.definition_point),
        );
        element.set_parameter("Value", format_value(dimension.measurement));
        element.set_parameter("Override Text", dimension.text.clone());
        element
    }

    /// Category-specific parameter defaults
    fn apply_category_defaults(&self, element: &mut ConvertedElement) {
        match element.category {
            RevitCategory::Walls => {
                element.set_parameter("Base Constraint", "Level 1");
                element.set_parameter("Top Constraint", "Level 2");
                element.set_parameter("Unconnected Height", format_value(self.default_wall_height));
            }
            RevitCategory::Columns | RevitCategory::StructuralColumns => {
                element.set_parameter("Base Level", "Level 1");
                element.set_parameter("Top Level", "Level 2");
            }
            RevitCategory::Floors | RevitCategory::Ceilings => {
                element.set_parameter("Level", "Level 1");
            }
            _ => {}
        }
    }
}

/// Format a length the way the parameter map expects: no trailing zeros on
/// whole values
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockElementType;
    use crate::geometry::LineGeometry;
    use crate::types::{Point3D, Vector3D};
    use ahash::AHashMap;

    fn wall_geometry() -> ProcessedGeometry {
        ProcessedGeometry {
            source_index: 0,
            source_layer: "A-WALL".to_string(),
            category: RevitCategory::Walls,
            geometry: ElementGeometry::Line(LineGeometry::new(
                Point3D::ORIGIN,
                Point3D::new(5000.0, 0.0, 0.0),
            )),
        }
    }

    #[test]
    fn test_monotonic_ids() {
        let mut converter = ElementConverter::new(3000.0);
        let a = converter.convert_geometry(&wall_geometry());
        let b = converter.convert_geometry(&wall_geometry());
        assert_eq!(a.id, "CAD_IMPORT_000001");
        assert_eq!(b.id, "CAD_IMPORT_000002");
    }

    #[test]
    fn test_wall_parameter_defaults() {
        let mut converter = ElementConverter::new(3000.0);
        let wall = converter.convert_geometry(&wall_geometry());
        assert_eq!(wall.parameter("Base Constraint"), Some("Level 1"));
        assert_eq!(wall.parameter("Top Constraint"), Some("Level 2"));
        assert_eq!(wall.parameter("Unconnected Height"), Some("3000"));
    }

    #[test]
    fn test_floor_level_default() {
        let mut converter = ElementConverter::new(3000.0);
        let mut floor = wall_geometry();
        floor.category = RevitCategory::Floors;
        floor.source_layer = "A-FLOR".to_string();
        let element = converter.convert_geometry(&floor);
        assert_eq!(element.parameter("Level"), Some("Level 1"));
        assert_eq!(element.parameter("Unconnected Height"), None);
    }

    #[test]
    fn test_block_type_name_synthesis() {
        let mut converter = ElementConverter::new(3000.0);
        let block = RecognizedBlock {
            source_index: 3,
            block_name: "DOOR_1".to_string(),
            element_type: BlockElementType::Door,
            insertion_point: Point3D::new(1000.0, 0.0, 0.0),
            rotation: 0.0,
            scale: Vector3D::new(1.0, 1.0, 1.0),
            width: 900.0,
            height: 2100.0,
            depth: 0.0,
            layer: "A-DOOR".to_string(),
            attributes: AHashMap::new(),
        };
        let element = converter.convert_block(&block);
        assert_eq!(element.category, RevitCategory::Doors);
        assert_eq!(element.type_name, "Single-Flush - 900x2100mm");
        assert_eq!(element.source_block_name.as_deref(), Some("DOOR_1"));
    }

    #[test]
    fn test_text_parameters() {
        let mut converter = ElementConverter::new(3000.0);
        let text = ExtractedText {
            source_index: 0,
            content: "Kitchen".to_string(),
            position: Point3D::new(10.0, 20.0, 0.0),
            height: 2.5,
            rotation: 0.0,
            layer: "A-ANNO-TEXT".to_string(),
            text_class: TextClass::RoomLabel,
        };
        let element = converter.convert_text(&text);
        assert_eq!(element.category, RevitCategory::Rooms);
        assert_eq!(element.parameter("Text"), Some("Kitchen"));
        assert_eq!(element.parameter("Text Size"), Some("2.5"));
    }

    #[test]
    fn test_dimension_parameters() {
        let mut converter = ElementConverter::new(3000.0);
        let dim = ExtractedDimension {
            source_index: 0,
            text: "EQ".to_string(),
            measurement: 2500.0,
            definition_point: Point3D::ORIGIN,
            ext_line1_start: None,
            ext_line2_start: None,
            dimension_type: crate::entities::DimensionType::Linear,
            layer: "A-ANNO-DIMS".to_string(),
        };
        let element = converter.convert_dimension(&dim);
        assert_eq!(element.category, RevitCategory::Dimensions);
        assert_eq!(element.parameter("Value"), Some("2500"));
        assert_eq!(element.parameter("Override Text"), Some("EQ"));
    }
}

//! Block recognition
//!
//! Classification is two-phase: the ordered name-pattern table first, and a
//! geometric signature (entity mix plus footprint aspect ratio) only when no
//! name pattern matched. Block dimensions come from the definition's
//! bounding box under the reference's scale.

use super::BlockElementType;
use crate::classify::LayerMapping;
use crate::document::CadModel;
use crate::entities::{CadBlock, CadBlockReference};
use crate::error::Result;
use crate::pipeline::CancellationToken;
use crate::types::{Point3D, Vector3D};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// A block reference promoted to a typed element candidate
#[derive(Debug, Clone)]
pub struct RecognizedBlock {
    /// Index of the INSERT entity in the model's entity list
    pub source_index: usize,
    /// Name of the block definition
    pub block_name: String,
    /// Recognized element kind
    pub element_type: BlockElementType,
    /// Insertion point in output units
    pub insertion_point: Point3D,
    /// Rotation in degrees as read from the reference
    pub rotation: f64,
    /// Reference scale factors
    pub scale: Vector3D,
    /// Footprint width in output units (X extent x scale)
    pub width: f64,
    /// Footprint height in output units (Y extent x scale)
    pub height: f64,
    /// Depth in output units (Z extent x scale)
    pub depth: f64,
    /// Layer the reference was drawn on
    pub layer: String,
    /// Attribute tag/value pairs copied from the reference
    pub attributes: AHashMap<String, String>,
}

/// Ordered block-name patterns; first match wins
///
/// Specific variants come before their generic kind (double door before
/// door, ceiling fan before fan).
static BLOCK_NAME_PATTERNS: Lazy<Vec<(Regex, BlockElementType)>> = Lazy::new(|| {
    const TABLE: &[(&str, BlockElementType)] = &[
        ("double.?door|dbl.?door", BlockElementType::DoubleDoor),
        ("slid.*door|door.*slid", BlockElementType::SlidingDoor),
        ("fold.*door|bi.?fold", BlockElementType::FoldingDoor),
        ("revolv.*door", BlockElementType::RevolvingDoor),
        ("garage.?door|overhead.?door", BlockElementType::GarageDoor),
        (
            "door|tuer|porte|puerta|(^|[^a-z0-9])dr([^a-z0-9]|$)",
            BlockElementType::Door,
        ),
        ("casement", BlockElementType::CasementWindow),
        ("double.?hung", BlockElementType::DoubleHungWindow),
        ("slid.*win|win.*slid", BlockElementType::SlidingWindow),
        ("fixed.?win", BlockElementType::FixedWindow),
        ("bay.?win", BlockElementType::BayWindow),
        ("skylight|roof.?light", BlockElementType::Skylight),
        (
            "window|fenster|fenetre|ventana|(^|[^a-z0-9])win([^a-z0-9]|$)",
            BlockElementType::Window,
        ),
        ("struct.*col|s.?col", BlockElementType::StructuralColumn),
        (
            "column|stuetze|(^|[^a-z0-9])col([^a-z0-9]|$)",
            BlockElementType::Column,
        ),
        ("beam|girder|joist", BlockElementType::Beam),
        (
            "toilet|water.?closet|(^|[^a-z0-9])wc([^a-z0-9]|$)",
            BlockElementType::Toilet,
        ),
        ("sink|lavat|basin|washbasin", BlockElementType::Sink),
        ("bathtub|(^|[^a-z0-9])tub([^a-z0-9]|$)|badewanne", BlockElementType::Bathtub),
        ("shower|dusche", BlockElementType::Shower),
        ("urinal", BlockElementType::Urinal),
        ("bidet", BlockElementType::Bidet),
        ("water.?heater", BlockElementType::WaterHeater),
        ("furnace", BlockElementType::Furnace),
        ("air.?cond|(^|[^a-z0-9])ac([^a-z0-9]|$)", BlockElementType::AirConditioner),
        ("air.?handl|(^|[^a-z0-9])ahu([^a-z0-9]|$)", BlockElementType::AirHandler),
        ("ceiling.?fan", BlockElementType::CeilingFan),
        ("(^|[^a-z0-9])fan([^a-z0-9]|$)", BlockElementType::Fan),
        ("pump", BlockElementType::Pump),
        ("boiler", BlockElementType::Boiler),
        ("chiller", BlockElementType::Chiller),
        ("thermostat", BlockElementType::Thermostat),
        ("diffus", BlockElementType::Diffuser),
        ("grille|return.?air", BlockElementType::ReturnGrille),
        ("panel.?board|elec.*panel|breaker", BlockElementType::ElectricalPanel),
        ("outlet|recep|socket", BlockElementType::Outlet),
        ("switch", BlockElementType::Switch),
        ("smoke.?det", BlockElementType::SmokeDetector),
        ("fire.?alarm|pull.?station", BlockElementType::FireAlarm),
        ("camera|cctv", BlockElementType::SecurityCamera),
        ("light|lamp|lumin|sconce", BlockElementType::LightFixture),
        ("elevator|(^|[^a-z0-9])lift([^a-z0-9]|$)", BlockElementType::Elevator),
        ("desk", BlockElementType::Desk),
        ("chair|stuhl|chaise|silla", BlockElementType::Chair),
        ("table|tisch|mesa", BlockElementType::TableFurniture),
        ("(^|[^a-z0-9])bed([^a-z0-9]|$)|bett", BlockElementType::Bed),
        ("sofa|couch", BlockElementType::Sofa),
        ("cabinet|schrank|casework", BlockElementType::Cabinet),
        ("shelf|shelv|regal", BlockElementType::Shelf),
        ("refrig|fridge", BlockElementType::Refrigerator),
        ("stove|range|cooktop|oven", BlockElementType::Stove),
        ("dishwash", BlockElementType::Dishwasher),
        ("tree|baum|arbre", BlockElementType::Tree),
        ("shrub|bush|hedge", BlockElementType::Shrub),
        ("(^|[^a-z0-9])car([^a-z0-9]|$)|vehicle|truck", BlockElementType::Car),
        ("person|people|human|figure", BlockElementType::Person),
    ];

    TABLE
        .iter()
        .map(|(pattern, element_type)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("invalid built-in block pattern");
            (regex, *element_type)
        })
        .collect()
});

/// Classifies block references against their definitions
#[derive(Debug, Clone)]
pub struct BlockRecognizer {
    /// Uniform scalar applied to coordinates and dimensions
    unit_factor: f64,
}

impl BlockRecognizer {
    /// Create a recognizer with the given unit conversion factor
    pub fn new(unit_factor: f64) -> Self {
        Self { unit_factor }
    }

    /// Recognize every block reference on an importing layer
    pub fn recognize_model(
        &self,
        model: &CadModel,
        mappings: &[LayerMapping],
        cancel: &CancellationToken,
    ) -> Result<Vec<RecognizedBlock>> {
        let by_layer: AHashMap<String, &LayerMapping> = mappings
            .iter()
            .map(|m| (m.cad_layer_name.to_uppercase(), m))
            .collect();

        let mut recognized = Vec::new();
        for (index, reference) in model.block_references() {
            cancel.check()?;

            let layer_name = {
                let name = reference.common.layer.as_str();
                if name.is_empty() { "0" } else { name }
            };
            let importable = by_layer
                .get(layer_name.to_uppercase().as_str())
                .or_else(|| by_layer.get("0"))
                .map(|m| m.should_import)
                .unwrap_or(false);
            if !importable {
                continue;
            }

            // Definition lookup is case-insensitive
            let Some(block) = model.block(&reference.block_name) else {
                log::warn!(
                    "block reference '{}' has no definition",
                    reference.block_name
                );
                continue;
            };

            if let Some(rec) = self.recognize(index, reference, block) {
                recognized.push(rec);
            }
        }
        Ok(recognized)
    }

    /// Classify one reference; `None` when neither phase recognizes it
    pub fn recognize(
        &self,
        source_index: usize,
        reference: &CadBlockReference,
        block: &CadBlock,
    ) -> Option<RecognizedBlock> {
        let element_type = classify_by_name(&block.name)
            .or_else(|| classify_by_name(&reference.block_name))
            .or_else(|| classify_by_geometry(block))?;

        let (width, height, depth) = match block.bounding_box() {
            Some(bbox) => (
                bbox.width() * reference.scale_x.abs() * self.unit_factor,
                bbox.height() * reference.scale_y.abs() * self.unit_factor,
                bbox.depth() * reference.scale_z.abs() * self.unit_factor,
            ),
            None => (0.0, 0.0, 0.0),
        };

        Some(RecognizedBlock {
            source_index,
            block_name: block.name.clone(),
            element_type,
            insertion_point: reference.insertion_point.scaled(self.unit_factor),
            rotation: reference.rotation,
            scale: Vector3D::new(reference.scale_x, reference.scale_y, reference.scale_z),
            width,
            height,
            depth,
            layer: reference.common.layer.clone(),
            attributes: reference.attributes.clone(),
        })
    }
}

/// Phase 1: ordered name patterns, first match wins
fn classify_by_name(name: &str) -> Option<BlockElementType> {
    BLOCK_NAME_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(name))
        .map(|(_, element_type)| *element_type)
}

/// Phase 2: geometric signature of the definition
fn classify_by_geometry(block: &CadBlock) -> Option<BlockElementType> {
    let line_count = block.line_count();
    let aspect = block.bounding_box()?.aspect_ratio();

    if block.has_arc() && (2..=10).contains(&line_count) && aspect > 0.3 && aspect < 3.0 {
        return Some(BlockElementType::Door);
    }
    if !block.has_arc() && line_count >= 4 && aspect > 0.5 && aspect < 2.0 {
        return Some(BlockElementType::Window);
    }
    if block.has_circle() && line_count < 5 {
        return Some(BlockElementType::PlumbingFixture);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ArcEntity, CadEntity, CircleEntity, LineEntity};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> CadEntity {
        CadEntity::Line(LineEntity::from_coords(x1, y1, 0.0, x2, y2, 0.0))
    }

    #[test]
    fn test_name_patterns_first_match_wins() {
        assert_eq!(
            classify_by_name("DOUBLE_DOOR_36"),
            Some(BlockElementType::DoubleDoor)
        );
        assert_eq!(classify_by_name("DOOR_1"), Some(BlockElementType::Door));
        assert_eq!(
            classify_by_name("ceiling-fan-52"),
            Some(BlockElementType::CeilingFan)
        );
        assert_eq!(classify_by_name("EXHAUST FAN"), Some(BlockElementType::Fan));
        assert_eq!(classify_by_name("WC-STANDARD"), Some(BlockElementType::Toilet));
        assert_eq!(classify_by_name("BLK-0042"), None);
    }

    #[test]
    fn test_geometry_signature_door() {
        // An arc (the swing) plus a couple of lines with a squarish footprint
        let mut block = CadBlock::new("B1", Point3D::ORIGIN);
        block.entities.push(line(0.0, 0.0, 0.0, 900.0));
        block.entities.push(line(0.0, 0.0, 50.0, 0.0));
        block.entities.push(CadEntity::Arc(ArcEntity::from_coords(
            0.0, 0.0, 0.0, 900.0, 0.0, 90.0,
        )));
        assert_eq!(classify_by_geometry(&block), Some(BlockElementType::Door));
    }

    #[test]
    fn test_geometry_signature_window() {
        // Four lines, no arc, footprint ratio within (0.5, 2)
        let mut block = CadBlock::new("B2", Point3D::ORIGIN);
        block.entities.push(line(0.0, 0.0, 1000.0, 0.0));
        block.entities.push(line(1000.0, 0.0, 1000.0, 800.0));
        block.entities.push(line(1000.0, 800.0, 0.0, 800.0));
        block.entities.push(line(0.0, 800.0, 0.0, 0.0));
        assert_eq!(classify_by_geometry(&block), Some(BlockElementType::Window));
    }

    #[test]
    fn test_geometry_signature_plumbing() {
        let mut block = CadBlock::new("B3", Point3D::ORIGIN);
        block
            .entities
            .push(CadEntity::Circle(CircleEntity::from_coords(
                0.0, 0.0, 0.0, 200.0,
            )));
        block.entities.push(line(-300.0, -300.0, 300.0, -300.0));
        assert_eq!(
            classify_by_geometry(&block),
            Some(BlockElementType::PlumbingFixture)
        );
    }

    #[test]
    fn test_geometry_signature_rejects_unrecognizable() {
        let mut block = CadBlock::new("B4", Point3D::ORIGIN);
        block.entities.push(line(0.0, 0.0, 10000.0, 0.1));
        assert_eq!(classify_by_geometry(&block), None);
    }

    #[test]
    fn test_dimensions_scaled_by_reference() {
        let recognizer = BlockRecognizer::new(1.0);
        let mut block = CadBlock::new("WINDOW_A", Point3D::ORIGIN);
        block.entities.push(line(0.0, 0.0, 900.0, 0.0));
        block.entities.push(line(900.0, 0.0, 900.0, 600.0));
        block.entities.push(line(900.0, 600.0, 0.0, 600.0));
        block.entities.push(line(0.0, 600.0, 0.0, 0.0));

        let reference = CadBlockReference::new("WINDOW_A", Point3D::new(100.0, 50.0, 0.0))
            .with_scale(2.0, 3.0, 1.0);
        let rec = recognizer.recognize(0, &reference, &block).unwrap();

        assert_eq!(rec.element_type, BlockElementType::Window);
        assert_eq!(rec.width, 1800.0);
        assert_eq!(rec.height, 1800.0);
        assert_eq!(rec.depth, 0.0);
        assert_eq!(rec.insertion_point, Point3D::new(100.0, 50.0, 0.0));
    }
}

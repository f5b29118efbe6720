//! Text and dimension extraction
//!
//! Text strings are classified by content so the converter can emit room
//! labels, grid bubbles, and level tags as their own annotation kinds.
//! Dimensions pass through unclassified with their measurement and
//! extension points preserved.

use crate::classify::LayerMapping;
use crate::document::CadModel;
use crate::entities::DimensionType;
use crate::error::Result;
use crate::pipeline::CancellationToken;
use crate::types::Point3D;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Classification of a text string's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    /// Names a room or functional space
    RoomLabel,
    /// A single letter or a one/two digit grid number
    GridLabel,
    /// Names a storey or level
    LevelLabel,
    /// Looks like a dimension value, optionally with a unit suffix
    DimensionText,
    /// Anything else
    Annotation,
}

static ROOM_LABEL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(room|space|area|zone|bedroom|bathroom|kitchen|living|office|storage)\b")
        .case_insensitive(true)
        .build()
        .expect("invalid room label pattern")
});

static GRID_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]|[0-9]{1,2})$").expect("invalid grid label pattern"));

static LEVEL_LABEL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(level|floor|storey|ground|basement|roof)\b")
        .case_insensitive(true)
        .build()
        .expect("invalid level label pattern")
});

static DIMENSION_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[0-9]+(\.[0-9]+)?\s*(mm|cm|m|ft|in|'|")?$"#).expect("invalid dimension pattern")
});

impl TextClass {
    /// Classify a content string; evaluation order is fixed
    pub fn classify(content: &str) -> TextClass {
        let trimmed = content.trim();
        if ROOM_LABEL.is_match(trimmed) {
            TextClass::RoomLabel
        } else if GRID_LABEL.is_match(trimmed) {
            TextClass::GridLabel
        } else if LEVEL_LABEL.is_match(trimmed) {
            TextClass::LevelLabel
        } else if DIMENSION_TEXT.is_match(trimmed) {
            TextClass::DimensionText
        } else {
            TextClass::Annotation
        }
    }
}

/// A classified text entity ready for conversion
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Index of the source entity in the model's entity list
    pub source_index: usize,
    /// Text content
    pub content: String,
    /// Position in output units
    pub position: Point3D,
    /// Text height in output units
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Layer name
    pub layer: String,
    /// Content classification
    pub text_class: TextClass,
}

/// A dimension entity ready for conversion
#[derive(Debug, Clone)]
pub struct ExtractedDimension {
    /// Index of the source entity in the model's entity list
    pub source_index: usize,
    /// Override text; empty when the measured value is displayed
    pub text: String,
    /// Measured value in output units
    pub measurement: f64,
    /// Definition point in output units
    pub definition_point: Point3D,
    /// First extension line origin in output units
    pub ext_line1_start: Option<Point3D>,
    /// Second extension line origin in output units
    pub ext_line2_start: Option<Point3D>,
    /// Dimension kind
    pub dimension_type: DimensionType,
    /// Layer name
    pub layer: String,
}

/// Extracts classified text and dimensions from a model
#[derive(Debug, Clone)]
pub struct TextExtractor {
    unit_factor: f64,
}

impl TextExtractor {
    /// Create an extractor with the given unit conversion factor
    pub fn new(unit_factor: f64) -> Self {
        Self { unit_factor }
    }

    /// Extract all non-empty text entities on importing layers
    pub fn extract_texts(
        &self,
        model: &CadModel,
        mappings: &[LayerMapping],
        cancel: &CancellationToken,
    ) -> Result<Vec<ExtractedText>> {
        let importable = importable_layers(mappings);

        let mut texts = Vec::new();
        for (index, text) in model.texts() {
            cancel.check()?;

            if text.content.trim().is_empty() {
                continue;
            }
            if !layer_imports(&importable, &text.common.layer) {
                continue;
            }

            texts.push(ExtractedText {
                source_index: index,
                content: text.content.clone(),
                position: text.position.unwrap_or_default().scaled(self.unit_factor),
                height: text.height * self.unit_factor,
                rotation: text.rotation,
                layer: text.common.layer.clone(),
                text_class: TextClass::classify(&text.content),
            });
        }
        Ok(texts)
    }

    /// Extract all dimension entities on importing layers
    pub fn extract_dimensions(
        &self,
        model: &CadModel,
        mappings: &[LayerMapping],
        cancel: &CancellationToken,
    ) -> Result<Vec<ExtractedDimension>> {
        let importable = importable_layers(mappings);
        let f = self.unit_factor;

        let mut dimensions = Vec::new();
        for (index, dim) in model.dimensions() {
            cancel.check()?;

            if !layer_imports(&importable, &dim.common.layer) {
                continue;
            }

            dimensions.push(ExtractedDimension {
                source_index: index,
                text: dim.text.clone(),
                measurement: dim.measurement * f,
                definition_point: dim.definition_point.unwrap_or_default().scaled(f),
                ext_line1_start: dim.ext_line1_start.map(|p| p.scaled(f)),
                ext_line2_start: dim.ext_line2_start.map(|p| p.scaled(f)),
                dimension_type: dim.dimension_type,
                layer: dim.common.layer.clone(),
            });
        }
        Ok(dimensions)
    }
}

fn importable_layers(mappings: &[LayerMapping]) -> AHashMap<String, bool> {
    mappings
        .iter()
        .map(|m| (m.cad_layer_name.to_uppercase(), m.should_import))
        .collect()
}

fn layer_imports(importable: &AHashMap<String, bool>, layer: &str) -> bool {
    let name = if layer.is_empty() { "0" } else { layer };
    importable
        .get(name.to_uppercase().as_str())
        .or_else(|| importable.get("0"))
        .copied()
        .unwrap_or(false)
}

//! Text entity (TEXT and MTEXT)

use super::EntityCommon;
use crate::types::Point3D;

/// A single- or multi-line text entity
///
/// MTEXT is parsed into the same shape; only its primary content (code 1)
/// is honored.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content (code 1)
    pub content: String,
    /// Insertion point (codes 10/20/30)
    pub position: Option<Point3D>,
    /// Text height (code 40)
    pub height: f64,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
    /// Text style name (code 7)
    pub style: String,
}

impl TextEntity {
    /// Create a new empty text entity
    pub fn new() -> Self {
        TextEntity {
            common: EntityCommon::new(),
            content: String::new(),
            position: None,
            height: 2.5,
            rotation: 0.0,
            style: "Standard".to_string(),
        }
    }

    /// Create a text entity with content at a position
    pub fn with_content(content: impl Into<String>, position: Point3D) -> Self {
        TextEntity {
            content: content.into(),
            position: Some(position),
            ..Self::new()
        }
    }
}

impl Default for TextEntity {
    fn default() -> Self {
        Self::new()
    }
}

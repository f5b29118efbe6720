//! CAD entity types
//!
//! Entities are stored as one sum type, [`CadEntity`], with a per-variant
//! payload struct. Every payload embeds [`EntityCommon`] for the properties
//! shared by all DXF entities (layer, color, line type).

pub mod arc;
pub mod block;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod insert;
pub mod line;
pub mod misc;
pub mod polyline;
pub mod solid;
pub mod text;

pub use arc::ArcEntity;
pub use block::CadBlock;
pub use circle::CircleEntity;
pub use dimension::{DimensionEntity, DimensionType};
pub use ellipse::EllipseEntity;
pub use insert::CadBlockReference;
pub use line::LineEntity;
pub use misc::{HatchEntity, PointEntity, SplineEntity};
pub use polyline::{PolylineEntity, PolylineFlags};
pub use solid::SolidEntity;
pub use text::TextEntity;

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Layer name
    pub layer: String,
    /// ACI color index
    pub color: i16,
    /// Line type name
    pub line_type: String,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            layer: "0".to_string(),
            color: 256, // ByLayer
            line_type: "ByLayer".to_string(),
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum CadEntity {
    /// Line entity
    Line(LineEntity),
    /// Polyline entity (POLYLINE and LWPOLYLINE)
    Polyline(PolylineEntity),
    /// Circle entity
    Circle(CircleEntity),
    /// Arc entity
    Arc(ArcEntity),
    /// Ellipse entity
    Ellipse(EllipseEntity),
    /// Text entity (TEXT and MTEXT)
    Text(TextEntity),
    /// Dimension entity
    Dimension(DimensionEntity),
    /// Block reference (INSERT)
    BlockReference(CadBlockReference),
    /// Point entity
    Point(PointEntity),
    /// Spline entity (parsed, not converted)
    Spline(SplineEntity),
    /// Hatch entity (parsed, not converted)
    Hatch(HatchEntity),
    /// Solid entity (SOLID and TRACE)
    Solid(SolidEntity),
}

impl CadEntity {
    /// Get the common entity data
    pub fn common(&self) -> &EntityCommon {
        match self {
            CadEntity::Line(e) => &e.common,
            CadEntity::Polyline(e) => &e.common,
            CadEntity::Circle(e) => &e.common,
            CadEntity::Arc(e) => &e.common,
            CadEntity::Ellipse(e) => &e.common,
            CadEntity::Text(e) => &e.common,
            CadEntity::Dimension(e) => &e.common,
            CadEntity::BlockReference(e) => &e.common,
            CadEntity::Point(e) => &e.common,
            CadEntity::Spline(e) => &e.common,
            CadEntity::Hatch(e) => &e.common,
            CadEntity::Solid(e) => &e.common,
        }
    }

    /// Get the common entity data mutably
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            CadEntity::Line(e) => &mut e.common,
            CadEntity::Polyline(e) => &mut e.common,
            CadEntity::Circle(e) => &mut e.common,
            CadEntity::Arc(e) => &mut e.common,
            CadEntity::Ellipse(e) => &mut e.common,
            CadEntity::Text(e) => &mut e.common,
            CadEntity::Dimension(e) => &mut e.common,
            CadEntity::BlockReference(e) => &mut e.common,
            CadEntity::Point(e) => &mut e.common,
            CadEntity::Spline(e) => &mut e.common,
            CadEntity::Hatch(e) => &mut e.common,
            CadEntity::Solid(e) => &mut e.common,
        }
    }

    /// Get the DXF entity type name
    pub fn entity_type(&self) -> &'static str {
        match self {
            CadEntity::Line(_) => "LINE",
            CadEntity::Polyline(_) => "POLYLINE",
            CadEntity::Circle(_) => "CIRCLE",
            CadEntity::Arc(_) => "ARC",
            CadEntity::Ellipse(_) => "ELLIPSE",
            CadEntity::Text(_) => "TEXT",
            CadEntity::Dimension(_) => "DIMENSION",
            CadEntity::BlockReference(_) => "INSERT",
            CadEntity::Point(_) => "POINT",
            CadEntity::Spline(_) => "SPLINE",
            CadEntity::Hatch(_) => "HATCH",
            CadEntity::Solid(_) => "SOLID",
        }
    }

    /// Layer name of this entity
    pub fn layer(&self) -> &str {
        &self.common().layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3D;

    #[test]
    fn test_common_defaults() {
        let common = EntityCommon::new();
        assert_eq!(common.layer, "0");
        assert_eq!(common.color, 256);
    }

    #[test]
    fn test_entity_type_names() {
        let line = CadEntity::Line(LineEntity::new());
        assert_eq!(line.entity_type(), "LINE");

        let insert = CadEntity::BlockReference(CadBlockReference::new(
            "DOOR_1",
            Point3D::new(0.0, 0.0, 0.0),
        ));
        assert_eq!(insert.entity_type(), "INSERT");
    }

    #[test]
    fn test_layer_accessor() {
        let mut line = LineEntity::new();
        line.common.layer = "A-WALL".to_string();
        let entity = CadEntity::Line(line);
        assert_eq!(entity.layer(), "A-WALL");
    }
}

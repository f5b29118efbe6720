//! Block definition

use super::CadEntity;
use crate::types::{BoundingBox, Point3D};

/// A named, reusable group of entities (a symbol)
#[derive(Debug, Clone)]
pub struct CadBlock {
    /// Block name (code 2)
    pub name: String,
    /// Base point of the definition (codes 10/20/30)
    pub base_point: Point3D,
    /// Entities belonging to this block definition
    pub entities: Vec<CadEntity>,
}

impl CadBlock {
    /// Create a new empty block definition
    pub fn new(name: impl Into<String>, base_point: Point3D) -> Self {
        CadBlock {
            name: name.into(),
            base_point,
            entities: Vec::new(),
        }
    }

    /// Bounding box over all point data in the block's entities
    ///
    /// Arcs and circles contribute their full circumscribing square so a
    /// door swing is measured by its leaf-plus-swing extent.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points: Vec<Point3D> = Vec::new();

        for entity in &self.entities {
            match entity {
                CadEntity::Line(e) => {
                    points.extend(e.start);
                    points.extend(e.end);
                }
                CadEntity::Polyline(e) => {
                    points.extend_from_slice(&e.vertices);
                }
                CadEntity::Circle(e) => {
                    if let Some(c) = e.center {
                        points.push(Point3D::new(c.x - e.radius, c.y - e.radius, c.z));
                        points.push(Point3D::new(c.x + e.radius, c.y + e.radius, c.z));
                    }
                }
                CadEntity::Arc(e) => {
                    if let Some(c) = e.center {
                        points.push(Point3D::new(c.x - e.radius, c.y - e.radius, c.z));
                        points.push(Point3D::new(c.x + e.radius, c.y + e.radius, c.z));
                    }
                }
                CadEntity::Ellipse(e) => {
                    if let Some(c) = e.center {
                        let r = e.major_axis.length();
                        points.push(Point3D::new(c.x - r, c.y - r, c.z));
                        points.push(Point3D::new(c.x + r, c.y + r, c.z));
                    }
                }
                CadEntity::Solid(e) => {
                    points.extend_from_slice(&e.vertices);
                }
                CadEntity::Point(e) => {
                    points.extend(e.location);
                }
                CadEntity::Text(e) => {
                    points.extend(e.position);
                }
                _ => {}
            }
        }
        BoundingBox::from_points(&points)
    }

    /// Count line-like entities (LINE plus polyline segments)
    pub fn line_count(&self) -> usize {
        self.entities
            .iter()
            .map(|e| match e {
                CadEntity::Line(_) => 1,
                CadEntity::Polyline(p) => p.vertices.len().saturating_sub(1),
                _ => 0,
            })
            .sum()
    }

    /// Does the block contain any ARC entity?
    pub fn has_arc(&self) -> bool {
        self.entities
            .iter()
            .any(|e| matches!(e, CadEntity::Arc(_)))
    }

    /// Does the block contain any CIRCLE entity?
    pub fn has_circle(&self) -> bool {
        self.entities
            .iter()
            .any(|e| matches!(e, CadEntity::Circle(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ArcEntity, CircleEntity, LineEntity};

    #[test]
    fn test_block_entity_mix() {
        let mut block = CadBlock::new("DOOR_1", Point3D::ORIGIN);
        block.entities.push(CadEntity::Line(LineEntity::from_coords(
            0.0, 0.0, 0.0, 0.0, 900.0, 0.0,
        )));
        block.entities.push(CadEntity::Arc(ArcEntity::from_coords(
            0.0, 0.0, 0.0, 900.0, 0.0, 90.0,
        )));

        assert!(block.has_arc());
        assert!(!block.has_circle());
        assert_eq!(block.line_count(), 1);
    }

    #[test]
    fn test_bounding_box_includes_arc_extent() {
        let mut block = CadBlock::new("SWING", Point3D::ORIGIN);
        block.entities.push(CadEntity::Arc(ArcEntity::from_coords(
            0.0, 0.0, 0.0, 5.0, 0.0, 90.0,
        )));
        let bbox = block.bounding_box().unwrap();
        assert_eq!(bbox.min, Point3D::new(-5.0, -5.0, 0.0));
        assert_eq!(bbox.max, Point3D::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_empty_block_has_no_bbox() {
        let block = CadBlock::new("EMPTY", Point3D::ORIGIN);
        assert!(block.bounding_box().is_none());
    }

    #[test]
    fn test_circle_detection() {
        let mut block = CadBlock::new("WC-1", Point3D::ORIGIN);
        block
            .entities
            .push(CadEntity::Circle(CircleEntity::from_coords(
                0.0, 0.0, 0.0, 200.0,
            )));
        assert!(block.has_circle());
    }
}

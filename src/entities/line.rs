//! Line entity

use super::EntityCommon;
use crate::types::Point3D;

/// A straight line segment between two points
///
/// Endpoints are `None` until the parser has seen at least one coordinate
/// pair for them; a partially-specified point materializes with missing
/// components defaulted to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point (codes 10/20/30)
    pub start: Option<Point3D>,
    /// End point (codes 11/21/31)
    pub end: Option<Point3D>,
}

impl LineEntity {
    /// Create a new empty line
    pub fn new() -> Self {
        LineEntity {
            common: EntityCommon::new(),
            start: None,
            end: None,
        }
    }

    /// Create a line from coordinates
    pub fn from_coords(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        LineEntity {
            common: EntityCommon::new(),
            start: Some(Point3D::new(x1, y1, z1)),
            end: Some(Point3D::new(x2, y2, z2)),
        }
    }

    /// Length of the line, or 0 when either endpoint is unset
    pub fn length(&self) -> f64 {
        match (self.start, self.end) {
            (Some(s), Some(e)) => s.distance(&e),
            _ => 0.0,
        }
    }
}

impl Default for LineEntity {
    fn default() -> Self {
        Self::new()
    }
}

//! Solid entity (SOLID and TRACE)

use super::EntityCommon;
use crate::types::Point3D;

/// A filled polygon with three or four corner points
#[derive(Debug, Clone, PartialEq)]
pub struct SolidEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Corner points (codes 10/11/12/13 with their 2x/3x companions)
    pub vertices: Vec<Point3D>,
}

impl SolidEntity {
    /// Create a new empty solid
    pub fn new() -> Self {
        SolidEntity {
            common: EntityCommon::new(),
            vertices: Vec::new(),
        }
    }
}

impl Default for SolidEntity {
    fn default() -> Self {
        Self::new()
    }
}

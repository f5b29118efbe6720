//! Circle entity

use super::EntityCommon;
use crate::types::Point3D;

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point (codes 10/20/30)
    pub center: Option<Point3D>,
    /// Radius (code 40)
    pub radius: f64,
}

impl CircleEntity {
    /// Create a new empty circle
    pub fn new() -> Self {
        CircleEntity {
            common: EntityCommon::new(),
            center: None,
            radius: 0.0,
        }
    }

    /// Create a circle from center coordinates and radius
    pub fn from_coords(x: f64, y: f64, z: f64, radius: f64) -> Self {
        CircleEntity {
            common: EntityCommon::new(),
            center: Some(Point3D::new(x, y, z)),
            radius,
        }
    }
}

impl Default for CircleEntity {
    fn default() -> Self {
        Self::new()
    }
}

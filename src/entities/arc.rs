//! Arc entity

use super::EntityCommon;
use crate::types::Point3D;

/// A circular arc
///
/// Start and end angles are stored in degrees exactly as read from the DXF
/// stream (codes 50/51), measured counter-clockwise from the X axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point (codes 10/20/30)
    pub center: Option<Point3D>,
    /// Radius (code 40)
    pub radius: f64,
    /// Start angle in degrees (code 50)
    pub start_angle: f64,
    /// End angle in degrees (code 51)
    pub end_angle: f64,
}

impl ArcEntity {
    /// Create a new empty arc
    pub fn new() -> Self {
        ArcEntity {
            common: EntityCommon::new(),
            center: None,
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    /// Create an arc from center coordinates, radius, and angles in degrees
    pub fn from_coords(x: f64, y: f64, z: f64, radius: f64, start: f64, end: f64) -> Self {
        ArcEntity {
            common: EntityCommon::new(),
            center: Some(Point3D::new(x, y, z)),
            radius,
            start_angle: start,
            end_angle: end,
        }
    }
}

impl Default for ArcEntity {
    fn default() -> Self {
        Self::new()
    }
}

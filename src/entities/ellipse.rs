//! Ellipse entity

use super::EntityCommon;
use crate::types::{Point3D, Vector3D};

/// An ellipse or elliptical arc
///
/// The major axis is a vector from the center to the major-axis endpoint
/// (codes 11/21/31); the minor axis length is expressed as a ratio of the
/// major axis. Parametric start/end angles are in radians per the DXF spec.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point (codes 10/20/30)
    pub center: Option<Point3D>,
    /// Major axis endpoint relative to center (codes 11/21/31)
    pub major_axis: Vector3D,
    /// Minor-to-major axis ratio, in (0, 1] (code 40)
    pub minor_axis_ratio: f64,
    /// Parametric start angle in radians (code 41)
    pub start_angle: f64,
    /// Parametric end angle in radians (code 42)
    pub end_angle: f64,
}

impl EllipseEntity {
    /// Create a new empty ellipse (full sweep)
    pub fn new() -> Self {
        EllipseEntity {
            common: EntityCommon::new(),
            center: None,
            major_axis: Vector3D::UNIT_X,
            minor_axis_ratio: 1.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
        }
    }
}

impl Default for EllipseEntity {
    fn default() -> Self {
        Self::new()
    }
}

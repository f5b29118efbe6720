//! Entities that are parsed but not converted to building elements

use super::EntityCommon;
use crate::types::Point3D;

/// A point marker
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Location (codes 10/20/30)
    pub location: Option<Point3D>,
}

impl PointEntity {
    /// Create a new empty point entity
    pub fn new() -> Self {
        Self::default()
    }
}

/// A NURBS spline; only control points are retained
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplineEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Control points (repeated codes 10/20/30)
    pub control_points: Vec<Point3D>,
    /// Spline degree (code 71)
    pub degree: i16,
}

impl SplineEntity {
    /// Create a new empty spline
    pub fn new() -> Self {
        Self::default()
    }
}

/// A hatch fill; only the pattern name is retained
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HatchEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Hatch pattern name (code 2)
    pub pattern_name: String,
}

impl HatchEntity {
    /// Create a new empty hatch
    pub fn new() -> Self {
        Self::default()
    }
}

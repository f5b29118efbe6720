//! Bounding box type for geometric entities

use super::Point3D;
use std::fmt;

/// Axis-aligned 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum point (lower-left-back corner)
    pub min: Point3D,
    /// Maximum point (upper-right-front corner)
    pub max: Point3D,
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox {
            min: Point3D::ORIGIN,
            max: Point3D::ORIGIN,
        }
    }
}

impl BoundingBox {
    /// Create a new bounding box from min and max points
    pub fn new(min: Point3D, max: Point3D) -> Self {
        BoundingBox { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Point3D) -> Self {
        BoundingBox {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let first = *points.first()?;
        let mut bbox = BoundingBox::from_point(first);
        for point in points.iter().skip(1) {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Get the width of the bounding box (X dimension)
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Get the height of the bounding box (Y dimension)
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Get the depth of the bounding box (Z dimension)
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Volume as the product of the three extents (zero on any flat axis)
    pub fn volume(&self) -> f64 {
        self.width() * self.height() * self.depth()
    }

    /// Aspect ratio of the XY footprint (width / height)
    ///
    /// Returns `f64::INFINITY` for a zero-height box.
    pub fn aspect_ratio(&self) -> f64 {
        let h = self.height();
        if h == 0.0 {
            f64::INFINITY
        } else {
            self.width() / h
        }
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Point3D {
        self.min.midpoint(&self.max)
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Point3D) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Point3D::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3D::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox[{} -> {}]", self.min, self.max)
    }
}

//! Polyline entity (POLYLINE and LWPOLYLINE)

use super::EntityCommon;
use crate::types::Point3D;
use bitflags::bitflags;

bitflags! {
    /// DXF polyline flags (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: i16 {
        /// The polyline is closed
        const CLOSED = 1;
        /// Curve-fit vertices have been added
        const CURVE_FIT = 2;
        /// The polyline is a 3D polyline
        const POLYLINE_3D = 8;
    }
}

/// A polyline with optional arc segments encoded as bulges
///
/// `bulges[i]` applies to the segment from `vertices[i]` to
/// `vertices[i + 1]`; bulge = tan(angle/4) where angle is the included arc
/// angle, positive for counter-clockwise. There are never more bulges than
/// vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertex locations in order
    pub vertices: Vec<Point3D>,
    /// Per-segment bulge values, parallel to `vertices`
    pub bulges: Vec<f64>,
    /// Is the polyline closed?
    pub is_closed: bool,
}

impl PolylineEntity {
    /// Create a new empty polyline
    pub fn new() -> Self {
        PolylineEntity {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            bulges: Vec::new(),
            is_closed: false,
        }
    }

    /// Create a polyline from a list of points
    pub fn from_points(points: Vec<Point3D>) -> Self {
        let bulges = vec![0.0; points.len()];
        PolylineEntity {
            common: EntityCommon::new(),
            vertices: points,
            bulges,
            is_closed: false,
        }
    }

    /// Add a vertex with zero bulge
    pub fn add_vertex(&mut self, point: Point3D) {
        self.vertices.push(point);
        self.bulges.push(0.0);
    }

    /// Add a vertex with a bulge on its outgoing segment
    pub fn add_vertex_with_bulge(&mut self, point: Point3D, bulge: f64) {
        self.vertices.push(point);
        self.bulges.push(bulge);
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Bulge for the segment starting at `index`, 0 when absent
    pub fn bulge_at(&self, index: usize) -> f64 {
        self.bulges.get(index).copied().unwrap_or(0.0)
    }
}

impl Default for PolylineEntity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertices() {
        let mut poly = PolylineEntity::new();
        poly.add_vertex(Point3D::new(0.0, 0.0, 0.0));
        poly.add_vertex_with_bulge(Point3D::new(10.0, 0.0, 0.0), 1.0);
        assert_eq!(poly.vertex_count(), 2);
        assert_eq!(poly.bulge_at(0), 0.0);
        assert_eq!(poly.bulge_at(1), 1.0);
        assert_eq!(poly.bulge_at(5), 0.0);
    }

    #[test]
    fn test_closed_flag_bit() {
        let flags = PolylineFlags::from_bits_truncate(1);
        assert!(flags.contains(PolylineFlags::CLOSED));
    }
}

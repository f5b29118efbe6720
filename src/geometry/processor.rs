//! Geometry normalization
//!
//! Converts each CAD entity whose layer imports into an [`ProcessedGeometry`]
//! value: unit conversion is applied to every coordinate (never to angles),
//! polyline bulges are expanded to arc segments, and degenerate entities are
//! dropped.

use super::bulge::{bulge_to_arc, BULGE_EPSILON};
use super::element::{ElementGeometry, LineGeometry, LineSegment, PolySegment};
use crate::classify::{LayerMapping, RevitCategory};
use crate::document::CadModel;
use crate::entities::{CadEntity, PolylineEntity};
use crate::error::Result;
use crate::pipeline::CancellationToken;
use ahash::AHashMap;

/// A normalized, categorized geometry with an index reference back to its
/// source entity
#[derive(Debug, Clone)]
pub struct ProcessedGeometry {
    /// Index of the source entity in the model's entity list
    pub source_index: usize,
    /// Layer the source entity was drawn on
    pub source_layer: String,
    /// Category resolved from that layer
    pub category: RevitCategory,
    /// The normalized geometry
    pub geometry: ElementGeometry,
}

/// Converts importable CAD entities into element geometry
#[derive(Debug, Clone)]
pub struct GeometryProcessor {
    /// Uniform scalar applied to every coordinate
    unit_factor: f64,
    /// Minimum line length in output units
    min_line_length: f64,
    /// Minimum circle/arc radius in output units
    min_radius: f64,
}

impl GeometryProcessor {
    /// Create a processor with the given conversion factor and minima
    pub fn new(unit_factor: f64, min_line_length: f64, min_radius: f64) -> Self {
        Self {
            unit_factor,
            min_line_length,
            min_radius,
        }
    }

    /// Process every importable entity of a model, preserving entity order
    pub fn process_model(
        &self,
        model: &CadModel,
        mappings: &[LayerMapping],
        cancel: &CancellationToken,
    ) -> Result<Vec<ProcessedGeometry>> {
        let by_layer: AHashMap<String, &LayerMapping> = mappings
            .iter()
            .map(|m| (m.cad_layer_name.to_uppercase(), m))
            .collect();

        let mut processed = Vec::new();
        for (index, entity) in model.entities.iter().enumerate() {
            cancel.check()?;

            // A missing layer defaults to "0"; no mapping at all skips the
            // entity
            let layer_name = {
                let name = entity.layer();
                if name.is_empty() { "0" } else { name }
            };
            let mapping = match by_layer
                .get(layer_name.to_uppercase().as_str())
                .or_else(|| by_layer.get("0"))
            {
                Some(m) => m,
                None => continue,
            };
            if !mapping.should_import {
                continue;
            }

            if let Some(geometry) = self.process_entity(entity) {
                processed.push(ProcessedGeometry {
                    source_index: index,
                    source_layer: mapping.cad_layer_name.clone(),
                    category: mapping.category,
                    geometry,
                });
            }
        }
        Ok(processed)
    }

    /// Normalize a single entity; `None` for degenerate or unconvertible
    /// entities
    pub fn process_entity(&self, entity: &CadEntity) -> Option<ElementGeometry> {
        let f = self.unit_factor;
        match entity {
            CadEntity::Line(line) => {
                let start = line.start?.scaled(f);
                let end = line.end?.scaled(f);
                let geometry = LineGeometry::new(start, end);
                if geometry.length() < self.min_line_length {
                    return None;
                }
                Some(ElementGeometry::Line(geometry))
            }
            CadEntity::Polyline(poly) => self.process_polyline(poly),
            CadEntity::Circle(circle) => {
                let center = circle.center?.scaled(f);
                let radius = circle.radius * f;
                if radius < self.min_radius {
                    return None;
                }
                Some(ElementGeometry::Circle { center, radius })
            }
            CadEntity::Arc(arc) => {
                let center = arc.center?.scaled(f);
                let radius = arc.radius * f;
                if radius < self.min_radius {
                    return None;
                }
                Some(ElementGeometry::Arc {
                    center,
                    radius,
                    start_angle: arc.start_angle,
                    end_angle: arc.end_angle,
                })
            }
            CadEntity::Ellipse(ellipse) => {
                let center = ellipse.center?.scaled(f);
                Some(ElementGeometry::Ellipse {
                    center,
                    major_axis: ellipse.major_axis * f,
                    minor_axis_ratio: ellipse.minor_axis_ratio,
                    start_angle: ellipse.start_angle,
                    end_angle: ellipse.end_angle,
                })
            }
            CadEntity::Solid(solid) => {
                if solid.vertices.len() < 3 {
                    return None;
                }
                Some(ElementGeometry::Solid {
                    vertices: solid.vertices.iter().map(|v| v.scaled(f)).collect(),
                })
            }
            // Text, dimensions, and block references have their own stages;
            // everything else is not convertible
            _ => None,
        }
    }

    /// Expand a polyline into line and arc segments
    fn process_polyline(&self, poly: &PolylineEntity) -> Option<ElementGeometry> {
        if poly.vertex_count() < 2 {
            return None;
        }

        let vertices: Vec<_> = poly
            .vertices
            .iter()
            .map(|v| v.scaled(self.unit_factor))
            .collect();
        let n = vertices.len();

        let mut segments = Vec::with_capacity(n);
        for i in 0..n - 1 {
            segments.push(make_segment(vertices[i], vertices[i + 1], poly.bulge_at(i)));
        }
        if poly.is_closed {
            segments.push(make_segment(vertices[n - 1], vertices[0], poly.bulge_at(n - 1)));
        }

        Some(ElementGeometry::Polyline {
            segments,
            is_closed: poly.is_closed,
        })
    }
}

fn make_segment(start: crate::types::Point3D, end: crate::types::Point3D, bulge: f64) -> PolySegment {
    if bulge.abs() > BULGE_EPSILON {
        PolySegment::Arc(bulge_to_arc(start, end, bulge))
    } else {
        PolySegment::Line(LineSegment { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CircleEntity, LineEntity};
    use crate::types::Point3D;

    fn processor() -> GeometryProcessor {
        GeometryProcessor::new(1.0, 1.0, 0.5)
    }

    #[test]
    fn test_line_below_minimum_dropped() {
        let p = processor();
        let short = CadEntity::Line(LineEntity::from_coords(0.0, 0.0, 0.0, 0.5, 0.0, 0.0));
        assert!(p.process_entity(&short).is_none());

        let long = CadEntity::Line(LineEntity::from_coords(0.0, 0.0, 0.0, 5.0, 0.0, 0.0));
        assert!(p.process_entity(&long).is_some());
    }

    #[test]
    fn test_line_missing_endpoint_dropped() {
        let p = processor();
        let mut line = LineEntity::new();
        line.start = Some(Point3D::ORIGIN);
        assert!(p.process_entity(&CadEntity::Line(line)).is_none());
    }

    #[test]
    fn test_unit_conversion_scales_coordinates_not_angles() {
        let p = GeometryProcessor::new(25.4, 1.0, 0.5);
        let arc = crate::entities::ArcEntity::from_coords(1.0, 0.0, 0.0, 2.0, 30.0, 120.0);
        match p.process_entity(&CadEntity::Arc(arc)).unwrap() {
            ElementGeometry::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                assert_eq!(center, Point3D::new(25.4, 0.0, 0.0));
                assert_eq!(radius, 50.8);
                // Angles pass through untouched
                assert_eq!(start_angle, 30.0);
                assert_eq!(end_angle, 120.0);
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_small_radius_dropped() {
        let p = processor();
        let tiny = CadEntity::Circle(CircleEntity::from_coords(0.0, 0.0, 0.0, 0.1));
        assert!(p.process_entity(&tiny).is_none());
    }

    #[test]
    fn test_open_polyline_segment_count() {
        let p = processor();
        let poly = PolylineEntity::from_points(vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            Point3D::new(10.0, 10.0, 0.0),
            Point3D::new(0.0, 10.0, 0.0),
        ]);
        match p.process_entity(&CadEntity::Polyline(poly)).unwrap() {
            ElementGeometry::Polyline {
                segments,
                is_closed,
            } => {
                // n vertices, open: exactly n-1 segments
                assert_eq!(segments.len(), 3);
                assert!(!is_closed);
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_closed_polyline_appends_closing_segment() {
        let p = processor();
        let mut poly = PolylineEntity::from_points(vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            Point3D::new(10.0, 10.0, 0.0),
            Point3D::new(0.0, 10.0, 0.0),
        ]);
        poly.is_closed = true;
        match p.process_entity(&CadEntity::Polyline(poly)).unwrap() {
            ElementGeometry::Polyline { segments, .. } => {
                assert_eq!(segments.len(), 4);
                // Closing segment returns to the first vertex
                assert_eq!(segments[3].end(), Point3D::new(0.0, 0.0, 0.0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_bulge_produces_arc_segment() {
        let p = processor();
        let mut poly = PolylineEntity::new();
        poly.add_vertex_with_bulge(Point3D::new(0.0, 0.0, 0.0), 1.0);
        poly.add_vertex(Point3D::new(10.0, 0.0, 0.0));

        match p.process_entity(&CadEntity::Polyline(poly)).unwrap() {
            ElementGeometry::Polyline { segments, .. } => {
                assert_eq!(segments.len(), 1);
                match &segments[0] {
                    PolySegment::Arc(arc) => {
                        assert!((arc.radius - 5.0).abs() < 1e-9);
                        assert!(!arc.is_clockwise);
                    }
                    other => panic!("expected arc segment, got {:?}", other),
                }
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_tiny_bulge_stays_straight() {
        let p = processor();
        let mut poly = PolylineEntity::new();
        poly.add_vertex_with_bulge(Point3D::new(0.0, 0.0, 0.0), 5e-5);
        poly.add_vertex(Point3D::new(10.0, 0.0, 0.0));

        match p.process_entity(&CadEntity::Polyline(poly)).unwrap() {
            ElementGeometry::Polyline { segments, .. } => {
                assert!(matches!(segments[0], PolySegment::Line(_)));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_single_vertex_polyline_dropped() {
        let p = processor();
        let mut poly = PolylineEntity::new();
        poly.add_vertex(Point3D::ORIGIN);
        assert!(p.process_entity(&CadEntity::Polyline(poly)).is_none());
    }
}

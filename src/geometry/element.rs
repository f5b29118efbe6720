//! Element geometry produced by the geometry processor
//!
//! A flat sum type replaces the source's geometry class hierarchy; the
//! converter and post-processor pattern-match on it.

use crate::types::{BoundingBox, Point3D, Vector3D};
use std::fmt::Write as _;

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub start: Point3D,
    pub end: Point3D,
}

impl LineGeometry {
    /// Create a new line geometry
    pub fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }

    /// Line length
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Normalized direction from start to end
    pub fn direction(&self) -> Vector3D {
        (self.end - self.start).normalize()
    }

    /// Distance from a point to this segment, clamping the projection
    /// parameter to [0, 1]
    pub fn distance_to_point(&self, point: Point3D) -> f64 {
        let dir = self.end - self.start;
        let len_sq = dir.length_squared();
        if len_sq == 0.0 {
            return self.start.distance(&point);
        }
        let t = ((point - self.start).dot(&dir) / len_sq).clamp(0.0, 1.0);
        let closest = self.start + dir * t;
        closest.distance(&point)
    }
}

/// A straight polyline segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point3D,
    pub end: Point3D,
}

/// A circular polyline segment expanded from a bulge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    /// Arc start point (the segment's start vertex)
    pub start_point: Point3D,
    /// Arc end point (the segment's end vertex)
    pub end_point: Point3D,
    /// Arc center
    pub center: Point3D,
    /// Arc radius
    pub radius: f64,
    /// Sweep direction; clockwise for a negative bulge
    pub is_clockwise: bool,
}

/// One segment of a processed polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolySegment {
    Line(LineSegment),
    Arc(ArcSegment),
}

impl PolySegment {
    /// Start point of the segment
    pub fn start(&self) -> Point3D {
        match self {
            PolySegment::Line(s) => s.start,
            PolySegment::Arc(a) => a.start_point,
        }
    }

    /// End point of the segment
    pub fn end(&self) -> Point3D {
        match self {
            PolySegment::Line(s) => s.end,
            PolySegment::Arc(a) => a.end_point,
        }
    }
}

/// Discriminant tag for [`ElementGeometry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Line,
    OpenPolyline,
    ClosedPolyline,
    Circle,
    Arc,
    Ellipse,
    Solid,
    Point,
}

/// Normalized geometry of a converted element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementGeometry {
    /// A single line
    Line(LineGeometry),
    /// A polyline of line and arc segments
    Polyline {
        segments: Vec<PolySegment>,
        is_closed: bool,
    },
    /// A full circle
    Circle { center: Point3D, radius: f64 },
    /// A circular arc; angles in degrees as read from the source
    Arc {
        center: Point3D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// An ellipse or elliptical arc; parametric angles in radians
    Ellipse {
        center: Point3D,
        major_axis: Vector3D,
        minor_axis_ratio: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// A filled polygon
    Solid { vertices: Vec<Point3D> },
    /// A bare point (annotation anchors)
    Point(Point3D),
}

impl ElementGeometry {
    /// Discriminant tag, distinguishing open and closed polylines
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            ElementGeometry::Line(_) => GeometryType::Line,
            ElementGeometry::Polyline { is_closed, .. } => {
                if *is_closed {
                    GeometryType::ClosedPolyline
                } else {
                    GeometryType::OpenPolyline
                }
            }
            ElementGeometry::Circle { .. } => GeometryType::Circle,
            ElementGeometry::Arc { .. } => GeometryType::Arc,
            ElementGeometry::Ellipse { .. } => GeometryType::Ellipse,
            ElementGeometry::Solid { .. } => GeometryType::Solid,
            ElementGeometry::Point(_) => GeometryType::Point,
        }
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            ElementGeometry::Line(line) => {
                BoundingBox::from_points(&[line.start, line.end]).unwrap_or_default()
            }
            ElementGeometry::Polyline { segments, .. } => {
                let mut points = Vec::with_capacity(segments.len() * 2);
                for segment in segments {
                    points.push(segment.start());
                    points.push(segment.end());
                }
                BoundingBox::from_points(&points).unwrap_or_default()
            }
            ElementGeometry::Circle { center, radius } => BoundingBox::new(
                Point3D::new(center.x - radius, center.y - radius, center.z),
                Point3D::new(center.x + radius, center.y + radius, center.z),
            ),
            ElementGeometry::Arc { center, radius, .. } => BoundingBox::new(
                Point3D::new(center.x - radius, center.y - radius, center.z),
                Point3D::new(center.x + radius, center.y + radius, center.z),
            ),
            ElementGeometry::Ellipse {
                center, major_axis, ..
            } => {
                let r = major_axis.length();
                BoundingBox::new(
                    Point3D::new(center.x - r, center.y - r, center.z),
                    Point3D::new(center.x + r, center.y + r, center.z),
                )
            }
            ElementGeometry::Solid { vertices } => {
                BoundingBox::from_points(vertices).unwrap_or_default()
            }
            ElementGeometry::Point(p) => BoundingBox::from_point(*p),
        }
    }

    /// Geometric center (bounding-box center)
    pub fn center(&self) -> Point3D {
        self.bounding_box().center()
    }

    /// Validate the geometry, returning one message per issue found
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        match self {
            ElementGeometry::Line(line) => {
                if line.length() == 0.0 {
                    issues.push("zero-length line".to_string());
                }
            }
            ElementGeometry::Polyline { segments, .. } => {
                if segments.is_empty() {
                    issues.push("empty polyline".to_string());
                }
            }
            ElementGeometry::Circle { radius, .. } => {
                if *radius <= 0.0 {
                    issues.push("zero-radius circle".to_string());
                }
            }
            ElementGeometry::Arc { radius, .. } => {
                if *radius <= 0.0 {
                    issues.push("zero-radius arc".to_string());
                }
            }
            ElementGeometry::Solid { vertices } => {
                if vertices.len() < 3 {
                    issues.push(format!("solid with {} vertices", vertices.len()));
                }
            }
            ElementGeometry::Ellipse { .. } | ElementGeometry::Point(_) => {}
        }
        issues
    }

    /// Deterministic geometry hash with coordinates at two decimal places
    ///
    /// Elements whose coordinates agree to within 0.005 units produce the
    /// same hash, which is what duplicate removal keys on.
    pub fn hash_string(&self) -> String {
        let mut hash = String::new();
        match self {
            ElementGeometry::Line(line) => {
                write!(hash, "line:{}|{}", fmt_point(line.start), fmt_point(line.end)).ok();
            }
            ElementGeometry::Polyline {
                segments,
                is_closed,
            } => {
                write!(hash, "pline:{}", if *is_closed { "c" } else { "o" }).ok();
                for segment in segments {
                    match segment {
                        PolySegment::Line(s) => {
                            write!(hash, "|l:{}>{}", fmt_point(s.start), fmt_point(s.end)).ok();
                        }
                        PolySegment::Arc(a) => {
                            write!(
                                hash,
                                "|a:{}>{}@{}r{:.2}{}",
                                fmt_point(a.start_point),
                                fmt_point(a.end_point),
                                fmt_point(a.center),
                                a.radius,
                                if a.is_clockwise { "-" } else { "+" }
                            )
                            .ok();
                        }
                    }
                }
            }
            ElementGeometry::Circle { center, radius } => {
                write!(hash, "circle:{}r{:.2}", fmt_point(*center), radius).ok();
            }
            ElementGeometry::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                write!(
                    hash,
                    "arc:{}r{:.2}s{:.2}e{:.2}",
                    fmt_point(*center),
                    radius,
                    start_angle,
                    end_angle
                )
                .ok();
            }
            ElementGeometry::Ellipse {
                center,
                major_axis,
                minor_axis_ratio,
                start_angle,
                end_angle,
            } => {
                write!(
                    hash,
                    "ellipse:{}m{:.2},{:.2},{:.2}q{:.2}s{:.2}e{:.2}",
                    fmt_point(*center),
                    major_axis.x,
                    major_axis.y,
                    major_axis.z,
                    minor_axis_ratio,
                    start_angle,
                    end_angle
                )
                .ok();
            }
            ElementGeometry::Solid { vertices } => {
                hash.push_str("solid:");
                for v in vertices {
                    write!(hash, "{};", fmt_point(*v)).ok();
                }
            }
            ElementGeometry::Point(p) => {
                write!(hash, "point:{}", fmt_point(*p)).ok();
            }
        }
        hash
    }
}

fn fmt_point(p: Point3D) -> String {
    format!("{:.2},{:.2},{:.2}", p.x, p.y, p.z)
}

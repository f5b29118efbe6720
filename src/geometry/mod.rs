//! Geometry normalization and the element geometry model

pub mod bulge;
pub mod element;
pub mod processor;

pub use bulge::{bulge_to_arc, included_angle, BULGE_EPSILON};
pub use element::{
    ArcSegment, ElementGeometry, GeometryType, LineGeometry, LineSegment, PolySegment,
};
pub use processor::{GeometryProcessor, ProcessedGeometry};

//! Layer-to-category classification

pub mod category;
pub mod mapper;

pub use category::{MappingSource, RevitCategory};
pub use mapper::{LayerClassifier, LayerMapping};

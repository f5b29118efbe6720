//! Block recognition: name patterns and geometric signatures

pub mod element_type;
pub mod recognizer;

pub use element_type::BlockElementType;
pub use recognizer::{BlockRecognizer, RecognizedBlock};

//! DXF (ASCII tagged-pair) reading

mod parser;
mod stream;

pub use parser::{is_binary_dxf, DxfParser};
pub use stream::{DxfCodePair, DxfStreamReader, PointAccumulator};

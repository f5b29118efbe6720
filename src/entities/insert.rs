//! Block reference entity (INSERT)

use super::EntityCommon;
use crate::types::Point3D;
use ahash::AHashMap;

/// A positioned, scaled, rotated instance of a block definition
#[derive(Debug, Clone)]
pub struct CadBlockReference {
    /// Common entity data
    pub common: EntityCommon,
    /// Name of the referenced block (code 2)
    pub block_name: String,
    /// Insertion point (codes 10/20/30)
    pub insertion_point: Point3D,
    /// X scale factor (code 41)
    pub scale_x: f64,
    /// Y scale factor (code 42)
    pub scale_y: f64,
    /// Z scale factor (code 43)
    pub scale_z: f64,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
    /// Attribute tag/value pairs
    ///
    /// ATTRIB sub-entities are not parsed; the map stays empty.
    pub attributes: AHashMap<String, String>,
}

impl CadBlockReference {
    /// Create a new block reference with unit scale and no rotation
    pub fn new(block_name: impl Into<String>, insertion_point: Point3D) -> Self {
        CadBlockReference {
            common: EntityCommon::new(),
            block_name: block_name.into(),
            insertion_point,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rotation: 0.0,
            attributes: AHashMap::new(),
        }
    }

    /// Builder: set the scale factors
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self.scale_z = z;
        self
    }

    /// Builder: set the rotation in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

//! Drawing layers

use bitflags::bitflags;

bitflags! {
    /// DXF layer flags (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        /// Layer is frozen
        const FROZEN = 1;
        /// Layer is frozen in new viewports
        const FROZEN_NEW_VIEWPORTS = 2;
        /// Layer is locked
        const LOCKED = 4;
    }
}

/// A layer parsed from the drawing's LAYER table
#[derive(Debug, Clone)]
pub struct CadLayer {
    /// Layer name
    pub name: String,
    /// ACI color index; a negative value means the layer is off
    pub color: i16,
    /// Line type name
    pub line_type: String,
    /// Frozen / locked flag bits
    pub flags: LayerFlags,
    /// Layer is on (not hidden)
    pub is_on: bool,
}

impl CadLayer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        CadLayer {
            name: name.into(),
            color: 7,
            line_type: "Continuous".to_string(),
            flags: LayerFlags::empty(),
            is_on: true,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Self::new("0")
    }

    /// Check if the layer is frozen
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    /// Check if the layer is locked
    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    /// Check if the layer is visible (on and not frozen)
    pub fn is_visible(&self) -> bool {
        self.is_on && !self.is_frozen()
    }

    /// Apply a raw DXF color index (a negative index turns the layer off)
    pub fn set_color_index(&mut self, index: i16) {
        if index < 0 {
            self.is_on = false;
            self.color = -index;
        } else {
            self.color = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let layer = CadLayer::new("A-WALL");
        assert_eq!(layer.name, "A-WALL");
        assert_eq!(layer.color, 7);
        assert!(layer.is_on);
        assert!(!layer.is_frozen());
        assert!(!layer.is_locked());
        assert!(layer.is_visible());
    }

    #[test]
    fn test_flags_from_dxf_bits() {
        let flags = LayerFlags::from_bits_truncate(5);
        assert!(flags.contains(LayerFlags::FROZEN));
        assert!(flags.contains(LayerFlags::LOCKED));
    }

    #[test]
    fn test_frozen_layer_not_visible() {
        let mut layer = CadLayer::new("A-WALL");
        layer.flags |= LayerFlags::FROZEN;
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_negative_color_turns_layer_off() {
        let mut layer = CadLayer::new("E-LITE");
        layer.set_color_index(-3);
        assert!(!layer.is_on);
        assert_eq!(layer.color, 3);
        assert!(!layer.is_visible());
    }
}

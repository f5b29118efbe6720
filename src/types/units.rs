//! Drawing unit codes from the DXF `$INSUNITS` header variable

use std::fmt;

/// Drawing insertion units as encoded by `$INSUNITS`
///
/// Only the units that occur in practice on architectural drawings are
/// distinguished; every other code collapses to `Unitless`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CadUnits {
    /// No unit information (code 0, and any unrecognized code)
    #[default]
    Unitless,
    /// Inches (code 1)
    Inches,
    /// Feet (code 2)
    Feet,
    /// Millimeters (code 4)
    Millimeters,
    /// Centimeters (code 5)
    Centimeters,
    /// Meters (code 6)
    Meters,
}

impl CadUnits {
    /// Decode an `$INSUNITS` value
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => CadUnits::Inches,
            2 => CadUnits::Feet,
            4 => CadUnits::Millimeters,
            5 => CadUnits::Centimeters,
            6 => CadUnits::Meters,
            _ => CadUnits::Unitless,
        }
    }

    /// Conversion factor from this unit to millimeters
    ///
    /// `Unitless` is treated as already-millimeters (factor 1).
    pub fn to_millimeters(&self) -> f64 {
        match self {
            CadUnits::Unitless | CadUnits::Millimeters => 1.0,
            CadUnits::Inches => 25.4,
            CadUnits::Feet => 304.8,
            CadUnits::Centimeters => 10.0,
            CadUnits::Meters => 1000.0,
        }
    }
}

impl fmt::Display for CadUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CadUnits::Unitless => "Unitless",
            CadUnits::Inches => "Inches",
            CadUnits::Feet => "Feet",
            CadUnits::Millimeters => "Millimeters",
            CadUnits::Centimeters => "Centimeters",
            CadUnits::Meters => "Meters",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(CadUnits::from_code(0), CadUnits::Unitless);
        assert_eq!(CadUnits::from_code(1), CadUnits::Inches);
        assert_eq!(CadUnits::from_code(2), CadUnits::Feet);
        assert_eq!(CadUnits::from_code(4), CadUnits::Millimeters);
        assert_eq!(CadUnits::from_code(5), CadUnits::Centimeters);
        assert_eq!(CadUnits::from_code(6), CadUnits::Meters);
        // Unknown codes default to Unitless
        assert_eq!(CadUnits::from_code(3), CadUnits::Unitless);
        assert_eq!(CadUnits::from_code(99), CadUnits::Unitless);
    }

    #[test]
    fn test_millimeter_factors() {
        assert_eq!(CadUnits::Millimeters.to_millimeters(), 1.0);
        assert_eq!(CadUnits::Inches.to_millimeters(), 25.4);
        assert_eq!(CadUnits::Meters.to_millimeters(), 1000.0);
    }
}

//! Target BIM category taxonomy

use std::fmt;

/// Target category a layer or block resolves to
///
/// Mirrors the modeling host's taxonomy; `GenericModel` is the catch-all
/// for anything that cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RevitCategory {
    Walls,
    CurtainWalls,
    Doors,
    Windows,
    Columns,
    StructuralColumns,
    StructuralFraming,
    StructuralFoundations,
    Floors,
    Ceilings,
    Roofs,
    Stairs,
    Railings,
    Ramps,
    Furniture,
    Casework,
    PlumbingFixtures,
    MechanicalEquipment,
    Ducts,
    Pipes,
    ElectricalEquipment,
    ElectricalFixtures,
    LightingFixtures,
    AirTerminals,
    CableTrays,
    Conduits,
    FireProtection,
    CommunicationDevices,
    SecurityDevices,
    Site,
    Parking,
    Planting,
    Entourage,
    Topography,
    Rooms,
    Levels,
    Grids,
    Dimensions,
    TextNotes,
    GenericAnnotation,
    GenericModel,
}

impl RevitCategory {
    /// Human-readable category name
    pub fn as_str(&self) -> &'static str {
        match self {
            RevitCategory::Walls => "Walls",
            RevitCategory::CurtainWalls => "Curtain Walls",
            RevitCategory::Doors => "Doors",
            RevitCategory::Windows => "Windows",
            RevitCategory::Columns => "Columns",
            RevitCategory::StructuralColumns => "Structural Columns",
            RevitCategory::StructuralFraming => "Structural Framing",
            RevitCategory::StructuralFoundations => "Structural Foundations",
            RevitCategory::Floors => "Floors",
            RevitCategory::Ceilings => "Ceilings",
            RevitCategory::Roofs => "Roofs",
            RevitCategory::Stairs => "Stairs",
            RevitCategory::Railings => "Railings",
            RevitCategory::Ramps => "Ramps",
            RevitCategory::Furniture => "Furniture",
            RevitCategory::Casework => "Casework",
            RevitCategory::PlumbingFixtures => "Plumbing Fixtures",
            RevitCategory::MechanicalEquipment => "Mechanical Equipment",
            RevitCategory::Ducts => "Ducts",
            RevitCategory::Pipes => "Pipes",
            RevitCategory::ElectricalEquipment => "Electrical Equipment",
            RevitCategory::ElectricalFixtures => "Electrical Fixtures",
            RevitCategory::LightingFixtures => "Lighting Fixtures",
            RevitCategory::AirTerminals => "Air Terminals",
            RevitCategory::CableTrays => "Cable Trays",
            RevitCategory::Conduits => "Conduits",
            RevitCategory::FireProtection => "Fire Protection",
            RevitCategory::CommunicationDevices => "Communication Devices",
            RevitCategory::SecurityDevices => "Security Devices",
            RevitCategory::Site => "Site",
            RevitCategory::Parking => "Parking",
            RevitCategory::Planting => "Planting",
            RevitCategory::Entourage => "Entourage",
            RevitCategory::Topography => "Topography",
            RevitCategory::Rooms => "Rooms",
            RevitCategory::Levels => "Levels",
            RevitCategory::Grids => "Grids",
            RevitCategory::Dimensions => "Dimensions",
            RevitCategory::TextNotes => "Text Notes",
            RevitCategory::GenericAnnotation => "Generic Annotations",
            RevitCategory::GenericModel => "Generic Models",
        }
    }

    /// Is this an annotation-style category (no physical geometry)?
    pub fn is_annotation(&self) -> bool {
        matches!(
            self,
            RevitCategory::Rooms
                | RevitCategory::Levels
                | RevitCategory::Grids
                | RevitCategory::Dimensions
                | RevitCategory::TextNotes
                | RevitCategory::GenericAnnotation
        )
    }
}

impl fmt::Display for RevitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a layer's category was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSource {
    /// Caller-supplied override (matched case-sensitively by layer name)
    Explicit,
    /// Matched one of the built-in name patterns
    PatternMatch,
    /// Matched the configuration table of drafting conventions
    Configuration,
    /// Fell through to `GenericModel`
    Default,
}

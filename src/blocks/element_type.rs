//! Block element taxonomy
//!
//! The finer classification a recognized block carries; many-to-one mapped
//! onto the target categories.

use crate::classify::RevitCategory;
use std::fmt;

/// Element kind of a recognized block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockElementType {
    // Doors
    Door,
    DoubleDoor,
    SlidingDoor,
    FoldingDoor,
    RevolvingDoor,
    GarageDoor,
    // Windows
    Window,
    CasementWindow,
    DoubleHungWindow,
    SlidingWindow,
    FixedWindow,
    BayWindow,
    Skylight,
    // Structure
    Column,
    StructuralColumn,
    Beam,
    // Plumbing
    PlumbingFixture,
    Toilet,
    Sink,
    Bathtub,
    Shower,
    Urinal,
    Bidet,
    // Mechanical
    WaterHeater,
    Furnace,
    AirConditioner,
    AirHandler,
    Fan,
    CeilingFan,
    Pump,
    Boiler,
    Chiller,
    Thermostat,
    // Air terminals
    Diffuser,
    ReturnGrille,
    // Electrical
    ElectricalPanel,
    Outlet,
    Switch,
    LightFixture,
    // Safety and security
    SmokeDetector,
    FireAlarm,
    SecurityCamera,
    // Conveyance
    Elevator,
    // Furniture and casework
    Desk,
    Chair,
    TableFurniture,
    Bed,
    Sofa,
    Cabinet,
    Shelf,
    // Appliances
    Refrigerator,
    Stove,
    Dishwasher,
    // Site
    Tree,
    Shrub,
    Car,
    Person,
    // Fallback
    Unknown,
}

impl BlockElementType {
    /// The target category this element kind maps onto
    pub fn category(&self) -> RevitCategory {
        use BlockElementType::*;
        match self {
            Door | DoubleDoor | SlidingDoor | FoldingDoor | RevolvingDoor | GarageDoor => {
                RevitCategory::Doors
            }
            Window | CasementWindow | DoubleHungWindow | SlidingWindow | FixedWindow
            | BayWindow | Skylight => RevitCategory::Windows,
            Column => RevitCategory::Columns,
            StructuralColumn => RevitCategory::StructuralColumns,
            Beam => RevitCategory::StructuralFraming,
            PlumbingFixture | Toilet | Sink | Bathtub | Shower | Urinal | Bidet => {
                RevitCategory::PlumbingFixtures
            }
            WaterHeater | Furnace | AirConditioner | AirHandler | Fan | Pump | Boiler
            | Chiller | Thermostat => RevitCategory::MechanicalEquipment,
            Diffuser | ReturnGrille => RevitCategory::AirTerminals,
            ElectricalPanel => RevitCategory::ElectricalEquipment,
            Outlet | Switch => RevitCategory::ElectricalFixtures,
            LightFixture | CeilingFan => RevitCategory::LightingFixtures,
            SmokeDetector | FireAlarm => RevitCategory::FireProtection,
            SecurityCamera => RevitCategory::SecurityDevices,
            Desk | Chair | TableFurniture | Bed | Sofa => RevitCategory::Furniture,
            Cabinet | Shelf => RevitCategory::Casework,
            Tree | Shrub => RevitCategory::Planting,
            Car | Person => RevitCategory::Entourage,
            Elevator | Refrigerator | Stove | Dishwasher | Unknown => RevitCategory::GenericModel,
        }
    }

    /// Display name used when synthesizing type names
    pub fn as_str(&self) -> &'static str {
        use BlockElementType::*;
        match self {
            Door => "Single-Flush",
            DoubleDoor => "Double-Flush",
            SlidingDoor => "Sliding Door",
            FoldingDoor => "Folding Door",
            RevolvingDoor => "Revolving Door",
            GarageDoor => "Garage Door",
            Window => "Fixed Window",
            CasementWindow => "Casement Window",
            DoubleHungWindow => "Double-Hung Window",
            SlidingWindow => "Sliding Window",
            FixedWindow => "Fixed Window",
            BayWindow => "Bay Window",
            Skylight => "Skylight",
            Column => "Column",
            StructuralColumn => "Structural Column",
            Beam => "Beam",
            PlumbingFixture => "Plumbing Fixture",
            Toilet => "Toilet",
            Sink => "Sink",
            Bathtub => "Bathtub",
            Shower => "Shower",
            Urinal => "Urinal",
            Bidet => "Bidet",
            WaterHeater => "Water Heater",
            Furnace => "Furnace",
            AirConditioner => "Air Conditioner",
            AirHandler => "Air Handler",
            Fan => "Fan",
            CeilingFan => "Ceiling Fan",
            Pump => "Pump",
            Boiler => "Boiler",
            Chiller => "Chiller",
            Thermostat => "Thermostat",
            Diffuser => "Supply Diffuser",
            ReturnGrille => "Return Grille",
            ElectricalPanel => "Panelboard",
            Outlet => "Duplex Receptacle",
            Switch => "Switch",
            LightFixture => "Light Fixture",
            SmokeDetector => "Smoke Detector",
            FireAlarm => "Fire Alarm",
            SecurityCamera => "Security Camera",
            Elevator => "Elevator",
            Desk => "Desk",
            Chair => "Chair",
            TableFurniture => "Table",
            Bed => "Bed",
            Sofa => "Sofa",
            Cabinet => "Base Cabinet",
            Shelf => "Shelving",
            Refrigerator => "Refrigerator",
            Stove => "Range",
            Dishwasher => "Dishwasher",
            Tree => "Tree",
            Shrub => "Shrub",
            Car => "Vehicle",
            Person => "Person",
            Unknown => "Generic Block",
        }
    }
}

impl fmt::Display for BlockElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_variants_map_to_doors() {
        for t in [
            BlockElementType::Door,
            BlockElementType::DoubleDoor,
            BlockElementType::SlidingDoor,
            BlockElementType::GarageDoor,
        ] {
            assert_eq!(t.category(), RevitCategory::Doors);
        }
    }

    #[test]
    fn test_mep_mappings() {
        assert_eq!(
            BlockElementType::Diffuser.category(),
            RevitCategory::AirTerminals
        );
        assert_eq!(
            BlockElementType::Outlet.category(),
            RevitCategory::ElectricalFixtures
        );
        assert_eq!(
            BlockElementType::LightFixture.category(),
            RevitCategory::LightingFixtures
        );
        assert_eq!(
            BlockElementType::Boiler.category(),
            RevitCategory::MechanicalEquipment
        );
    }

    #[test]
    fn test_unknown_maps_to_generic() {
        assert_eq!(
            BlockElementType::Unknown.category(),
            RevitCategory::GenericModel
        );
    }
}

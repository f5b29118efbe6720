//! Layer-to-category classification
//!
//! Resolution runs in strict priority order: explicit caller overrides,
//! then the built-in name patterns, then the configuration table of AIA
//! drafting conventions, then the `GenericModel` default. The pattern list
//! is ordered and the first match wins; that order is part of the contract.

use super::{MappingSource, RevitCategory};
use crate::document::CadModel;
use crate::error::{ImportError, Result};
use crate::layer::CadLayer;
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// The resolved mapping for one layer
#[derive(Debug, Clone)]
pub struct LayerMapping {
    /// Original layer name as it appears in the drawing
    pub cad_layer_name: String,
    /// ACI color index of the layer
    pub cad_color: i16,
    /// Resolved target category
    pub category: RevitCategory,
    /// How the category was decided
    pub source: MappingSource,
    /// Layer visibility (on and not frozen)
    pub is_visible: bool,
    /// Whether entities on this layer take part in the import
    pub should_import: bool,
}

/// Ordered multilingual name patterns; first match wins
///
/// Longer or more specific terms come before generic ones ("curtain" before
/// "wall", "lite" before "elec").
static LAYER_PATTERNS: Lazy<Vec<(Regex, RevitCategory)>> = Lazy::new(|| {
    const TABLE: &[(&str, RevitCategory)] = &[
        ("curtain|vorhang", RevitCategory::CurtainWalls),
        ("wall|wand|mur|pared|muro", RevitCategory::Walls),
        (
            "door|tuer|porte|puerta|porta|(^|[^a-z0-9])dr([^a-z0-9]|$)",
            RevitCategory::Doors,
        ),
        ("window|fenster|fenetre|ventana|finestra", RevitCategory::Windows),
        ("column|colonne|columna|stuetze|pilar", RevitCategory::Columns),
        ("beam|girder|traeger|poutre|viga", RevitCategory::StructuralFraming),
        ("found|footing|fundament|cimient", RevitCategory::StructuralFoundations),
        ("floor|slab|boden|plancher|piso", RevitCategory::Floors),
        ("ceiling|decke|plafond|techo", RevitCategory::Ceilings),
        ("roof|dach|toit|tejado", RevitCategory::Roofs),
        ("stair|treppe|escalier|escalera", RevitCategory::Stairs),
        ("handrail|rail|gelaender|barandilla", RevitCategory::Railings),
        ("ramp|rampe|rampa", RevitCategory::Ramps),
        ("furn|moebel|meuble|mueble", RevitCategory::Furniture),
        ("cabinet|millwork|casework|schrank|armoire", RevitCategory::Casework),
        (
            "plumb|sanit|fixt|toilet|lavat|sink|bath|(^|[^a-z0-9])wc([^a-z0-9]|$)",
            RevitCategory::PlumbingFixtures,
        ),
        ("duct|gaine|conducto", RevitCategory::Ducts),
        ("pipe|piping|rohr|tuyau|tuberia", RevitCategory::Pipes),
        ("light|lite|leucht|lumin|lampe", RevitCategory::LightingFixtures),
        ("power|outlet|recep|steckdose|prise", RevitCategory::ElectricalFixtures),
        ("hvac|mech|equip", RevitCategory::MechanicalEquipment),
        ("elec|elektro|electr", RevitCategory::ElectricalEquipment),
        ("diffus|grille|register|terminal", RevitCategory::AirTerminals),
        ("cable|tray", RevitCategory::CableTrays),
        ("conduit", RevitCategory::Conduits),
        ("fire|sprink|alarm", RevitCategory::FireProtection),
        ("data|comm|tele", RevitCategory::CommunicationDevices),
        ("secur|cctv|camera", RevitCategory::SecurityDevices),
        ("parking|stellplatz", RevitCategory::Parking),
        ("plant|tree|baum|arbre|landscap", RevitCategory::Planting),
        ("topo|contour|hoehen", RevitCategory::Topography),
        ("site|terrain|gelaende", RevitCategory::Site),
        (
            "room|raum|piece|habitacion|space|zone",
            RevitCategory::Rooms,
        ),
        ("level|ebene|niveau|nivel|storey", RevitCategory::Levels),
        ("grid|axis|achse|raster", RevitCategory::Grids),
        ("dim|bemass|cote|cota", RevitCategory::Dimensions),
        ("text|anno|note|label|beschrift", RevitCategory::TextNotes),
    ];

    TABLE
        .iter()
        .map(|(pattern, category)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("invalid built-in layer pattern");
            (regex, *category)
        })
        .collect()
});

/// AIA layer naming conventions, matched case-insensitively and exactly
static AIA_LAYER_MAP: Lazy<AHashMap<&'static str, RevitCategory>> = Lazy::new(|| {
    AHashMap::from_iter([
        ("A-WALL", RevitCategory::Walls),
        ("A-WALL-PRHT", RevitCategory::Walls),
        ("A-WALL-FULL", RevitCategory::Walls),
        ("A-GLAZ", RevitCategory::Windows),
        ("A-GLAZ-CURT", RevitCategory::CurtainWalls),
        ("A-DOOR", RevitCategory::Doors),
        ("A-FLOR", RevitCategory::Floors),
        ("A-FLOR-OTLN", RevitCategory::Floors),
        ("A-CLNG", RevitCategory::Ceilings),
        ("A-ROOF", RevitCategory::Roofs),
        ("A-COLS", RevitCategory::Columns),
        ("A-FURN", RevitCategory::Furniture),
        ("A-CASE", RevitCategory::Casework),
        ("A-EQPM", RevitCategory::MechanicalEquipment),
        ("A-AREA", RevitCategory::Rooms),
        ("A-GRID", RevitCategory::Grids),
        ("A-ANNO", RevitCategory::GenericAnnotation),
        ("A-ANNO-TEXT", RevitCategory::TextNotes),
        ("A-ANNO-DIMS", RevitCategory::Dimensions),
        ("S-COLS", RevitCategory::StructuralColumns),
        ("S-BEAM", RevitCategory::StructuralFraming),
        ("S-FNDN", RevitCategory::StructuralFoundations),
        ("S-SLAB", RevitCategory::Floors),
        ("S-GRID", RevitCategory::Grids),
        ("M-DUCT", RevitCategory::Ducts),
        ("M-HVAC", RevitCategory::MechanicalEquipment),
        ("M-PIPE", RevitCategory::Pipes),
        ("M-DIFF", RevitCategory::AirTerminals),
        ("P-FIXT", RevitCategory::PlumbingFixtures),
        ("P-SANR", RevitCategory::PlumbingFixtures),
        ("P-PIPE", RevitCategory::Pipes),
        ("E-LITE", RevitCategory::LightingFixtures),
        ("E-POWR", RevitCategory::ElectricalFixtures),
        ("E-EQPM", RevitCategory::ElectricalEquipment),
        ("E-COMM", RevitCategory::CommunicationDevices),
        ("F-SPKL", RevitCategory::FireProtection),
        ("C-TOPO", RevitCategory::Topography),
        ("C-PKNG", RevitCategory::Parking),
        ("L-PLNT", RevitCategory::Planting),
        ("L-SITE", RevitCategory::Site),
    ])
});

/// Resolves every layer to a `(category, source)` pair and decides whether
/// its entities take part in the import
#[derive(Debug, Default)]
pub struct LayerClassifier {
    /// Caller overrides, matched case-sensitively by the original name
    explicit: IndexMap<String, RevitCategory>,
    /// Import entities on invisible (off or frozen) layers too
    import_invisible: bool,
    /// Restrict the import to these categories; empty means all
    category_filter: AHashSet<RevitCategory>,
    /// A layer must match at least one of these to import; empty means all
    include_patterns: Vec<Regex>,
    /// A layer matching any of these never imports
    exclude_patterns: Vec<Regex>,
}

impl LayerClassifier {
    /// Create a classifier with no overrides and no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit layer-name overrides
    pub fn set_explicit_mappings(&mut self, mappings: IndexMap<String, RevitCategory>) {
        self.explicit = mappings;
    }

    /// Also import entities on invisible layers
    pub fn set_import_invisible(&mut self, import_invisible: bool) {
        self.import_invisible = import_invisible;
    }

    /// Restrict the import to a set of categories (empty = all)
    pub fn set_category_filter(&mut self, categories: impl IntoIterator<Item = RevitCategory>) {
        self.category_filter = categories.into_iter().collect();
    }

    /// Compile the caller's include/exclude layer-name regexes
    ///
    /// Patterns are case-insensitive. An invalid pattern is a hard error so
    /// the caller learns about the typo rather than silently importing
    /// everything.
    pub fn set_name_filters(&mut self, include: &[String], exclude: &[String]) -> Result<()> {
        self.include_patterns = compile_filters(include)?;
        self.exclude_patterns = compile_filters(exclude)?;
        Ok(())
    }

    /// Resolve a layer name to its category and mapping source
    pub fn resolve_category(&self, layer_name: &str) -> (RevitCategory, MappingSource) {
        // 1. Explicit overrides (case-sensitive, original name as given)
        if let Some(category) = self.explicit.get(layer_name) {
            return (*category, MappingSource::Explicit);
        }

        // 2. Ordered name patterns, first match wins
        for (regex, category) in LAYER_PATTERNS.iter() {
            if regex.is_match(layer_name) {
                return (*category, MappingSource::PatternMatch);
            }
        }

        // 3. Drafting-convention table, exact case-insensitive match
        if let Some(category) = AIA_LAYER_MAP.get(layer_name.to_uppercase().as_str()) {
            return (*category, MappingSource::Configuration);
        }

        // 4. Default
        (RevitCategory::GenericModel, MappingSource::Default)
    }

    /// Classify a single layer
    pub fn classify(&self, layer: &CadLayer) -> LayerMapping {
        let (category, source) = self.resolve_category(&layer.name);
        let is_visible = layer.is_visible();

        let should_import = (is_visible || self.import_invisible)
            && (self.category_filter.is_empty() || self.category_filter.contains(&category))
            && (self.include_patterns.is_empty()
                || self.include_patterns.iter().any(|r| r.is_match(&layer.name)))
            && !self.exclude_patterns.iter().any(|r| r.is_match(&layer.name));

        LayerMapping {
            cad_layer_name: layer.name.clone(),
            cad_color: layer.color,
            category,
            source,
            is_visible,
            should_import,
        }
    }

    /// Classify every layer of a model, in layer-table order
    pub fn classify_model(&self, model: &CadModel) -> Vec<LayerMapping> {
        model.layers().map(|layer| self.classify(layer)).collect()
    }
}

fn compile_filters(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| ImportError::Custom(format!("invalid layer filter '{}': {}", p, e)))
        })
        .collect()
}

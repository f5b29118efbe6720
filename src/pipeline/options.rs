//! Import options and engine settings

use crate::classify::RevitCategory;
use indexmap::IndexMap;

/// Per-import behavior switches
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Value of the "Unconnected Height" wall parameter
    pub default_wall_height: f64,
    /// Also import entities on off or frozen layers
    pub import_invisible_layers: bool,
    /// Emit elements for text entities
    pub import_text: bool,
    /// Emit elements for dimension entities
    pub import_dimensions: bool,
    /// Drop elements with repeated geometry hashes
    pub remove_duplicates: bool,
    /// Merge connected collinear walls
    pub join_walls: bool,
    /// Host door/window openings into the nearest wall
    pub insert_openings_into_walls: bool,
    /// Report degenerate geometry as warnings
    pub validate_geometry: bool,
    /// Restrict the import to these categories; empty means all
    pub category_filter: Vec<RevitCategory>,
    /// A layer must match one of these regexes to import; empty means all
    pub layer_name_filter: Vec<String>,
    /// A layer matching any of these regexes never imports
    pub exclude_layer_patterns: Vec<String>,
    /// Caller-supplied layer-to-category overrides (case-sensitive names)
    pub explicit_layer_mappings: IndexMap<String, RevitCategory>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_wall_height: 3000.0,
            import_invisible_layers: false,
            import_text: true,
            import_dimensions: true,
            remove_duplicates: true,
            join_walls: true,
            insert_openings_into_walls: true,
            validate_geometry: true,
            category_filter: Vec::new(),
            layer_name_filter: Vec::new(),
            exclude_layer_patterns: Vec::new(),
            explicit_layer_mappings: IndexMap::new(),
        }
    }
}

/// Engine-wide tolerances, all in the output unit system
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Uniform scalar applied to every coordinate and length
    pub unit_conversion_factor: f64,
    /// Files larger than this are rejected before parsing
    pub max_file_size_bytes: u64,
    /// Lines shorter than this produce no geometry
    pub min_line_length: f64,
    /// Circles and arcs smaller than this produce no geometry
    pub min_radius: f64,
    /// Elements below this bounding-box volume are reported
    pub min_element_volume: f64,
    /// Maximum endpoint distance for wall joining
    pub join_tolerance: f64,
    /// Maximum center-to-wall distance for opening hosting
    pub opening_host_tolerance: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            unit_conversion_factor: 1.0,
            max_file_size_bytes: 500 * 1024 * 1024,
            min_line_length: 1.0,
            min_radius: 0.5,
            min_element_volume: 1.0,
            join_tolerance: 10.0,
            opening_host_tolerance: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_defaults() {
        let options = ImportOptions::default();
        assert_eq!(options.default_wall_height, 3000.0);
        assert!(!options.import_invisible_layers);
        assert!(options.import_text);
        assert!(options.import_dimensions);
        assert!(options.remove_duplicates);
        assert!(options.join_walls);
        assert!(options.insert_openings_into_walls);
        assert!(options.validate_geometry);
        assert!(options.category_filter.is_empty());
    }

    #[test]
    fn test_setting_defaults() {
        let settings = ImportSettings::default();
        assert_eq!(settings.unit_conversion_factor, 1.0);
        assert_eq!(settings.max_file_size_bytes, 524_288_000);
        assert_eq!(settings.min_line_length, 1.0);
        assert_eq!(settings.min_radius, 0.5);
        assert_eq!(settings.join_tolerance, 10.0);
        assert_eq!(settings.opening_host_tolerance, 150.0);
    }
}

//! Post-processing of converted elements
//!
//! Four passes, each gated by an import option: duplicate removal keyed on
//! the deterministic geometry hash, merging of connected collinear walls,
//! hosting of door/window openings into the nearest wall, and geometry
//! validation. A final pass emits diagnostic warnings.

use crate::classify::{LayerMapping, MappingSource, RevitCategory};
use crate::convert::ConvertedElement;
use crate::geometry::{ElementGeometry, LineGeometry};
use ahash::AHashSet;
use std::sync::Arc;

/// Two directions are collinear when |d1.d2| exceeds this
const COLLINEARITY_TOLERANCE: f64 = 0.999;

/// Runs the optional cleanup passes over the converted elements
#[derive(Debug, Clone)]
pub struct PostProcessor {
    /// Maximum endpoint distance for two walls to join
    join_tolerance: f64,
    /// Maximum center-to-wall distance for an opening to host
    opening_host_tolerance: f64,
    /// Bounding-box volume below which an element is reported
    min_element_volume: f64,
}

impl PostProcessor {
    /// Create a post-processor with the given tolerances (output units)
    pub fn new(join_tolerance: f64, opening_host_tolerance: f64, min_element_volume: f64) -> Self {
        Self {
            join_tolerance,
            opening_host_tolerance,
            min_element_volume,
        }
    }

    /// Drop elements whose geometry hash repeats, keeping first occurrences.
    /// Returns the number of elements removed.
    pub fn remove_duplicates(&self, elements: &mut Vec<ConvertedElement>) -> usize {
        let before = elements.len();
        let mut seen: AHashSet<String> = AHashSet::with_capacity(before);
        elements.retain(|element| seen.insert(element.geometry.hash_string()));
        before - elements.len()
    }

    /// Merge connected collinear wall lines. Returns the number of walls
    /// absorbed into merges (input count minus output count).
    pub fn join_walls(&self, elements: &mut Vec<ConvertedElement>) -> usize {
        // Candidate walls: wall category with line geometry
        let wall_lines: Vec<(usize, LineGeometry)> = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.category == RevitCategory::Walls)
            .filter_map(|(i, e)| match e.geometry.as_ref() {
                ElementGeometry::Line(line) => Some((i, *line)),
                _ => None,
            })
            .collect();

        if wall_lines.len() < 2 {
            return 0;
        }

        // Grow groups transitively: a wall joins a group when it is
        // collinear with and endpoint-adjacent to any member
        let mut grouped = vec![false; wall_lines.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for seed in 0..wall_lines.len() {
            if grouped[seed] {
                continue;
            }
            grouped[seed] = true;
            let mut group = vec![seed];

            loop {
                let mut added = false;
                for candidate in 0..wall_lines.len() {
                    if grouped[candidate] {
                        continue;
                    }
                    let joinable = group.iter().any(|&member| {
                        self.walls_joinable(&wall_lines[member].1, &wall_lines[candidate].1)
                    });
                    if joinable {
                        grouped[candidate] = true;
                        group.push(candidate);
                        added = true;
                    }
                }
                if !added {
                    break;
                }
            }
            groups.push(group);
        }

        // Merge each multi-wall group into its first member; drop the rest
        let mut removed: AHashSet<usize> = AHashSet::new();
        let mut joined = 0;
        for group in &groups {
            if group.len() < 2 {
                continue;
            }
            joined += group.len() - 1;

            let (rep_index, rep_line) = wall_lines[group[0]];
            let direction = rep_line.direction();
            let origin = rep_line.start;

            // Span the projection extremes along the shared direction
            let mut t_min = f64::MAX;
            let mut t_max = f64::MIN;
            for &member in group {
                let line = wall_lines[member].1;
                for point in [line.start, line.end] {
                    let t = (point - origin).dot(&direction);
                    t_min = t_min.min(t);
                    t_max = t_max.max(t);
                }
            }

            let merged = LineGeometry::new(origin + direction * t_min, origin + direction * t_max);
            elements[rep_index].geometry = Arc::new(ElementGeometry::Line(merged));

            for &member in &group[1..] {
                removed.insert(wall_lines[member].0);
            }
        }

        if !removed.is_empty() {
            let mut index = 0;
            elements.retain(|_| {
                let keep = !removed.contains(&index);
                index += 1;
                keep
            });
        }
        joined
    }

    fn walls_joinable(&self, a: &LineGeometry, b: &LineGeometry) -> bool {
        let d1 = a.direction();
        let d2 = b.direction();
        if d1.dot(&d2).abs() <= COLLINEARITY_TOLERANCE {
            return false;
        }
        // At least one endpoint pair within tolerance
        [a.start, a.end].iter().any(|p| {
            [b.start, b.end]
                .iter()
                .any(|q| p.distance(q) <= self.join_tolerance)
        })
    }

    /// Host each door/window into the nearest wall line within tolerance.
    /// Returns the number of openings hosted.
    pub fn insert_openings(&self, elements: &mut [ConvertedElement]) -> usize {
        let walls: Vec<(String, LineGeometry)> = elements
            .iter()
            .filter(|e| e.category == RevitCategory::Walls)
            .filter_map(|e| match e.geometry.as_ref() {
                ElementGeometry::Line(line) => Some((e.id.clone(), *line)),
                _ => None,
            })
            .collect();

        if walls.is_empty() {
            return 0;
        }

        let mut hosted = 0;
        for element in elements.iter_mut() {
            if !matches!(
                element.category,
                RevitCategory::Doors | RevitCategory::Windows
            ) {
                continue;
            }

            let center = element.geometry.center();
            let nearest = walls
                .iter()
                .map(|(id, line)| (id, line.distance_to_point(center)))
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((wall_id, distance)) = nearest {
                if distance <= self.opening_host_tolerance {
                    element.host_element_id = Some(wall_id.clone());
                    hosted += 1;
                }
            }
        }
        hosted
    }

    /// Collect geometry issues as warnings; elements are never removed here
    pub fn validate_geometry(&self, elements: &[ConvertedElement]) -> Vec<String> {
        let mut warnings = Vec::new();
        for element in elements {
            for issue in element.geometry.validate() {
                warnings.push(format!("Element {}: {}", element.id, issue));
            }
        }
        warnings
    }

    /// Diagnostic warnings: imported layers that fell through to the
    /// default category, and elements below the minimum volume
    pub fn generate_warnings(
        &self,
        elements: &[ConvertedElement],
        mappings: &[LayerMapping],
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        for mapping in mappings {
            if mapping.should_import && mapping.source == MappingSource::Default {
                warnings.push(format!(
                    "Layer '{}' has no category mapping; imported as Generic Models",
                    mapping.cad_layer_name
                ));
            }
        }

        let below_volume = elements
            .iter()
            .filter(|e| e.geometry.bounding_box().volume() < self.min_element_volume)
            .count();
        if below_volume > 0 {
            warnings.push(format!(
                "{} element(s) have a bounding-box volume below {}",
                below_volume, self.min_element_volume
            ));
        }

        warnings
    }
}

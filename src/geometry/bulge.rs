//! Bulge-to-arc expansion
//!
//! A DXF bulge on a polyline segment from A to B is tan(theta/4), where
//! theta is the included arc angle, signed positive for counter-clockwise.
//! The expansion is planar: the perpendicular used to locate the center has
//! no Z component, which is adequate because a polyline carries a single
//! elevation.

use super::element::ArcSegment;
use crate::types::Point3D;

/// Bulges below this magnitude are treated as straight segments
pub const BULGE_EPSILON: f64 = 1e-4;

/// Expand a bulge value into an arc segment
///
/// Derivation: theta = 4 atan(b); radius = chord / (2 sin(|theta|/2));
/// the center sits at the chord midpoint offset along the chord
/// perpendicular by the apothem (radius minus sagitta), on the side the
/// bulge sign selects.
pub fn bulge_to_arc(start: Point3D, end: Point3D, bulge: f64) -> ArcSegment {
    let theta = 4.0 * bulge.atan();
    let chord_vec = end - start;
    let chord = chord_vec.length();
    let radius = chord / (2.0 * (theta.abs() / 2.0).sin());

    let midpoint = start.midpoint(&end);
    let dir = chord_vec.normalize();
    let perpendicular = if bulge > 0.0 {
        dir.perpendicular_ccw()
    } else {
        dir.perpendicular_cw()
    };

    let sagitta = bulge.abs() * chord / 2.0;
    let apothem = radius - sagitta;
    let offset = if bulge > 0.0 { apothem } else { -apothem };
    let center = midpoint + perpendicular * offset;

    ArcSegment {
        start_point: start,
        end_point: end,
        center,
        radius,
        is_clockwise: bulge < 0.0,
    }
}

/// The included arc angle, in radians, encoded by a bulge
pub fn included_angle(bulge: f64) -> f64 {
    4.0 * bulge.atan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_half_circle_bulge() {
        // bulge 1 = tan(pi/4): a half circle
        let arc = bulge_to_arc(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            1.0,
        );
        assert!((included_angle(1.0) - PI).abs() < EPS);
        assert!((arc.radius - 5.0).abs() < EPS);
        // Apothem is zero, so the center lies on the chord midpoint
        assert!((arc.center.x - 5.0).abs() < EPS);
        assert!(arc.center.y.abs() < EPS);
        assert!(!arc.is_clockwise);
    }

    #[test]
    fn test_quarter_circle_bulge() {
        // bulge tan(pi/8): a 90-degree arc
        let bulge = (PI / 8.0).tan();
        let arc = bulge_to_arc(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            bulge,
        );
        assert!((included_angle(bulge) - FRAC_PI_2).abs() < EPS);
        let expected_radius = 10.0 / (2.0 * (FRAC_PI_2 / 2.0).sin());
        assert!((arc.radius - expected_radius).abs() < 1e-6);
        // Counter-clockwise sweep puts the center on the left of A->B
        assert!((arc.center.x - 5.0).abs() < EPS);
        assert!((arc.center.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_bulge_is_clockwise() {
        let bulge = -(PI / 8.0).tan();
        let arc = bulge_to_arc(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            bulge,
        );
        assert!(arc.is_clockwise);
        // Mirrored center for the mirrored sweep
        assert!((arc.center.x - 5.0).abs() < EPS);
        assert!((arc.center.y + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_endpoints_on_arc() {
        // Both endpoints must sit on the circle for any bulge
        for &bulge in &[0.1, 0.35, 0.7, 1.0, -0.5, -1.3, 2.0] {
            let start = Point3D::new(1.0, 2.0, 0.0);
            let end = Point3D::new(8.0, -3.0, 0.0);
            let arc = bulge_to_arc(start, end, bulge);

            let d_start = arc.center.distance(&start);
            let d_end = arc.center.distance(&end);
            assert!(
                (d_start - arc.radius).abs() < 1e-9,
                "start off circle for bulge {}",
                bulge
            );
            assert!(
                (d_end - arc.radius).abs() < 1e-9,
                "end off circle for bulge {}",
                bulge
            );
        }
    }
}

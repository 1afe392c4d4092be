//! # Lagrange points of a two-body system
//!
//! The five equilibrium points are recomputed on every request from the
//! current positions of the configured pair; nothing here is simulation
//! state. Collinear points use the mass-ratio cube-root approximation,
//! triangular points the exact equilateral construction.

use nalgebra::{Rotation3, Vector3};

use crate::constants::RADEG;
use crate::orrery_errors::OrreryError;

use super::body::CelestialBody;

/// The five named Lagrange points, meters, in the frame of the body pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangePointSet {
    /// Between the two bodies, near the secondary
    pub l1: Vector3<f64>,
    /// Beyond the secondary
    pub l2: Vector3<f64>,
    /// Opposite the secondary, beyond the primary
    pub l3: Vector3<f64>,
    /// Leading triangular point, 60° ahead of the secondary
    pub l4: Vector3<f64>,
    /// Trailing triangular point, 60° behind the secondary
    pub l5: Vector3<f64>,
}

/// Compute the Lagrange points of a primary/secondary pair from their
/// current positions.
///
/// L1/L2 sit at the Hill-sphere distance `d·∛(m₂/(3·m₁))` inside/outside the
/// secondary; L3 sits opposite the secondary at `d·(1 + 5/12·μ)` from the
/// primary. L4/L5 are the separation vector rotated ±60° about the orbital
/// normal, so each forms an equilateral triangle with the pair.
///
/// Coincident bodies have no defined geometry and are reported as a
/// degenerate-pair error.
pub fn lagrange_points(
    primary: &CelestialBody,
    secondary: &CelestialBody,
) -> Result<LagrangePointSet, OrreryError> {
    let separation = secondary.position - primary.position;
    let distance = separation.norm();
    if distance == 0.0 {
        return Err(OrreryError::DegenerateBodyPair(primary.id, secondary.id));
    }

    let direction = separation / distance;
    let hill_ratio = (secondary.mass / (3.0 * primary.mass)).cbrt();
    let mass_fraction = secondary.mass / (primary.mass + secondary.mass);

    let l1 = primary.position + direction * distance * (1.0 - hill_ratio);
    let l2 = primary.position + direction * distance * (1.0 + hill_ratio);
    let l3 = primary.position - direction * distance * (1.0 + 5.0 / 12.0 * mass_fraction);

    // Rotate the full separation vector about the orbital-plane normal so the
    // triangular points stay equilateral with both bodies.
    let normal = orbital_normal(primary, secondary);
    let l4 = primary.position + Rotation3::from_axis_angle(&normal, 60.0 * RADEG) * separation;
    let l5 = primary.position + Rotation3::from_axis_angle(&normal, -60.0 * RADEG) * separation;

    Ok(LagrangePointSet { l1, l2, l3, l4, l5 })
}

/// Unit normal of the pair's orbital plane, from the secondary's relative
/// position and velocity; falls back to the ecliptic normal when the relative
/// motion is degenerate (e.g. at seeding time with zero velocity).
fn orbital_normal(
    primary: &CelestialBody,
    secondary: &CelestialBody,
) -> nalgebra::Unit<Vector3<f64>> {
    let relative_position = secondary.position - primary.position;
    let relative_velocity = secondary.velocity - primary.velocity;
    let angular = relative_position.cross(&relative_velocity);
    nalgebra::Unit::try_new(angular, 1e-12).unwrap_or_else(Vector3::z_axis)
}

#[cfg(test)]
mod lagrange_test {
    use super::*;
    use crate::constants::SolarBody;
    use crate::nbody::body::CelestialBody;

    fn earth_moon_pair() -> (CelestialBody, CelestialBody) {
        let earth = CelestialBody::new(SolarBody::Earth, false);
        let moon = CelestialBody::new(SolarBody::Moon, false).with_state(
            Vector3::new(3.844e8, 0.0, 0.0),
            Vector3::new(0.0, 1_022.0, 0.0),
        );
        (earth, moon)
    }

    #[test]
    fn test_l1_between_bodies() {
        let (earth, moon) = earth_moon_pair();
        let points = lagrange_points(&earth, &moon).unwrap();

        // L1 lies strictly between the two bodies, closer to the Moon
        assert!(points.l1.x > earth.position.x);
        assert!(points.l1.x < moon.position.x);
        let to_moon = (points.l1 - moon.position).norm();
        let to_earth = (points.l1 - earth.position).norm();
        assert!(to_moon < to_earth);
    }

    #[test]
    fn test_l2_beyond_secondary_l3_opposite() {
        let (earth, moon) = earth_moon_pair();
        let points = lagrange_points(&earth, &moon).unwrap();

        assert!(points.l2.x > moon.position.x);
        assert!(points.l3.x < earth.position.x);
    }

    #[test]
    fn test_triangular_points_equilateral() {
        let (earth, moon) = earth_moon_pair();
        let points = lagrange_points(&earth, &moon).unwrap();
        let d = (moon.position - earth.position).norm();

        for point in [points.l4, points.l5] {
            let side_primary = (point - earth.position).norm();
            let side_secondary = (point - moon.position).norm();
            assert!((side_primary - d).abs() < 1e-3);
            assert!((side_secondary - d).abs() < 1e-3);
        }
        // leading and trailing points are distinct and mirrored
        assert!((points.l4.y + points.l5.y).abs() < 1e-3);
        assert!(points.l4.y.abs() > 1e7);
    }

    #[test]
    fn test_coincident_pair_rejected() {
        let earth = CelestialBody::new(SolarBody::Earth, false);
        let moon = CelestialBody::new(SolarBody::Moon, false);
        assert_eq!(
            lagrange_points(&earth, &moon),
            Err(OrreryError::DegenerateBodyPair(
                SolarBody::Earth,
                SolarBody::Moon
            ))
        );
    }

    #[test]
    fn test_hill_distance_scale() {
        // Earth–Moon L1 sits roughly 15% of the separation from the Moon
        let (earth, moon) = earth_moon_pair();
        let points = lagrange_points(&earth, &moon).unwrap();
        let d = (moon.position - earth.position).norm();
        let fraction = (points.l1 - moon.position).norm() / d;
        assert!((0.1..0.2).contains(&fraction), "fraction {fraction}");
    }
}

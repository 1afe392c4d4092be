//! # Pairwise gravity and relativistic correction
//!
//! Newtonian forces are accumulated over every unordered pair with Newton's
//! third law, so each pair is computed once. The per-pair computation is
//! independent and the accumulation is associative, which keeps the loop
//! trivially data-parallel for a future parallel backend.

use itertools::Itertools;
use nalgebra::Vector3;

use crate::constants::{SolarBody, GRAVITATIONAL_CONSTANT, VLIGHT};

use super::body::BodySet;

/// Which bodies receive the relativistic precession correction, and around
/// which primary it is evaluated.
///
/// The correction is only observable at simulation precision for the innermost
/// planet, so the default corrects Mercury alone. This is a domain convention,
/// not a limitation of the formula.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativisticConfig {
    pub primary: SolarBody,
    pub corrected: Vec<SolarBody>,
}

impl Default for RelativisticConfig {
    fn default() -> Self {
        Self {
            primary: SolarBody::Sun,
            corrected: vec![SolarBody::Mercury],
        }
    }
}

impl RelativisticConfig {
    /// No correction at all, e.g. for pure-Newtonian test setups.
    pub fn disabled() -> Self {
        Self {
            primary: SolarBody::Sun,
            corrected: Vec::new(),
        }
    }
}

/// Zero every force accumulator. Forces are never carried over between steps.
pub fn zero_forces(bodies: &mut BodySet) {
    for body in bodies.iter_mut() {
        body.force = Vector3::zeros();
    }
}

/// Accumulate Newtonian gravity over every unordered pair.
///
/// For each pair the force magnitude is `G·m₁·m₂ / r²` along the unit
/// separation vector, added with opposite signs to the two accumulators.
/// Exactly coincident bodies are a degenerate, non-physical edge case and
/// contribute zero force.
pub fn accumulate_forces(bodies: &mut BodySet) {
    let slice = bodies.as_mut_slice();
    for (i, j) in (0..slice.len()).tuple_combinations() {
        let separation = slice[j].position - slice[i].position;
        let distance_sq = separation.norm_squared();
        if distance_sq == 0.0 {
            continue;
        }
        let distance = distance_sq.sqrt();
        let magnitude = GRAVITATIONAL_CONSTANT * slice[i].mass * slice[j].mass / distance_sq;
        let force = separation * (magnitude / distance);
        slice[i].force += force;
        slice[j].force -= force;
    }
}

/// Scale the accumulated force of each configured body by the relativistic
/// precession factor `1 + (3·Rs)/(2r)·(1 − β²)`.
///
/// `Rs` is the primary's Schwarzschild radius, `r` the separation from the
/// primary, `β = v/c`. The factor amplifies perihelion precession; bodies
/// missing from the system (or a missing primary) are skipped without
/// aborting the step.
pub fn apply_relativistic_correction(bodies: &mut BodySet, config: &RelativisticConfig) {
    let Some(primary) = bodies.get(config.primary) else {
        return;
    };
    let primary_position = primary.position;
    let schwarzschild_radius =
        2.0 * GRAVITATIONAL_CONSTANT * primary.mass / (VLIGHT * VLIGHT);

    for &id in &config.corrected {
        let Some(body) = bodies.get_mut(id) else {
            continue;
        };
        let r = (body.position - primary_position).norm();
        if r == 0.0 {
            continue;
        }
        let beta_sq = body.velocity.norm_squared() / (VLIGHT * VLIGHT);
        let factor = 1.0 + (3.0 * schwarzschild_radius) / (2.0 * r) * (1.0 - beta_sq);
        body.force *= factor;
    }
}

#[cfg(test)]
mod gravity_test {
    use super::*;
    use crate::constants::AU_M;
    use crate::nbody::body::CelestialBody;

    fn sun_earth_set() -> BodySet {
        let mut set = BodySet::new();
        set.insert(CelestialBody::new(SolarBody::Sun, true));
        set.insert(
            CelestialBody::new(SolarBody::Earth, false)
                .with_state(Vector3::new(AU_M, 0.0, 0.0), Vector3::new(0.0, 29_780.0, 0.0)),
        );
        set
    }

    #[test]
    fn test_pair_forces_opposite() {
        let mut set = sun_earth_set();
        zero_forces(&mut set);
        accumulate_forces(&mut set);

        let sun = set.get(SolarBody::Sun).unwrap();
        let earth = set.get(SolarBody::Earth).unwrap();
        assert_eq!(sun.force, -earth.force);
        // attraction points from Earth toward the Sun
        assert!(earth.force.x < 0.0);
    }

    #[test]
    fn test_sun_earth_magnitude() {
        let mut set = sun_earth_set();
        zero_forces(&mut set);
        accumulate_forces(&mut set);

        let expected = GRAVITATIONAL_CONSTANT * SolarBody::Sun.mass() * SolarBody::Earth.mass()
            / (AU_M * AU_M);
        let actual = set.get(SolarBody::Earth).unwrap().force.norm();
        assert!((actual - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_coincident_bodies_zero_force() {
        let mut set = BodySet::new();
        set.insert(CelestialBody::new(SolarBody::Earth, false));
        set.insert(CelestialBody::new(SolarBody::Mars, false));

        zero_forces(&mut set);
        accumulate_forces(&mut set);

        assert_eq!(set.get(SolarBody::Earth).unwrap().force, Vector3::zeros());
        assert_eq!(set.get(SolarBody::Mars).unwrap().force, Vector3::zeros());
    }

    #[test]
    fn test_relativistic_factor_amplifies() {
        let mut set = BodySet::new();
        set.insert(CelestialBody::new(SolarBody::Sun, true));
        set.insert(CelestialBody::new(SolarBody::Mercury, false).with_state(
            Vector3::new(0.387 * AU_M, 0.0, 0.0),
            Vector3::new(0.0, 47_870.0, 0.0),
        ));

        zero_forces(&mut set);
        accumulate_forces(&mut set);
        let newtonian = set.get(SolarBody::Mercury).unwrap().force.norm();

        apply_relativistic_correction(&mut set, &RelativisticConfig::default());
        let corrected = set.get(SolarBody::Mercury).unwrap().force.norm();

        // Tiny but strictly amplifying: factor − 1 ≈ 3·Rs/(2r) ≈ 7.7e-8
        assert!(corrected > newtonian);
        assert!((corrected / newtonian - 1.0) < 1e-6);
    }

    #[test]
    fn test_correction_skips_missing_body() {
        let mut set = sun_earth_set();
        zero_forces(&mut set);
        accumulate_forces(&mut set);
        let before = set.get(SolarBody::Earth).unwrap().force;

        // Mercury is configured but absent; nothing changes, nothing aborts
        apply_relativistic_correction(&mut set, &RelativisticConfig::default());
        assert_eq!(set.get(SolarBody::Earth).unwrap().force, before);
    }

    #[test]
    fn test_forces_rebuilt_from_scratch() {
        let mut set = sun_earth_set();
        zero_forces(&mut set);
        accumulate_forces(&mut set);
        let first = set.get(SolarBody::Earth).unwrap().force;

        zero_forces(&mut set);
        accumulate_forces(&mut set);
        assert_eq!(set.get(SolarBody::Earth).unwrap().force, first);
    }
}

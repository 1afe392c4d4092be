//! # Self-check against known reference values
//!
//! Sanity-checks the running system against textbook numbers (Earth's orbital
//! speed and surface gravity) and reports pass/fail per check. Failures are
//! reported, never thrown: they indicate parameter drift or the documented
//! approximation limits, not programming errors.

use super::NBodySystem;
use crate::constants::SolarBody;

/// Expected mean orbital speed of Earth, m/s.
pub const EARTH_ORBITAL_SPEED: f64 = 29_780.0;

/// Expected surface gravitational acceleration of Earth, m/s².
pub const EARTH_SURFACE_GRAVITY: f64 = 9.81;

/// Relative tolerance of the reference comparisons.
pub const REFERENCE_TOLERANCE: f64 = 0.10;

/// One reference comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCheck {
    pub name: &'static str,
    pub expected: f64,
    pub computed: f64,
    /// Relative tolerance the comparison was held to
    pub tolerance: f64,
    pub passed: bool,
}

impl ValidationCheck {
    fn against_reference(name: &'static str, expected: f64, computed: f64) -> Self {
        let passed = computed.is_finite() && ((computed - expected) / expected).abs() < REFERENCE_TOLERANCE;
        Self {
            name,
            expected,
            computed,
            tolerance: REFERENCE_TOLERANCE,
            passed,
        }
    }
}

/// The outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
    /// Bodies the routine wanted to check but did not find in the system
    pub skipped: Vec<SolarBody>,
}

impl ValidationReport {
    /// True when every performed check passed. Skipped bodies do not fail the
    /// report; they are a configuration note for the caller.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run the reference self-check against the current system state.
///
/// Checks performed when the bodies are present:
/// * Earth's orbital speed relative to the Sun ≈ 29.78 km/s (±10%)
/// * Earth's surface gravity ≈ 9.81 m/s² (±10%)
/// * every body's position and velocity is finite
pub fn validate(system: &NBodySystem) -> ValidationReport {
    let mut report = ValidationReport::default();

    match (
        system.bodies.get(SolarBody::Earth),
        system.bodies.get(SolarBody::Sun),
    ) {
        (Some(earth), Some(sun)) => {
            let relative_speed = (earth.velocity - sun.velocity).norm();
            report.checks.push(ValidationCheck::against_reference(
                "earth_orbital_speed_m_s",
                EARTH_ORBITAL_SPEED,
                relative_speed,
            ));
            report.checks.push(ValidationCheck::against_reference(
                "earth_surface_gravity_m_s2",
                EARTH_SURFACE_GRAVITY,
                earth.surface_gravity(),
            ));
        }
        (earth, sun) => {
            if earth.is_none() {
                report.skipped.push(SolarBody::Earth);
            }
            if sun.is_none() {
                report.skipped.push(SolarBody::Sun);
            }
        }
    }

    for body in system.bodies.iter() {
        let finite = body.position.iter().all(|c| c.is_finite())
            && body.velocity.iter().all(|c| c.is_finite());
        report.checks.push(ValidationCheck {
            name: "finite_state",
            expected: 1.0,
            computed: if finite { 1.0 } else { 0.0 },
            tolerance: 0.0,
            passed: finite,
        });
    }

    report
}

#[cfg(test)]
mod validation_test {
    use super::*;
    use crate::constants::AU_M;
    use crate::nbody::body::{BodySet, CelestialBody};
    use crate::nbody::gravity::RelativisticConfig;
    use nalgebra::Vector3;

    fn stock_system() -> NBodySystem {
        let mut bodies = BodySet::new();
        bodies.insert(CelestialBody::new(SolarBody::Sun, true));
        bodies.insert(
            CelestialBody::new(SolarBody::Earth, false)
                .with_state(Vector3::new(AU_M, 0.0, 0.0), Vector3::new(0.0, 29_780.0, 0.0)),
        );
        NBodySystem::new(bodies, RelativisticConfig::disabled())
    }

    #[test]
    fn test_stock_system_passes() {
        let report = validate(&stock_system());
        assert!(report.passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_corrupted_mass_fails() {
        let mut system = stock_system();
        system.bodies.get_mut(SolarBody::Earth).unwrap().mass *= 2.0;
        let report = validate(&system);
        assert!(!report.passed());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            report.failures().next().unwrap().name,
            "earth_surface_gravity_m_s2"
        );
    }

    #[test]
    fn test_missing_earth_is_skipped_not_failed() {
        let mut bodies = BodySet::new();
        bodies.insert(CelestialBody::new(SolarBody::Sun, true));
        let system = NBodySystem::new(bodies, RelativisticConfig::disabled());
        let report = validate(&system);
        assert!(report.passed());
        assert_eq!(report.skipped, vec![SolarBody::Earth]);
    }

    #[test]
    fn test_non_finite_state_reported() {
        let mut system = stock_system();
        system.bodies.get_mut(SolarBody::Earth).unwrap().position.x = f64::NAN;
        let report = validate(&system);
        assert!(!report.passed());
        assert!(report.failures().any(|c| c.name == "finite_state"));
    }
}

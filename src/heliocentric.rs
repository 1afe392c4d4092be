//! # Heliocentric position from Keplerian elements
//!
//! Converts propagated orbital elements into a Cartesian position in the
//! right-handed heliocentric ecliptic frame of J2000. The chain is the
//! classical one: mean anomaly → eccentric anomaly (Newton solve) → true
//! anomaly → perifocal position → three sequential rotations (argument of
//! periapsis, inclination, ascending node).

use nalgebra::{Rotation3, Vector3};

use crate::constants::{Degree, Kilometer, AU_KM, RADEG};
use crate::elements::OrbitalElements;
use crate::kepler::{angle_diff, solve_kepler, true_anomaly, KeplerSolution};

/// Cartesian heliocentric state derived from one element set.
///
/// The three anomalies are carried for diagnostics; consumers that only need
/// the position ignore them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricState {
    /// Position in the heliocentric ecliptic J2000 frame, kilometers
    pub position: Vector3<Kilometer>,
    /// Scalar heliocentric distance, kilometers
    pub distance: Kilometer,
    /// Mean anomaly, degrees
    pub mean_anomaly: Degree,
    /// Eccentric anomaly, degrees
    pub eccentric_anomaly: Degree,
    /// True anomaly, degrees
    pub true_anomaly: Degree,
    /// Kepler-solve diagnostics for this evaluation
    pub kepler: KeplerSolution,
}

/// Compute the heliocentric Cartesian state of a body from its elements.
///
/// Steps:
/// 1. mean anomaly `M = L − ϖ`, reduced to the principal range;
/// 2. eccentric anomaly from the Newton solve;
/// 3. true anomaly `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`;
/// 4. orbital-plane radius `r = a·(1 − e·cos E)` and position `(r·cos ν, r·sin ν, 0)`;
/// 5. rotation by `ω = ϖ − Ω`, then inclination, then `Ω`, in that order.
///
/// Deterministic and pure; a non-converged Kepler solve flows through as the
/// best available estimate (see [`KeplerSolution`]).
pub fn heliocentric_state(elements: &OrbitalElements) -> HeliocentricState {
    let mean_anomaly_rad = angle_diff(
        elements.mean_longitude * RADEG,
        elements.perihelion_longitude * RADEG,
    );

    let kepler = solve_kepler(mean_anomaly_rad, elements.eccentricity);
    let ecc_anom = kepler.eccentric_anomaly;
    let nu = true_anomaly(ecc_anom, elements.eccentricity);

    let radius_au = elements.semi_major_axis * (1.0 - elements.eccentricity * ecc_anom.cos());
    let perifocal = Vector3::new(radius_au * nu.cos(), radius_au * nu.sin(), 0.0);

    let periapsis_argument =
        (elements.perihelion_longitude - elements.ascending_node_longitude) * RADEG;
    let node = elements.ascending_node_longitude * RADEG;
    let inclination = elements.inclination * RADEG;

    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), node)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), periapsis_argument);

    let position = rotation * perifocal * AU_KM;

    HeliocentricState {
        position,
        distance: position.norm(),
        mean_anomaly: mean_anomaly_rad / RADEG,
        eccentric_anomaly: ecc_anom / RADEG,
        true_anomaly: nu / RADEG,
        kepler,
    }
}

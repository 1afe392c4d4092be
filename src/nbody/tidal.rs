//! # Tidal-field sampling
//!
//! A diagnostic derived quantity: the radial tidal gradient a secondary body
//! exerts across a primary, with the equilibrium bulge height it implies.
//! Nothing here feeds back into the integration.

use nalgebra::Vector3;

use crate::constants::{Meter, GRAVITATIONAL_CONSTANT};
use crate::orrery_errors::OrreryError;

use super::body::CelestialBody;

/// One tidal-field evaluation for a body pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidalFieldSample {
    /// Radial tidal gradient `−2·G·m₂/r³`, s⁻² (negative: stretching)
    pub gradient: f64,
    /// Unit vector from the primary toward the secondary
    pub direction: Vector3<f64>,
    /// Equilibrium bulge-height estimate on the primary's surface, meters
    pub bulge_height: Meter,
}

/// Sample the tidal field the secondary exerts across the primary.
///
/// The bulge height uses the classical equilibrium-tide estimate
/// `(m₂/m₁)·R⁴/r³` with `R` the primary's radius — an order-of-magnitude
/// diagnostic, not an ocean model.
pub fn tidal_sample(
    primary: &CelestialBody,
    secondary: &CelestialBody,
) -> Result<TidalFieldSample, OrreryError> {
    let separation = secondary.position - primary.position;
    let distance = separation.norm();
    if distance == 0.0 {
        return Err(OrreryError::DegenerateBodyPair(primary.id, secondary.id));
    }

    let gradient = -2.0 * GRAVITATIONAL_CONSTANT * secondary.mass / distance.powi(3);
    let bulge_height =
        (secondary.mass / primary.mass) * primary.radius.powi(4) / distance.powi(3);

    Ok(TidalFieldSample {
        gradient,
        direction: separation / distance,
        bulge_height,
    })
}

//! # Direct N-body gravitational solver
//!
//! Maintains the full Cartesian state of a small set of bodies and advances it
//! with a velocity-Verlet integrator over pairwise Newtonian gravity, plus a
//! scalar relativistic correction for designated bodies. Lagrange points and
//! tidal-field samples are derived on request from the current state and never
//! persisted.
//!
//! All mutable state lives in [`NBodySystem`]; the force, integration, and
//! derivation routines take the state by reference. Each step is atomic: there
//! are no observable intermediate states.

pub mod body;
pub mod gravity;
pub mod integrator;
pub mod lagrange;
pub mod tidal;
pub mod validation;

use crate::constants::SolarBody;
use crate::orrery_errors::OrreryError;

use body::BodySet;
use gravity::RelativisticConfig;

/// The complete state of one N-body simulation instance.
///
/// Owns the body arena and the relativistic configuration; the simulation
/// clock counts seconds since the system was seeded.
#[derive(Debug, Clone)]
pub struct NBodySystem {
    pub bodies: BodySet,
    pub relativity: RelativisticConfig,
    /// Seconds of simulated time accumulated since seeding
    pub elapsed_seconds: f64,
}

impl NBodySystem {
    pub fn new(bodies: BodySet, relativity: RelativisticConfig) -> Self {
        Self {
            bodies,
            relativity,
            elapsed_seconds: 0.0,
        }
    }

    /// Advance the system by one atomic step of `dt` seconds.
    ///
    /// See [`integrator::step`] for the scheme.
    pub fn step(&mut self, dt: f64) {
        integrator::step(&mut self.bodies, &self.relativity, dt);
        self.elapsed_seconds += dt;
    }

    /// Verify that every body's state is finite.
    ///
    /// A computed NaN/Infinity is a defect, not an accepted state; this check
    /// surfaces the first offending body.
    pub fn check_finite(&self) -> Result<(), OrreryError> {
        for body in self.bodies.iter() {
            let finite = body.position.iter().all(|c| c.is_finite())
                && body.velocity.iter().all(|c| c.is_finite());
            if !finite {
                return Err(OrreryError::NonFiniteState(body.id));
            }
        }
        Ok(())
    }

    /// Lagrange points of a configured two-body subsystem, from current positions.
    pub fn lagrange_points(
        &self,
        primary: SolarBody,
        secondary: SolarBody,
    ) -> Result<lagrange::LagrangePointSet, OrreryError> {
        let p = self
            .bodies
            .get(primary)
            .ok_or(OrreryError::BodyNotInSystem(primary))?;
        let s = self
            .bodies
            .get(secondary)
            .ok_or(OrreryError::BodyNotInSystem(secondary))?;
        lagrange::lagrange_points(p, s)
    }

    /// Tidal-field sample exerted by `secondary` across `primary`.
    pub fn tidal_sample(
        &self,
        primary: SolarBody,
        secondary: SolarBody,
    ) -> Result<tidal::TidalFieldSample, OrreryError> {
        let p = self
            .bodies
            .get(primary)
            .ok_or(OrreryError::BodyNotInSystem(primary))?;
        let s = self
            .bodies
            .get(secondary)
            .ok_or(OrreryError::BodyNotInSystem(secondary))?;
        tidal::tidal_sample(p, s)
    }
}

//! # Velocity-Verlet integration
//!
//! Symplectic second-order scheme with good long-term energy behavior, the
//! standard choice for orbital N-body work. Fixed anchor bodies are skipped
//! entirely; their state never changes.

use super::body::BodySet;
use super::gravity::{accumulate_forces, apply_relativistic_correction, zero_forces, RelativisticConfig};

/// Recompute forces and refresh every non-fixed body's acceleration.
///
/// Used once at seeding time so the first Verlet step has a valid `a(t)`,
/// and internally by [`step`] after the position update.
pub fn refresh_accelerations(bodies: &mut BodySet, relativity: &RelativisticConfig) {
    zero_forces(bodies);
    accumulate_forces(bodies);
    apply_relativistic_correction(bodies, relativity);
    for body in bodies.iter_mut() {
        if !body.fixed {
            body.acceleration = body.force / body.mass;
        }
    }
}

/// Advance all non-fixed bodies by one velocity-Verlet step of `dt` seconds.
///
/// 1. `x ← x + v·dt + ½·a·dt²` using the acceleration carried from the
///    previous step;
/// 2. recompute forces (Newtonian + relativistic) at the new positions;
/// 3. `v ← v + ½·(a_old + a_new)·dt` and store `a_new` for the next step.
///
/// The step is atomic: callers never observe the state between sub-phases.
pub fn step(bodies: &mut BodySet, relativity: &RelativisticConfig, dt: f64) {
    let half_dt_sq = 0.5 * dt * dt;
    let old_accelerations: Vec<_> = bodies.iter().map(|b| b.acceleration).collect();

    for body in bodies.iter_mut() {
        if !body.fixed {
            body.position += body.velocity * dt + body.acceleration * half_dt_sq;
        }
    }

    refresh_accelerations(bodies, relativity);

    for (body, old_acceleration) in bodies.iter_mut().zip(old_accelerations) {
        if !body.fixed {
            body.velocity += (old_acceleration + body.acceleration) * (0.5 * dt);
        }
    }
}

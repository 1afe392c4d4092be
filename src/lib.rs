//! # Orrery
//!
//! Astrodynamics and N-body physics core for a solar-system visualization.
//! The crate propagates Keplerian orbital elements through time, solves
//! Kepler's equation, transforms elements into heliocentric Cartesian
//! positions, approximates lunar motion with a truncated periodic series,
//! and optionally runs a direct pairwise N-body integrator with relativistic
//! precession correction, Lagrange-point derivation, and tidal-force
//! estimation.
//!
//! The library boundary is synchronous: a rendering/orchestration layer
//! supplies the current time and playback speed and consumes the immutable
//! position/velocity snapshots published by [`manager::PhysicsManager`].
//! It is valid within a few centuries of the J2000.0 epoch and is not a
//! precision ephemeris service.

pub mod constants;
pub mod elements;
pub mod heliocentric;
pub mod kepler;
pub mod lunar;
pub mod manager;
pub mod nbody;
pub mod orrery_errors;
pub mod time;
